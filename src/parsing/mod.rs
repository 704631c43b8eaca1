//! Resume parsing: shared utilities, the two strategies and the facade that picks one

pub mod dates;
pub mod entries;
pub mod heuristic;
pub mod llm;
pub mod model;
pub mod personal_info;
pub mod sections;

use crate::error::{Result, ResumeParserError};
use crate::llm::{ProviderName, ProviderRegistry};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;

pub use heuristic::HeuristicParser;
pub use llm::LlmParser;
pub use model::{ParsedResume, PersonalInfo, ResumeSection};
pub use personal_info::PersonalInfoMode;

/// Common interface of every parsing strategy
pub trait ResumeParser {
    fn parse(&self, text: &str) -> impl Future<Output = Result<ParsedResume>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMethod {
    Heuristic,
    NlpAssisted,
    Llm,
}

impl ParseMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMethod::Heuristic => "heuristic",
            ParseMethod::NlpAssisted => "nlp-assisted",
            ParseMethod::Llm => "llm",
        }
    }
}

impl FromStr for ParseMethod {
    type Err = ResumeParserError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "traditional" => Ok(ParseMethod::Heuristic),
            "nlp-assisted" | "nlp" => Ok(ParseMethod::NlpAssisted),
            "llm" | "ai" => Ok(ParseMethod::Llm),
            other => Err(ResumeParserError::UnsupportedMethod(format!(
                "unknown parsing method '{}'. Supported: heuristic, nlp-assisted, llm",
                other
            ))),
        }
    }
}

impl fmt::Display for ParseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The strategy chosen for one parse call
#[derive(Clone)]
pub enum ParseStrategy {
    Heuristic(HeuristicParser),
    Llm(LlmParser),
}

impl ParseStrategy {
    /// Resolve a method and optional provider into a ready strategy.
    ///
    /// `llm` needs a provider that is both known and present in `registry`.
    pub fn select(method: ParseMethod, provider: Option<&str>, registry: &ProviderRegistry) -> Result<Self> {
        match method {
            ParseMethod::Heuristic => Ok(ParseStrategy::Heuristic(HeuristicParser::new(PersonalInfoMode::LineBased))),
            ParseMethod::NlpAssisted => {
                Ok(ParseStrategy::Heuristic(HeuristicParser::new(PersonalInfoMode::NlpAssisted)))
            }
            ParseMethod::Llm => {
                let name: ProviderName = provider
                    .ok_or_else(|| {
                        ResumeParserError::UnsupportedMethod("the llm method requires a provider name".to_string())
                    })?
                    .parse()?;
                let generator = registry.get(name).ok_or_else(|| {
                    ResumeParserError::UnsupportedMethod(format!("provider '{}' is not configured", name))
                })?;
                Ok(ParseStrategy::Llm(LlmParser::new(generator)))
            }
        }
    }

    pub fn name(&self) -> String {
        match self {
            ParseStrategy::Heuristic(_) => "heuristic".to_string(),
            ParseStrategy::Llm(parser) => format!("llm ({})", parser.provider_name()),
        }
    }

    /// The heuristic strategy has no suspension point and ignores `cancelled`
    pub async fn parse_cancellable<F>(&self, text: &str, cancelled: F) -> Result<ParsedResume>
    where
        F: Future<Output = ()> + Send,
    {
        match self {
            ParseStrategy::Heuristic(parser) => Ok(parser.parse_text(text)),
            ParseStrategy::Llm(parser) => parser.parse_cancellable(text, cancelled).await,
        }
    }
}

impl ResumeParser for ParseStrategy {
    async fn parse(&self, text: &str) -> Result<ParsedResume> {
        match self {
            ParseStrategy::Heuristic(parser) => parser.parse(text).await,
            ParseStrategy::Llm(parser) => parser.parse(text).await,
        }
    }
}

/// Parse `text` with the named method. Strategy errors are returned unchanged.
pub async fn parse_resume(
    text: &str,
    method: &str,
    provider: Option<&str>,
    registry: &ProviderRegistry,
) -> Result<ParsedResume> {
    let strategy = ParseStrategy::select(method.parse()?, provider, registry)?;
    info!("Parsing resume with {} strategy", strategy.name());
    strategy.parse(text).await
}

/// [`parse_resume`] that stops with [`ResumeParserError::Cancelled`] once `cancelled` resolves
pub async fn parse_resume_cancellable<F>(
    text: &str,
    method: &str,
    provider: Option<&str>,
    registry: &ProviderRegistry,
    cancelled: F,
) -> Result<ParsedResume>
where
    F: Future<Output = ()> + Send,
{
    let strategy = ParseStrategy::select(method.parse()?, provider, registry)?;
    info!("Parsing resume with {} strategy", strategy.name());
    strategy.parse_cancellable(text, cancelled).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!("heuristic".parse::<ParseMethod>().unwrap(), ParseMethod::Heuristic);
        assert_eq!("Traditional".parse::<ParseMethod>().unwrap(), ParseMethod::Heuristic);
        assert_eq!("nlp".parse::<ParseMethod>().unwrap(), ParseMethod::NlpAssisted);
        assert_eq!("nlp-assisted".parse::<ParseMethod>().unwrap(), ParseMethod::NlpAssisted);
        assert_eq!("AI".parse::<ParseMethod>().unwrap(), ParseMethod::Llm);
        assert!(matches!(
            "magic".parse::<ParseMethod>(),
            Err(ResumeParserError::UnsupportedMethod(_))
        ));
        assert_eq!(ParseMethod::NlpAssisted.to_string(), "nlp-assisted");
    }

    #[test]
    fn test_select_llm_requires_provider() {
        let registry = ProviderRegistry::new();
        for provider in [None, Some("openai"), Some("gemini")] {
            assert!(matches!(
                ParseStrategy::select(ParseMethod::Llm, provider, &registry),
                Err(ResumeParserError::UnsupportedMethod(_))
            ));
        }
    }

    #[test]
    fn test_select_heuristic_ignores_provider() {
        let registry = ProviderRegistry::new();
        let strategy = ParseStrategy::select(ParseMethod::NlpAssisted, Some("nonsense"), &registry).unwrap();
        assert_eq!(strategy.name(), "heuristic");
    }

    #[tokio::test]
    async fn test_facade_heuristic() {
        let text = "Jane Doe\n\nSUMMARY\nBuilds parsers.";
        let resume = parse_resume(text, "heuristic", None, &ProviderRegistry::new()).await.unwrap();
        assert_eq!(resume.personal_info.name, "Jane Doe");
        assert_eq!(resume.summary, "Builds parsers.");
    }

    #[tokio::test]
    async fn test_facade_calls_are_independent() {
        let registry = ProviderRegistry::new();
        let first = parse_resume("SUMMARY\nOne.", "heuristic", None, &registry).await.unwrap();
        let second = parse_resume("no headings here", "heuristic", None, &registry).await.unwrap();
        assert_eq!(first.summary, "One.");
        assert!(second.is_empty());
    }
}
