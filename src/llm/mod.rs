//! Text-generation providers used by the LLM parsing strategy

pub mod prompts;
pub mod providers;

use crate::config::ProvidersConfig;
use crate::error::{Result, ResumeParserError};
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use providers::{ClaudeProvider, CohereProvider, OpenAiProvider};

/// Anything that can turn instructions plus a document into generated text.
///
/// Implementations own their transport, including timeouts; the caller never
/// retries.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    async fn process_text(&self, instructions: &str, document: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    OpenAi,
    Claude,
    Cohere,
}

impl ProviderName {
    pub const ALL: [ProviderName; 3] = [ProviderName::OpenAi, ProviderName::Claude, ProviderName::Cohere];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderName::OpenAi => "openai",
            ProviderName::Claude => "claude",
            ProviderName::Cohere => "cohere",
        }
    }
}

impl FromStr for ProviderName {
    type Err = ResumeParserError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderName::OpenAi),
            "claude" | "anthropic" => Ok(ProviderName::Claude),
            "cohere" => Ok(ProviderName::Cohere),
            other => Err(ResumeParserError::UnsupportedMethod(format!(
                "unknown provider '{}'. Supported: openai, claude, cohere",
                other
            ))),
        }
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configured providers, keyed by name. Built once at startup and passed to
/// the parser facade explicitly.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderName, Arc<dyn TextGenerator>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every provider whose API key can be resolved
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let mut registry = Self::new();

        for name in ProviderName::ALL {
            let settings = config.settings(name);
            let Some(api_key) = settings.resolve_api_key() else {
                debug!("No API key for {} (env {}), provider disabled", name, settings.api_key_env);
                continue;
            };

            let generator: Arc<dyn TextGenerator> = match name {
                ProviderName::OpenAi => Arc::new(OpenAiProvider::new(api_key, settings.clone())?),
                ProviderName::Claude => Arc::new(ClaudeProvider::new(api_key, settings.clone())?),
                ProviderName::Cohere => Arc::new(CohereProvider::new(api_key, settings.clone())?),
            };
            info!("Registered {} provider (model {})", name, settings.model);
            registry.register(name, generator);
        }

        Ok(registry)
    }

    pub fn register(&mut self, name: ProviderName, generator: Arc<dyn TextGenerator>) {
        self.providers.insert(name, generator);
    }

    pub fn with_provider(mut self, name: ProviderName, generator: Arc<dyn TextGenerator>) -> Self {
        self.register(name, generator);
        self
    }

    pub fn get(&self, name: ProviderName) -> Option<Arc<dyn TextGenerator>> {
        self.providers.get(&name).cloned()
    }

    pub fn is_configured(&self, name: ProviderName) -> bool {
        self.providers.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output, then
/// trims any prose around the outermost JSON object.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let unfenced = if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    };

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if end > start => &unfenced[start..=end],
        _ => unfenced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_leading_prose() {
        let input = "Here is the JSON you asked for:\n{\"key\": \"value\"}\nThanks!";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_non_json_left_alone() {
        assert_eq!(strip_json_fences("  not json at all "), "not json at all");
    }

    #[test]
    fn test_provider_names() {
        assert_eq!("OpenAI".parse::<ProviderName>().unwrap(), ProviderName::OpenAi);
        assert_eq!("claude".parse::<ProviderName>().unwrap(), ProviderName::Claude);
        assert_eq!(" cohere ".parse::<ProviderName>().unwrap(), ProviderName::Cohere);
        assert!(matches!(
            "gemini".parse::<ProviderName>(),
            Err(ResumeParserError::UnsupportedMethod(_))
        ));
        assert_eq!(ProviderName::OpenAi.to_string(), "openai");
    }

    #[test]
    fn test_registry_without_keys_is_empty() {
        let mut config = ProvidersConfig::default();
        for name in ProviderName::ALL {
            let settings = config.settings_mut(name);
            settings.api_key = None;
            settings.api_key_env = "RESUME_PARSER_TEST_UNSET_KEY".to_string();
        }
        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_with_inline_key() {
        let mut config = ProvidersConfig::default();
        config.settings_mut(ProviderName::Cohere).api_key = Some("test-key".to_string());
        for name in [ProviderName::OpenAi, ProviderName::Claude] {
            config.settings_mut(name).api_key_env = "RESUME_PARSER_TEST_UNSET_KEY".to_string();
        }
        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert!(registry.is_configured(ProviderName::Cohere));
        assert!(!registry.is_configured(ProviderName::OpenAi));
        assert_eq!(registry.get(ProviderName::Cohere).unwrap().name(), "cohere");
    }
}
