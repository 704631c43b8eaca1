//! Parser that delegates structure extraction to a text-generation provider

use crate::error::{Result, ResumeParserError};
use crate::llm::prompts::PromptTemplates;
use crate::llm::{strip_json_fences, TextGenerator};
use crate::parsing::dates::normalize_date;
use crate::parsing::model::{ParsedResume, ResumeSection};
use crate::parsing::ResumeParser;
use log::{debug, info};
use std::future::Future;
use std::sync::Arc;

#[derive(Clone)]
pub struct LlmParser {
    generator: Arc<dyn TextGenerator>,
    templates: PromptTemplates,
}

impl LlmParser {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            templates: PromptTemplates::default(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.generator.name()
    }

    /// Like [`ResumeParser::parse`], but gives up with
    /// [`ResumeParserError::Cancelled`] as soon as `cancelled` resolves.
    pub async fn parse_cancellable<F>(&self, text: &str, cancelled: F) -> Result<ParsedResume>
    where
        F: Future<Output = ()> + Send,
    {
        tokio::select! {
            biased;
            _ = cancelled => {
                info!("LLM parse cancelled");
                Err(ResumeParserError::Cancelled)
            }
            result = self.request(text) => result,
        }
    }

    async fn request(&self, text: &str) -> Result<ParsedResume> {
        debug!("Sending {} characters to {}", text.len(), self.generator.name());
        let reply = self
            .generator
            .process_text(self.templates.resume_instructions(), text)
            .await
            .map_err(|e| match e {
                ResumeParserError::ParseFailure(_) | ResumeParserError::Cancelled => e,
                other => ResumeParserError::ParseFailure(format!(
                    "{} provider failed: {}",
                    self.generator.name(),
                    other
                )),
            })?;

        parse_reply(&reply)
    }
}

impl ResumeParser for LlmParser {
    async fn parse(&self, text: &str) -> Result<ParsedResume> {
        self.request(text).await
    }
}

/// Decode a provider reply and re-canonicalize every date it carries
pub fn parse_reply(reply: &str) -> Result<ParsedResume> {
    let mut resume: ParsedResume = serde_json::from_str(strip_json_fences(reply))
        .map_err(|e| ResumeParserError::ParseFailure(format!("provider reply is not a valid resume: {}", e)))?;

    for section in resume
        .experience
        .iter_mut()
        .chain(resume.education.iter_mut())
        .chain(resume.projects.iter_mut())
    {
        normalize_section_date(section);
    }

    Ok(resume)
}

fn normalize_section_date(section: &mut ResumeSection) {
    if let Some(date) = section.date.as_mut() {
        *date = normalize_date(date);
    }
}
