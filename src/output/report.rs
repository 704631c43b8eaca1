//! Parse report: the parsed resume plus details of how it was produced

use crate::parsing::{ParseMethod, ParsedResume};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub resume: ParsedResume,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub source_file: String,
    pub method: ParseMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    /// Length of the normalized input text
    pub input_characters: usize,
    pub version: String,
}

impl ParseReport {
    pub fn new(resume: ParsedResume, source_file: impl Into<String>, method: ParseMethod) -> Self {
        Self {
            resume,
            metadata: ReportMetadata {
                source_file: source_file.into(),
                method,
                provider: None,
                generated_at: Utc::now(),
                processing_time_ms: 0,
                input_characters: 0,
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.metadata.provider = Some(provider.into());
        self
    }

    pub fn with_timing(mut self, processing_time_ms: u64, input_characters: usize) -> Self {
        self.metadata.processing_time_ms = processing_time_ms;
        self.metadata.input_characters = input_characters;
        self
    }

    /// `heuristic`, or `llm (claude)` when a provider was used
    pub fn method_label(&self) -> String {
        match &self.metadata.provider {
            Some(provider) => format!("{} ({})", self.metadata.method, provider),
            None => self.metadata.method.to_string(),
        }
    }

    pub fn generated_at_label(&self) -> String {
        self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
