//! Error handling for the resume parser

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeParserError {
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Resume parse failure: {0}")]
    ParseFailure(String),

    #[error("Parsing cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeParserError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeParserError {
    fn from(err: anyhow::Error) -> Self {
        ResumeParserError::ParseFailure(err.to_string())
    }
}

/// Provider transport failures (network, auth, timeout) surface as parse failures
impl From<reqwest::Error> for ResumeParserError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResumeParserError::ParseFailure(format!("provider request timed out: {}", err))
        } else {
            ResumeParserError::ParseFailure(format!("provider request failed: {}", err))
        }
    }
}

impl From<askama::Error> for ResumeParserError {
    fn from(err: askama::Error) -> Self {
        ResumeParserError::OutputFormatting(err.to_string())
    }
}
