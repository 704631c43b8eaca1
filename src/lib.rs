//! Resume parser library
//!
//! Turns the plain text of a resume into a [`ParsedResume`] with either the
//! deterministic heuristic strategy or an LLM provider, selected through
//! [`parse_resume`].

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod parsing;

pub use config::Config;
pub use error::{Result, ResumeParserError};
pub use llm::{ProviderName, ProviderRegistry, TextGenerator};
pub use parsing::{parse_resume, parse_resume_cancellable, ParseMethod, ParsedResume, ResumeParser};
