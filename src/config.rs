//! Configuration management for the resume parser

use crate::error::{Result, ResumeParserError};
use crate::llm::ProviderName;
use crate::parsing::ParseMethod;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parsing: ParsingConfig,
    pub providers: ProvidersConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub default_method: ParseMethod,
    /// Provider used by the `llm` method when `--provider` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<ProviderName>,
    pub cache_documents: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderSettings,
    pub claude: ProviderSettings,
    pub cohere: ProviderSettings,
}

/// Everything a provider client needs; passed to it explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline key, takes precedence over `api_key_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            default_method: ParseMethod::Heuristic,
            default_provider: None,
            cache_documents: true,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ProviderSettings {
                api_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-3.5-turbo".to_string(),
                max_tokens: 2048,
                api_key_env: "OPENAI_API_KEY".to_string(),
                api_key: None,
                timeout_secs: 120,
            },
            claude: ProviderSettings {
                api_url: "https://api.anthropic.com/v1".to_string(),
                model: "claude-3-haiku-20240307".to_string(),
                max_tokens: 4096,
                api_key_env: "ANTHROPIC_API_KEY".to_string(),
                api_key: None,
                timeout_secs: 120,
            },
            cohere: ProviderSettings {
                api_url: "https://api.cohere.ai/v1".to_string(),
                model: "command".to_string(),
                max_tokens: 2048,
                api_key_env: "COHERE_API_KEY".to_string(),
                api_key: None,
                timeout_secs: 120,
            },
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
            detailed: false,
        }
    }
}

impl ProvidersConfig {
    pub fn settings(&self, name: ProviderName) -> &ProviderSettings {
        match name {
            ProviderName::OpenAi => &self.openai,
            ProviderName::Claude => &self.claude,
            ProviderName::Cohere => &self.cohere,
        }
    }

    pub fn settings_mut(&mut self, name: ProviderName) -> &mut ProviderSettings {
        match name {
            ProviderName::OpenAi => &mut self.openai,
            ProviderName::Claude => &mut self.claude,
            ProviderName::Cohere => &mut self.cohere,
        }
    }
}

impl ProviderSettings {
    /// Inline key first, then the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| {
                ResumeParserError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
            })
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-parser")
            .join("config.toml")
    }
}
