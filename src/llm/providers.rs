//! HTTP clients for the hosted text-generation APIs
//!
//! Each client is built from explicit [`ProviderSettings`] and makes exactly
//! one request per call. Timeouts come from the reqwest client and surface as
//! parse failures through the `From<reqwest::Error>` conversion.

use crate::config::ProviderSettings;
use crate::error::{Result, ResumeParserError};
use crate::llm::prompts::dialogue_prompt;
use crate::llm::TextGenerator;
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";

fn build_client(settings: &ProviderSettings) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| ResumeParserError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

fn endpoint(settings: &ProviderSettings, path: &str) -> String {
    format!("{}/{}", settings.api_url.trim_end_matches('/'), path)
}

/// Turn a non-2xx reply into a parse failure carrying the provider's message
async fn check_status(provider: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .ok()
        .and_then(ApiErrorEnvelope::into_message)
        .unwrap_or(body);

    Err(ResumeParserError::ParseFailure(format!(
        "{} API error (status {}): {}",
        provider,
        status.as_u16(),
        message
    )))
}

/// Error bodies differ per vendor: `{"error": {"message"}}` or `{"message"}`
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ApiErrorEnvelope {
    fn into_message(self) -> Option<String> {
        self.error.map(|e| e.message).or(self.message)
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// OpenAI

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI chat completions: instructions as the system message, document as the user message
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    settings: ProviderSettings,
}

impl OpenAiProvider {
    pub fn new(api_key: String, settings: ProviderSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(&settings)?,
            api_key,
            settings,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn process_text(&self, instructions: &str, document: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instructions,
                },
                ChatMessage {
                    role: "user",
                    content: document,
                },
            ],
        };

        debug!("POST chat/completions (model {})", self.settings.model);
        let response = self
            .client
            .post(endpoint(&self.settings, "chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response: ChatCompletionResponse = check_status(self.name(), response).await?.json().await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("OpenAI reply has no message content")?;
        Ok(text)
    }
}

// Claude

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// Anthropic messages API with the instructions as the system prompt
#[derive(Clone)]
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    settings: ProviderSettings,
}

impl ClaudeProvider {
    pub fn new(api_key: String, settings: ProviderSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(&settings)?,
            api_key,
            settings,
        })
    }
}

#[async_trait]
impl TextGenerator for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    async fn process_text(&self, instructions: &str, document: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            system: instructions,
            messages: vec![ChatMessage {
                role: "user",
                content: document,
            }],
        };

        debug!("POST messages (model {})", self.settings.model);
        let response = self
            .client
            .post(endpoint(&self.settings, "messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;
        let response: MessagesResponse = check_status(self.name(), response).await?.json().await?;

        let text = response
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .context("Claude reply has no text block")?;
        Ok(text)
    }
}

// Cohere

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

/// Cohere generate API; no system role, so instructions and document share one prompt
#[derive(Clone)]
pub struct CohereProvider {
    client: Client,
    api_key: String,
    settings: ProviderSettings,
}

impl CohereProvider {
    pub fn new(api_key: String, settings: ProviderSettings) -> Result<Self> {
        Ok(Self {
            client: build_client(&settings)?,
            api_key,
            settings,
        })
    }
}

#[async_trait]
impl TextGenerator for CohereProvider {
    fn name(&self) -> &str {
        "cohere"
    }

    async fn process_text(&self, instructions: &str, document: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            prompt: dialogue_prompt(instructions, document, "AI"),
        };

        debug!("POST generate (model {})", self.settings.model);
        let response = self
            .client
            .post(endpoint(&self.settings, "generate"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response: GenerateResponse = check_status(self.name(), response).await?.json().await?;

        let text = response
            .generations
            .into_iter()
            .next()
            .map(|generation| generation.text)
            .context("Cohere reply has no generations")?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProvidersConfig;
    use crate::llm::ProviderName;

    #[test]
    fn test_endpoint_joins_paths() {
        let mut settings = ProvidersConfig::default().settings(ProviderName::OpenAi).clone();
        assert_eq!(
            endpoint(&settings, "chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        settings.api_url = "http://localhost:8080/v1/".to_string();
        assert_eq!(endpoint(&settings, "generate"), "http://localhost:8080/v1/generate");
    }

    #[test]
    fn test_error_envelope_shapes() {
        let nested: ApiErrorEnvelope =
            serde_json::from_str(r#"{"error": {"message": "bad key", "type": "auth"}}"#).unwrap();
        assert_eq!(nested.into_message().as_deref(), Some("bad key"));

        let flat: ApiErrorEnvelope = serde_json::from_str(r#"{"message": "quota"}"#).unwrap();
        assert_eq!(flat.into_message().as_deref(), Some("quota"));
    }

    #[test]
    fn test_claude_request_shape() {
        let request = MessagesRequest {
            model: "claude-3-haiku-20240307",
            max_tokens: 10,
            system: "instructions",
            messages: vec![ChatMessage {
                role: "user",
                content: "document",
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["system"], "instructions");
        assert_eq!(value["messages"][0]["content"], "document");
    }

    #[test]
    fn test_response_extraction_shapes() {
        let chat: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant", "content": "{}"}}]}"#)
                .unwrap();
        assert_eq!(chat.choices[0].message.content.as_deref(), Some("{}"));

        let messages: MessagesResponse =
            serde_json::from_str(r#"{"content": [{"type": "text", "text": "{}"}]}"#).unwrap();
        assert_eq!(messages.content[0].text.as_deref(), Some("{}"));

        let generate: GenerateResponse = serde_json::from_str(r#"{"generations": [{"text": "{}"}]}"#).unwrap();
        assert_eq!(generate.generations[0].text, "{}");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_parse_failure() {
        let mut settings = ProvidersConfig::default().settings(ProviderName::Cohere).clone();
        settings.api_url = "http://127.0.0.1:9".to_string();
        settings.timeout_secs = 2;
        let provider = CohereProvider::new("key".to_string(), settings).unwrap();

        let result = provider.process_text("instructions", "document").await;
        assert!(matches!(result, Err(ResumeParserError::ParseFailure(_))));
    }
}
