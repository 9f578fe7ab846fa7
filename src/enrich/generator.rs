//! Text generation backends
//!
//! The enricher only needs "prompt in, text out". `TextGenerator` is that
//! seam; `OpenAiGenerator` implements it against a chat-completions API.

use crate::config::EnricherConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from a text generation call
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("Generation service returned no text")]
    EmptyResponse,

    #[error("Malformed generation response: {0}")]
    Malformed(String),
}

/// Sampling parameters forwarded to the generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 100,
        }
    }
}

/// An opaque text generation capability
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`, or fails
    async fn generate(&self, prompt: &str, params: &SamplingParams)
        -> Result<String, EnrichError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Chat-completions client
pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiGenerator {
    pub fn new(
        client: Client,
        api_base: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a generator from configuration, reading the key from the
    /// configured environment variable
    pub fn from_config(config: &EnricherConfig) -> Result<Self, EnrichError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| EnrichError::MissingApiKey(config.api_key_env.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self::new(client, &config.api_base, &config.model, api_key))
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, EnrichError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "system",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| EnrichError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(EnrichError::EmptyResponse)
    }
}
