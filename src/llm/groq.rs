//! Groq provider implementation
//!
//! Groq exposes an OpenAI-compatible chat-completions endpoint, so any
//! compatible service works by overriding the base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::{
    errors::{GatewayError, GatewayResult},
    provider::CompletionProvider,
    types::{ProviderConfig, Role, Turn, DEFAULT_BASE_URL},
};

const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Groq API provider
#[derive(Debug, Clone)]
pub struct GroqProvider {
    client: Client,
    config: ProviderConfig,
}

impl GroqProvider {
    /// Create a new Groq provider.
    ///
    /// The HTTP client is built once here and reused for every request. A
    /// missing API key is not an error yet; it surfaces when the first
    /// completion is attempted.
    pub fn new(config: ProviderConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| {
                GatewayError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> GatewayResult<&str> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(GatewayError::ConfigError(
                "API key is not configured. Set GROQ_API_KEY".to_string(),
            )),
        }
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/v1/chat/completions", base_url.trim_end_matches('/'))
    }

    /// Convert turns to the provider's message shape, preserving order
    fn convert_turns(&self, turns: &[Turn]) -> Vec<GroqMessage> {
        turns
            .iter()
            .map(|turn| GroqMessage {
                role: turn.role,
                content: turn.content.clone(),
            })
            .collect()
    }

    /// Build a request body from the current turn snapshot and the fixed
    /// sampling configuration
    fn build_request(&self, turns: &[Turn]) -> GroqRequest {
        GroqRequest {
            model: self.config.model.clone(),
            messages: self.convert_turns(turns),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, turns: &[Turn]) -> GatewayResult<String> {
        let api_key = self.api_key()?;
        let request = self.build_request(turns);

        debug!(
            "Sending completion request: model={}, turns={}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => extract_error_message(status, &body),
                Err(_) => format!("{}: Failed to read error response", status),
            };
            return Err(classify_status(status, message));
        }

        let body = response.text().await?;
        let completion: GroqResponse = serde_json::from_str(&body)?;
        extract_reply(completion)
    }

    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Pull a human-readable message out of an error response body
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return format!("{}: {}", status, message);
        }
    }
    format!("{}: {}", status, body)
}

/// Map a non-success status to the matching error kind
fn classify_status(status: StatusCode, message: String) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::AuthError(message),
        _ => GatewayError::ApiError(message),
    }
}

/// Take the first choice's text, trimmed of surrounding whitespace
fn extract_reply(completion: GroqResponse) -> GatewayResult<String> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::ResponseError("No choices in response".to_string()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| GatewayError::ResponseError("No message content in choice".to_string()))?;

    Ok(content.trim().to_string())
}

// Groq API types (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: Role,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}
