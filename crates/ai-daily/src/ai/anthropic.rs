//! Claude backend over the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::provider::{Completion, CompletionRequest, LlmProvider};

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Per-call timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Sends summary prompts to Claude.
pub struct AnthropicProvider {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl AnthropicProvider {
    /// Provider with an explicit key against the public API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            api_key: Some(api_key.into()),
            endpoint: messages_endpoint(ANTHROPIC_API_BASE),
        })
    }

    /// Provider from run configuration. Without a key it reports itself
    /// unconfigured and is never called.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let base = config.base_url.as_deref().unwrap_or(ANTHROPIC_API_BASE);
        if config.base_url.is_some() {
            tracing::info!(base_url = base, "Using custom Anthropic base URL");
        }

        Ok(Self {
            client: build_client()?,
            api_key: config.api_key.clone(),
            endpoint: messages_endpoint(base),
        })
    }

    /// Point at a proxy or mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoint = messages_endpoint(base_url);
        self
    }
}

fn build_client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Base URLs exclude the `/v1/messages` path.
fn messages_endpoint(base_url: &str) -> String {
    format!("{}/v1/messages", base_url.trim_end_matches('/'))
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Ai("ANTHROPIC_API_KEY not set".to_string()))?;

        let body = MessagesRequest {
            model: request.model,
            max_tokens: request.max_tokens,
            messages: [UserMessage {
                role: "user",
                content: request.prompt,
            }],
        };

        tracing::debug!(model = request.model, endpoint = %self.endpoint, "Calling Claude API");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Ai(format!("Anthropic API request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Ai(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Error::Ai(match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(body) => format!("Anthropic API error: {} - {}", body.error.kind, body.error.message),
                Err(_) => format!("Anthropic API error ({status}): {text}"),
            }));
        }

        let parsed: MessagesResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Ai(format!("Failed to parse Anthropic response: {e}")))?;

        let text = parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or_else(|| Error::Ai("Anthropic response had no text content".to_string()))?;

        Ok(Completion {
            text,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
        })
    }
}
