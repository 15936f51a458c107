//! OpenAI chat-completions client

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::llm::core::{
    error::{GatewayError, TransportError},
    provider::LlmGateway,
    types::GenerateRequest,
};

use super::mapper::{extract_reply_text, to_openai_request};

/// Default chat-completions endpoint
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// The underlying `reqwest::Client` pools connections, so a single gateway can
/// serve many concurrent validations.
pub struct OpenAiGateway {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer token
    api_key: String,
    /// Full chat-completions URL
    endpoint: String,
    /// Model identifier
    model: String,
}

impl OpenAiGateway {
    /// Create a new gateway
    ///
    /// # Arguments
    ///
    /// * `api_key` - Provider API key, sent as a bearer token
    /// * `endpoint` - Chat-completions URL
    /// * `model` - Model identifier, e.g. "gpt-4o-mini"
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| GatewayError::Setup(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn send(&self, request: GenerateRequest) -> Result<String, GatewayError> {
        let openai_request = to_openai_request(&self.model, request);

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint = %self.endpoint, error = %e, "request to LLM provider failed");
                GatewayError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::from)?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "LLM provider returned an error status");
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(extract_reply_text(&body))
    }
}
