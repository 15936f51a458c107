//! Gateway trait for LLM implementations

use async_trait::async_trait;

use super::{error::GatewayError, types::GenerateRequest};

/// One request/response exchange with an LLM endpoint
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the request and return the provider's reply text
    ///
    /// Exactly one network round trip is made; retrying is left to the caller.
    ///
    /// # Errors
    ///
    /// `GatewayError::Transport` when no response arrives, `GatewayError::Provider`
    /// when the provider answers with a non-2xx status.
    async fn send(&self, request: GenerateRequest) -> Result<String, GatewayError>;
}
