use crate::llm::core::error::{GatewayError, TransportError};
use crate::models::SchemaError;

use super::normalizer::NormalizationError;

/// Errors surfaced by a validation call
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The submitted itinerary broke a schema constraint
    #[error("Invalid input data: {0}")]
    Input(#[from] SchemaError),

    /// The LLM provider could not be reached in time
    #[error("LLM request failed: {0}")]
    Transport(#[from] TransportError),

    /// The LLM provider answered with a non-2xx status
    #[error("LLM provider returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The reply could not be turned into a result
    #[error("Could not interpret LLM reply: {0}")]
    Normalization(#[from] NormalizationError),
}

impl ValidationError {
    /// Whether the caller sent something wrong, as opposed to a server-side failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, ValidationError::Input(_))
    }
}

impl From<GatewayError> for ValidationError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(e) => ValidationError::Transport(e),
            GatewayError::Provider { status, body } => ValidationError::Upstream { status, body },
            GatewayError::Setup(message) => {
                ValidationError::Transport(TransportError::Request(message))
            }
        }
    }
}
