//! Error types for the LLM gateway

use thiserror::Error;

/// The request never produced an HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS handshake failure
    #[error("connection failed: {0}")]
    Connect(String),

    /// No response within the allotted time
    #[error("request timed out")]
    Timeout,

    /// Any other failure while sending or reading the request
    #[error("request failed: {0}")]
    Request(String),
}

/// Errors that can occur when calling the LLM provider
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The provider answered with a non-2xx status
    #[error("provider error (status {status}): {body}")]
    Provider { status: u16, body: String },

    /// The HTTP client could not be constructed
    #[error("client setup failed: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            GatewayError::Provider {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            GatewayError::Transport(err.into())
        }
    }
}
