//! LLM Gateway
//!
//! A provider-agnostic request type plus a single-shot gateway trait, with an
//! implementation for OpenAI-compatible chat-completions endpoints.

pub mod core;
pub mod openai;

// Re-export commonly used types
pub use self::core::{
    config::GenerationConfig,
    error::{GatewayError, TransportError},
    provider::LlmGateway,
    types::{GenerateRequest, Message, MessageRole},
};

pub use openai::OpenAiGateway;
