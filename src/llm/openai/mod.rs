//! OpenAI provider implementation
//!
//! This module provides a gateway to an OpenAI-compatible chat-completions
//! endpoint authenticated with a bearer API key.

pub mod client;
pub mod mapper;
pub mod types;

// Re-export commonly used types
pub use client::{OpenAiGateway, DEFAULT_MODEL, OPENAI_CHAT_COMPLETIONS_URL};
