//! Itinerary validation pipeline: request building, reply normalization and
//! the orchestrator that sequences them around the LLM gateway.

pub mod error;
pub mod normalizer;
pub mod prompt;
pub mod service;

pub use error::ValidationError;
pub use normalizer::{
    calculate_estimated_improvement, NormalizationError, Normalized, ParseError, ParseTier,
    ResponseNormalizer,
};
pub use prompt::{RequestBuilder, OUTPUT_CONTRACT, SYSTEM_INSTRUCTION};
pub use service::{Stage, ValidationConfig, ValidationService, SERVICE_VERSION};
