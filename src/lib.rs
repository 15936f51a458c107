//! Trip itinerary validation service
//!
//! Sends an itinerary and the traveller's preferences to an LLM, turns the
//! free-form reply into a structured verdict and serves it over HTTP.

// HTTP server modules
pub mod handlers;
pub mod routes;

// Domain model
pub mod models;

// LLM abstraction layer
pub mod llm;

// Validation pipeline
pub mod validation;

pub mod config;

pub use config::{AppConfig, ConfigError};
pub use validation::{ValidationConfig, ValidationError, ValidationService};
