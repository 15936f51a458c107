//! Validation orchestrator
//!
//! Runs one pass of build → call → normalize per request and wraps the result
//! with timing and version metadata. Holds no per-request state, so a single
//! instance can be shared across concurrent requests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::Instrument;
use uuid::Uuid;

use crate::llm::core::{
    config::GenerationConfig, error::TransportError, provider::LlmGateway,
};
use crate::models::{TripValidatorInput, TripValidatorResponse};

use super::error::ValidationError;
use super::normalizer::ResponseNormalizer;
use super::prompt::RequestBuilder;

/// Semantic version stamped on every response
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Progress of a single validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    BuildingRequest,
    AwaitingModel,
    Normalizing,
    Done,
    Failed,
}

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Upper bound on the LLM round trip
    pub request_timeout: Duration,
    pub generation: GenerationConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            generation: GenerationConfig::new(2048)
                .with_temperature(0.2)
                .with_json_mode(true),
        }
    }
}

#[derive(Clone)]
pub struct ValidationService {
    gateway: Arc<dyn LlmGateway>,
    builder: RequestBuilder,
    request_timeout: Duration,
}

impl ValidationService {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: ValidationConfig) -> Self {
        Self {
            gateway,
            builder: RequestBuilder::new(config.generation),
            request_timeout: config.request_timeout,
        }
    }

    /// Validate an itinerary with the LLM
    ///
    /// # Errors
    ///
    /// `Input` when the itinerary breaks a schema constraint, `Transport` or
    /// `Upstream` when the LLM call fails, `Normalization` when the reply is empty.
    pub async fn validate_itinerary(
        &self,
        input: TripValidatorInput,
    ) -> Result<TripValidatorResponse, ValidationError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("validate_itinerary", %request_id);

        async move {
            let started = Instant::now();
            let mut stage = Stage::Idle;

            match self.run(&input, &mut stage).await {
                Ok(mut response) => {
                    response.processing_time = started.elapsed().as_secs_f64();
                    tracing::info!(
                        is_valid = response.output_data.is_valid,
                        score = response.output_data.validation_score,
                        processing_time = response.processing_time,
                        "itinerary validated"
                    );
                    Ok(response)
                }
                Err(e) => {
                    advance(&mut stage, Stage::Failed);
                    if e.is_client_error() {
                        tracing::info!(error = %e, "rejected itinerary");
                    } else {
                        tracing::error!(error = %e, "itinerary validation failed");
                    }
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        input: &TripValidatorInput,
        stage: &mut Stage,
    ) -> Result<TripValidatorResponse, ValidationError> {
        input.validate()?;

        advance(stage, Stage::BuildingRequest);
        let request = self.builder.build(input)?;

        advance(stage, Stage::AwaitingModel);
        let raw_reply = tokio::time::timeout(self.request_timeout, self.gateway.send(request))
            .await
            .map_err(|_| TransportError::Timeout)??;

        advance(stage, Stage::Normalizing);
        let normalized = ResponseNormalizer::with_itinerary(&input.itinerary).normalize(&raw_reply)?;
        tracing::debug!(tier = normalized.tier.as_str(), "reply parsed");

        advance(stage, Stage::Done);
        Ok(TripValidatorResponse {
            output_data: normalized.output,
            processing_time: 0.0,
            version: SERVICE_VERSION.to_string(),
        })
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    let current = *stage;
    tracing::debug!(from = ?current, to = ?next, "stage transition");
    *stage = next;
}
