//! Builds the LLM request for an itinerary review

use crate::llm::core::{
    config::GenerationConfig,
    types::{GenerateRequest, Message},
};
use crate::models::{SchemaError, TripValidatorInput, UserPreference};

/// Fixes the model's role
pub const SYSTEM_INSTRUCTION: &str = "You are a travel assistant specialized in validating \
itineraries. You check timing, transport choices and costs against the traveller's \
preferences, and you always answer in the JSON format you are given.";

/// Output contract restated to the model on every request.
///
/// The field names must stay in sync with `normalizer::REQUIRED_KEYS`.
pub const OUTPUT_CONTRACT: &str = r#"Respond with a single JSON object and nothing else, using exactly these fields:
{
  "is_valid": boolean,
  "validation_score": number between 0 and 1,
  "feedback": string,
  "optimization_suggestions": [
    {
      "original_segment": the itinerary segment to replace, copied verbatim from the input,
      "suggested_segment": the replacement segment, with the same structure as original_segment,
      "reason": string,
      "estimated_improvement": number >= 0, in percent
    }
  ]
}
Use an empty array for "optimization_suggestions" when nothing should change."#;

/// Turns a validation input into a provider-agnostic request
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    generation: GenerationConfig,
}

impl RequestBuilder {
    pub fn new(generation: GenerationConfig) -> Self {
        Self { generation }
    }

    pub fn build(&self, input: &TripValidatorInput) -> Result<GenerateRequest, SchemaError> {
        let snapshot = serde_json::to_string_pretty(input)?;

        let prompt = format!(
            "Validate the following travel itinerary and suggest improvements.\n\n\
             Itinerary and preferences (JSON):\n{}\n\n\
             Traveller preferences (weights 0-1, each independent):\n{}\n\n{}",
            snapshot,
            describe_preferences(&input.user_preferences),
            OUTPUT_CONTRACT
        );

        Ok(GenerateRequest {
            messages: vec![Message::user(prompt)],
            config: self.generation.clone(),
            system: Some(SYSTEM_INSTRUCTION.to_string()),
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}

fn describe_preferences(preferences: &[UserPreference]) -> String {
    if preferences.is_empty() {
        return "- none stated".to_string();
    }

    preferences
        .iter()
        .map(|p| format!("- {}: {:.2}", p.category, p.weight))
        .collect::<Vec<_>>()
        .join("\n")
}
