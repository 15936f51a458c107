// Request and response envelopes for itinerary validation

use serde::{Deserialize, Serialize};

use super::error::{check_non_negative, check_range, SchemaError};
use super::trip::{Itinerary, TripSegment, UserPreference};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripValidatorInput {
    pub itinerary: Itinerary,
    pub user_preferences: Vec<UserPreference>,
}

impl TripValidatorInput {
    /// Deserialize and validate in one step
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let input: TripValidatorInput = serde_json::from_str(json)?;
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        self.itinerary.validate().map_err(|e| e.at("itinerary"))?;
        for (i, preference) in self.user_preferences.iter().enumerate() {
            preference
                .validate()
                .map_err(|e| e.at(&format!("[{}]", i)).at("user_preferences"))?;
        }
        Ok(())
    }
}

/// HTTP body of `POST /route`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripValidatorRequest {
    pub input_data: TripValidatorInput,
}

/// Reduced view of a segment when the model's reply does not carry a full one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentProjection {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuggestedSegment {
    Full(Box<TripSegment>),
    Projection(SegmentProjection),
}

impl SuggestedSegment {
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            SuggestedSegment::Full(segment) => Some(segment.distance_km()),
            SuggestedSegment::Projection(projection) => projection.distance_km,
        }
    }

    pub fn label(&self) -> String {
        match self {
            SuggestedSegment::Full(segment) => segment.label(),
            SuggestedSegment::Projection(projection) => {
                format!("{} -> {}", projection.from, projection.to)
            }
        }
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        match self {
            SuggestedSegment::Full(segment) => segment.validate(),
            SuggestedSegment::Projection(projection) => match projection.distance_km {
                Some(distance) => check_non_negative("distance_km", distance),
                None => Ok(()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub original_segment: SuggestedSegment,
    pub suggested_segment: SuggestedSegment,
    pub reason: String,
    /// Percent
    pub estimated_improvement: f64,
}

impl OptimizationSuggestion {
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.original_segment
            .validate()
            .map_err(|e| e.at("original_segment"))?;
        self.suggested_segment
            .validate()
            .map_err(|e| e.at("suggested_segment"))?;
        check_non_negative("estimated_improvement", self.estimated_improvement)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripValidatorOutput {
    pub is_valid: bool,
    pub validation_score: f64,
    pub feedback: String,
    #[serde(default)]
    pub optimization_suggestions: Option<Vec<OptimizationSuggestion>>,
}

impl TripValidatorOutput {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_range("validation_score", self.validation_score, 0.0, 1.0)?;
        if let Some(suggestions) = &self.optimization_suggestions {
            for (i, suggestion) in suggestions.iter().enumerate() {
                suggestion
                    .validate()
                    .map_err(|e| e.at(&format!("[{}]", i)).at("optimization_suggestions"))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripValidatorResponse {
    pub output_data: TripValidatorOutput,
    /// Seconds
    pub processing_time: f64,
    /// `MAJOR.MINOR.PATCH`
    pub version: String,
}

impl TripValidatorResponse {
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.output_data.validate().map_err(|e| e.at("output_data"))?;
        check_non_negative("processing_time", self.processing_time)?;
        if !is_semver(&self.version) {
            return Err(SchemaError::format_mismatch(
                "version",
                format!("`{}` is not MAJOR.MINOR.PATCH", self.version),
            ));
        }
        Ok(())
    }
}

fn is_semver(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}
