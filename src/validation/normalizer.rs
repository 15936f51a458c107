//! Turns the model's reply into a `TripValidatorOutput`
//!
//! Replies are tried against three tiers in order and the first success wins:
//!
//! 1. [`ParseTier::StrictParse`]: the whole reply is the JSON contract object.
//! 2. [`ParseTier::FencedParse`]: the JSON is wrapped in a leading/trailing line
//!    (markdown fences, a sentence of prose) or embedded inside prose.
//! 3. [`ParseTier::HeuristicParse`]: no usable JSON. A literal `"is_valid": bool`
//!    is honoured, otherwise validity is guessed from keywords. The reply text
//!    becomes the feedback.
//!
//! Only an empty reply fails every tier.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{
    Itinerary, OptimizationSuggestion, SchemaError, SegmentProjection, SuggestedSegment,
    TripSegment, TripValidatorOutput,
};

/// Keys the reply object must carry for the structured tiers to accept it
pub const REQUIRED_KEYS: [&str; 4] = [
    "is_valid",
    "validation_score",
    "feedback",
    "optimization_suggestions",
];

/// Score assigned by the heuristic tier
pub const HEURISTIC_VALID_SCORE: f64 = 0.9;
pub const HEURISTIC_INVALID_SCORE: f64 = 0.5;

/// Improvement reported when nothing better can be computed
pub const PLACEHOLDER_IMPROVEMENT: f64 = 0.0;

const SUGGESTIONS_MARKER: &str = "suggestions:";
const VERDICT_KEY: &str = "\"is_valid\"";
const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    StrictParse,
    FencedParse,
    HeuristicParse,
}

impl ParseTier {
    pub const ALL: [ParseTier; 3] = [
        ParseTier::StrictParse,
        ParseTier::FencedParse,
        ParseTier::HeuristicParse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParseTier::StrictParse => "strict",
            ParseTier::FencedParse => "fenced",
            ParseTier::HeuristicParse => "heuristic",
        }
    }
}

/// Why a single tier rejected the reply
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("reply is not valid JSON: {0}")]
    Json(String),

    #[error("reply JSON is not an object")]
    NotAnObject,

    #[error("reply is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("reply does not satisfy the output schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("no JSON object found in reply")]
    NoJson,

    #[error("reply is empty")]
    EmptyReply,
}

/// The reply could not be turned into any output at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("the LLM returned an empty reply")]
    EmptyReply,
}

/// Result of normalization along with the tier that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub output: TripValidatorOutput,
    pub tier: ParseTier,
}

/// Percentage saved by the suggested distance. Zero when the original distance is
/// not a positive number; never negative.
pub fn calculate_estimated_improvement(original_distance: f64, suggested_distance: f64) -> f64 {
    if !original_distance.is_finite() || original_distance <= 0.0 || !suggested_distance.is_finite()
    {
        return 0.0;
    }
    ((original_distance - suggested_distance) / original_distance * 100.0).max(0.0)
}

/// Parses model replies, optionally resolving suggestion fragments against the
/// itinerary that was submitted for review
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer<'a> {
    itinerary: Option<&'a Itinerary>,
}

impl<'a> ResponseNormalizer<'a> {
    pub fn new() -> Self {
        Self { itinerary: None }
    }

    pub fn with_itinerary(itinerary: &'a Itinerary) -> Self {
        Self {
            itinerary: Some(itinerary),
        }
    }

    pub fn normalize(&self, raw: &str) -> Result<Normalized, NormalizationError> {
        for tier in ParseTier::ALL {
            match self.parse_with(tier, raw) {
                Ok(output) => {
                    tracing::debug!(tier = tier.as_str(), "normalized LLM reply");
                    return Ok(Normalized { output, tier });
                }
                Err(e) => {
                    tracing::debug!(tier = tier.as_str(), error = %e, "parse tier rejected reply");
                }
            }
        }
        Err(NormalizationError::EmptyReply)
    }

    pub fn parse_with(&self, tier: ParseTier, raw: &str) -> Result<TripValidatorOutput, ParseError> {
        match tier {
            ParseTier::StrictParse => self.strict_parse(raw),
            ParseTier::FencedParse => self.fenced_parse(raw),
            ParseTier::HeuristicParse => self.heuristic_parse(raw),
        }
    }

    /// The whole reply must be the contract object
    pub fn strict_parse(&self, raw: &str) -> Result<TripValidatorOutput, ParseError> {
        let value: Value =
            serde_json::from_str(raw.trim()).map_err(|e| ParseError::Json(e.to_string()))?;
        let object = value.as_object().ok_or(ParseError::NotAnObject)?;

        for key in REQUIRED_KEYS {
            if !object.contains_key(key) {
                return Err(ParseError::MissingKey(key));
            }
        }

        let is_valid = object["is_valid"]
            .as_bool()
            .ok_or_else(|| SchemaError::wrong_type("is_valid", "expected a boolean"))?;
        let validation_score = object["validation_score"]
            .as_f64()
            .ok_or_else(|| SchemaError::wrong_type("validation_score", "expected a number"))?;
        let feedback = object["feedback"]
            .as_str()
            .ok_or_else(|| SchemaError::wrong_type("feedback", "expected a string"))?
            .to_string();
        if feedback.trim().is_empty() {
            return Err(SchemaError::missing_field("feedback", "must not be empty").into());
        }

        let optimization_suggestions = match &object["optimization_suggestions"] {
            Value::Null => None,
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|item| match item.as_object() {
                        Some(fields) => Some(self.suggestion_from_fields(fields)),
                        None => {
                            tracing::debug!("skipping non-object suggestion in reply");
                            None
                        }
                    })
                    .collect(),
            ),
            _ => {
                return Err(SchemaError::wrong_type(
                    "optimization_suggestions",
                    "expected an array or null",
                )
                .into())
            }
        };

        let output = TripValidatorOutput {
            is_valid,
            validation_score,
            feedback,
            optimization_suggestions,
        };
        output.validate()?;
        Ok(output)
    }

    /// Strip one non-JSON line from each end, or failing that, take the outermost
    /// `{ ... }` span, and parse what remains strictly
    pub fn fenced_parse(&self, raw: &str) -> Result<TripValidatorOutput, ParseError> {
        let lines: Vec<&str> = raw.trim().lines().collect();
        let mut body = &lines[..];

        if body.first().is_some_and(|l| !l.trim_start().starts_with('{')) {
            body = &body[1..];
        }
        if body.last().is_some_and(|l| !l.trim_end().ends_with('}')) {
            body = &body[..body.len() - 1];
        }

        let mut last_error = ParseError::NoJson;
        if !body.is_empty() && body.len() < lines.len() {
            match self.strict_parse(&body.join("\n")) {
                Ok(output) => return Ok(output),
                Err(e) => last_error = e,
            }
        }

        match (raw.find('{'), raw.rfind('}')) {
            (Some(start), Some(end)) if start < end => self.strict_parse(&raw[start..=end]),
            _ => Err(last_error),
        }
    }

    /// Keyword classification for replies that carry no usable JSON
    pub fn heuristic_parse(&self, raw: &str) -> Result<TripValidatorOutput, ParseError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyReply);
        }

        // ASCII lowercasing keeps byte offsets aligned with `text`
        let lower = text.to_ascii_lowercase();
        let is_valid = stated_verdict(&lower).unwrap_or_else(|| {
            let prose = lower.replace(VERDICT_KEY, "");
            prose.contains("valid") && !prose.contains("invalid")
        });

        let optimization_suggestions = lower
            .find(SUGGESTIONS_MARKER)
            .map(|idx| text[idx + SUGGESTIONS_MARKER.len()..].trim())
            .filter(|reason| !reason.is_empty())
            .map(|reason| {
                let placeholder = self.itinerary_projection();
                vec![OptimizationSuggestion {
                    original_segment: placeholder.clone(),
                    suggested_segment: placeholder,
                    reason: reason.to_string(),
                    estimated_improvement: PLACEHOLDER_IMPROVEMENT,
                }]
            });

        Ok(TripValidatorOutput {
            is_valid,
            validation_score: if is_valid {
                HEURISTIC_VALID_SCORE
            } else {
                HEURISTIC_INVALID_SCORE
            },
            feedback: raw.to_string(),
            optimization_suggestions,
        })
    }

    fn suggestion_from_fields(&self, fields: &Map<String, Value>) -> OptimizationSuggestion {
        let original_segment = self.resolve_segment(fields.get("original_segment"));
        let suggested_segment = self.resolve_segment(fields.get("suggested_segment"));

        let reason = match fields.get("reason") {
            Some(Value::String(reason)) => reason.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let estimated_improvement = fields
            .get("estimated_improvement")
            .and_then(number_like)
            .filter(|n| n.is_finite() && *n >= 0.0)
            .unwrap_or_else(|| {
                match (original_segment.distance_km(), suggested_segment.distance_km()) {
                    (Some(original), Some(suggested)) => {
                        calculate_estimated_improvement(original, suggested)
                    }
                    _ => PLACEHOLDER_IMPROVEMENT,
                }
            });

        OptimizationSuggestion {
            original_segment,
            suggested_segment,
            reason,
            estimated_improvement,
        }
    }

    /// Full segment when the fragment is one, the matching input segment when the
    /// fragment names its endpoints, otherwise a label-only projection
    fn resolve_segment(&self, fragment: Option<&Value>) -> SuggestedSegment {
        let Some(fragment) = fragment else {
            return unknown_projection();
        };

        if fragment.is_object() {
            if let Ok(segment) = serde_json::from_value::<TripSegment>(fragment.clone()) {
                if segment.validate().is_ok() {
                    return SuggestedSegment::Full(Box::new(segment));
                }
            }
        }

        let (from, to, distance_km) = match fragment {
            Value::Object(fields) => (
                endpoint_label(fields, &["start_point", "from", "start", "origin"]),
                endpoint_label(fields, &["end_point", "to", "end", "destination"]),
                fields
                    .get("distance_km")
                    .or_else(|| fields.get("distance"))
                    .and_then(number_like)
                    .filter(|d| d.is_finite() && *d >= 0.0),
            ),
            Value::String(text) => {
                let (from, to) = split_route_label(text);
                (from, to, None)
            }
            _ => (None, None, None),
        };

        if let (Some(from), Some(to), Some(itinerary)) = (&from, &to, self.itinerary) {
            if let Some(segment) = itinerary.find_segment(from, to) {
                return SuggestedSegment::Full(Box::new(segment.clone()));
            }
        }

        SuggestedSegment::Projection(SegmentProjection {
            from: from.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            to: to.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            distance_km,
        })
    }

    /// First departure to last arrival of the reviewed itinerary
    fn itinerary_projection(&self) -> SuggestedSegment {
        let endpoints = self.itinerary.and_then(|itinerary| {
            let first = itinerary.segments.first()?;
            let last = itinerary.segments.last()?;
            Some((first.start_point.name.clone(), last.end_point.name.clone()))
        });

        match endpoints {
            Some((from, to)) => SuggestedSegment::Projection(SegmentProjection {
                from,
                to,
                distance_km: None,
            }),
            None => unknown_projection(),
        }
    }
}

/// `"is_valid": true|false` left behind by a reply the structured tiers rejected
fn stated_verdict(lower: &str) -> Option<bool> {
    let idx = lower.find(VERDICT_KEY)?;
    let value = lower[idx + VERDICT_KEY.len()..]
        .trim_start()
        .strip_prefix(':')?
        .trim_start();

    if value.starts_with("true") {
        Some(true)
    } else if value.starts_with("false") {
        Some(false)
    } else {
        None
    }
}

fn unknown_projection() -> SuggestedSegment {
    SuggestedSegment::Projection(SegmentProjection {
        from: UNKNOWN_LABEL.to_string(),
        to: UNKNOWN_LABEL.to_string(),
        distance_km: None,
    })
}

/// Numbers, or strings like `"12.5"` / `"12.5%"`
fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

/// Label for an endpoint: either a plain string or a place object's `name`
fn endpoint_label(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(label) if !label.trim().is_empty() => Some(label.trim().to_string()),
        Value::Object(place) => place
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.trim().to_string()),
        _ => None,
    })
}

/// Split `"A -> B"`, `"A → B"` or `"A to B"` into its endpoints
fn split_route_label(text: &str) -> (Option<String>, Option<String>) {
    let text = text.trim();
    for separator in ["->", "→"] {
        if let Some((from, to)) = text.split_once(separator) {
            return (non_empty(from), non_empty(to));
        }
    }

    let lower = text.to_ascii_lowercase();
    if let Some(idx) = lower.find(" to ") {
        let from = if lower.starts_with("from ") && idx >= 5 {
            &text[5..idx]
        } else {
            &text[..idx]
        };
        return (non_empty(from), non_empty(&text[idx + 4..]));
    }

    (non_empty(text), None)
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
