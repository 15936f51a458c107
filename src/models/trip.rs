// Trip segments, itineraries and user preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::base::TransportationMethod;
use super::cost::CostEstimate;
use super::error::{check_non_negative, check_range, SchemaError};
use super::place::PlaceDetails;

/// One leg of travel between two places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSegment {
    pub start_point: PlaceDetails,
    pub end_point: PlaceDetails,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub cost_estimate: CostEstimate,
    pub transportation_method: TransportationMethod,
}

impl TripSegment {
    pub fn validate(&self) -> Result<(), SchemaError> {
        self.start_point.validate().map_err(|e| e.at("start_point"))?;
        self.end_point.validate().map_err(|e| e.at("end_point"))?;
        if self.arrival_time < self.departure_time {
            return Err(SchemaError::out_of_range(
                "arrival_time",
                format!(
                    "arrival {} is before departure {}",
                    self.arrival_time.to_rfc3339(),
                    self.departure_time.to_rfc3339()
                ),
            ));
        }
        self.cost_estimate.validate().map_err(|e| e.at("cost_estimate"))
    }

    /// Straight-line distance between the two endpoints
    pub fn distance_km(&self) -> f64 {
        self.start_point
            .location
            .coordinates
            .distance_km(&self.end_point.location.coordinates)
    }

    /// Human-readable `start -> end` label
    pub fn label(&self) -> String {
        format!("{} -> {}", self.start_point.name, self.end_point.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub segments: Vec<TripSegment>,
    pub total_cost: CostEstimate,
    /// Hours
    pub total_duration: f64,
}

impl Itinerary {
    /// Validates every segment and requires departures to be non-decreasing
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (i, segment) in self.segments.iter().enumerate() {
            segment
                .validate()
                .map_err(|e| e.at(&format!("[{}]", i)).at("segments"))?;
        }

        for (i, pair) in self.segments.windows(2).enumerate() {
            if pair[1].departure_time < pair[0].departure_time {
                return Err(SchemaError::out_of_range(
                    format!("segments[{}].departure_time", i + 1),
                    "segments must be in chronological order of departure",
                ));
            }
        }

        self.total_cost.validate().map_err(|e| e.at("total_cost"))?;
        check_non_negative("total_duration", self.total_duration)
    }

    /// Find the segment whose endpoint names match, ignoring case and surrounding whitespace
    pub fn find_segment(&self, from: &str, to: &str) -> Option<&TripSegment> {
        let (from, to) = (from.trim(), to.trim());
        self.segments.iter().find(|segment| {
            segment.start_point.name.trim().eq_ignore_ascii_case(from)
                && segment.end_point.name.trim().eq_ignore_ascii_case(to)
        })
    }
}

/// How much the traveller cares about a category, independently of other preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreference {
    pub category: String,
    pub weight: f64,
}

impl UserPreference {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_range("weight", self.weight, 0.0, 1.0)
    }
}
