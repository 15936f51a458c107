// Domain model: places, costs, trips and the validator envelopes

pub mod api;
pub mod base;
pub mod cost;
pub mod error;
pub mod place;
pub mod trip;
pub mod validator;

#[cfg(test)]
pub(crate) mod fixtures;

pub use api::{ErrorResponse, HealthResponse, ServiceInfo};
pub use base::{Coordinates, Currency, Location, TransportationMethod};
pub use cost::{CostDetails, CostEstimate};
pub use error::{SchemaError, SchemaErrorKind};
pub use place::{OpeningHours, PlaceDetails, Picture, Review, ReviewAuthor, TimeRange};
pub use trip::{Itinerary, TripSegment, UserPreference};
pub use validator::{
    OptimizationSuggestion, SegmentProjection, SuggestedSegment, TripValidatorInput,
    TripValidatorOutput, TripValidatorRequest, TripValidatorResponse,
};
