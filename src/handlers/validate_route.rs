// POST /route handler

use crate::handlers::error_reply;
use crate::models::TripValidatorRequest;
use crate::validation::{ValidationError, ValidationService};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Reply;

pub async fn validate_route_handler(
    service: Arc<ValidationService>,
    request: TripValidatorRequest,
) -> Result<warp::reply::Response, Infallible> {
    tracing::info!(
        segments = request.input_data.itinerary.segments.len(),
        preferences = request.input_data.user_preferences.len(),
        "POST /route"
    );

    match service.validate_itinerary(request.input_data).await {
        Ok(response) => {
            Ok(warp::reply::with_status(warp::reply::json(&response), StatusCode::OK).into_response())
        }
        Err(e) => Ok(error_reply(status_for(&e), e.to_string())),
    }
}

/// HTTP status for a failed validation
pub fn status_for(err: &ValidationError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
