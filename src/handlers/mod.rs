// Handlers module

pub mod rejection;
pub mod status;
pub mod validate_route;

pub use rejection::handle_rejection;
pub use status::{health_handler, root_handler};
pub use validate_route::validate_route_handler;

use crate::models::ErrorResponse;
use warp::http::StatusCode;
use warp::Reply;

/// JSON `{"detail": ...}` reply with the given status
pub fn error_reply(status: StatusCode, detail: impl Into<String>) -> warp::reply::Response {
    let body = ErrorResponse {
        detail: detail.into(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}
