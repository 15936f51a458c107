// Route definitions

use crate::handlers;
use crate::validation::ValidationService;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

/// Upper bound on a `POST /route` body
pub const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn configure_routes(
    service: Arc<ValidationService>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    // GET /
    let root = warp::path::end()
        .and(warp::get())
        .and_then(handlers::root_handler);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    // POST /route
    let validate_route = warp::path("route")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_service(service))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and_then(handlers::validate_route_handler);

    root.or(health)
        .or(validate_route)
        .recover(handlers::handle_rejection)
}

fn with_service(
    service: Arc<ValidationService>,
) -> impl Filter<Extract = (Arc<ValidationService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}
