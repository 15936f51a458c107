// GET / and GET /health handlers

use crate::models::{HealthResponse, ServiceInfo};
use crate::validation::SERVICE_VERSION;
use std::convert::Infallible;

pub const SERVICE_BANNER: &str = "Trip itinerary validation API";

pub async fn root_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&ServiceInfo {
        message: SERVICE_BANNER.to_string(),
    }))
}

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&HealthResponse {
        status: "ok".to_string(),
        version: SERVICE_VERSION.to_string(),
    }))
}
