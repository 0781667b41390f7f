use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use datefr_core::DateExtractor;

use super::access_log::log_request;
use super::handlers;

/// Build the API router around a shared extractor.
pub fn api_router(extractor: Arc<DateExtractor>) -> Router {
    Router::new()
        .route("/parse_dates", post(handlers::parse_dates))
        .route("/health", get(handlers::health))
        .with_state(extractor)
        .layer(axum::middleware::from_fn(log_request))
}
