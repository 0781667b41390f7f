use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, FixedOffset};
use datefr_core::{DateExtractor, DateResult};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TextInput {
    pub text: String,
}

/// Timestamps serialize as ISO-8601 with the local UTC offset.
#[derive(Debug, Serialize)]
pub struct DateResponse {
    pub due_date: Option<DateTime<FixedOffset>>,
    pub completion_date: Option<DateTime<FixedOffset>>,
}

impl From<DateResult> for DateResponse {
    fn from(result: DateResult) -> Self {
        Self {
            due_date: result.due_date.map(|d| d.fixed_offset()),
            completion_date: result.completion_date.map(|d| d.fixed_offset()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `POST /parse_dates`: due and completion dates found in `text`.
///
/// Extraction runs on the blocking pool; a panic there surfaces as a 500
/// like any other failure.
pub async fn parse_dates(
    State(extractor): State<Arc<DateExtractor>>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Result<Json<DateResponse>, ApiError> {
    let Json(input) = payload?;
    let result = tokio::task::spawn_blocking(move || extractor.extract(&input.text)).await??;
    Ok(Json(result.into()))
}

/// `GET /health`: liveness only, no internal checks.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
