//! Health check endpoint for container orchestration.
//!
//! A liveness probe: it answers 200 whenever the process can serve HTTP, and
//! includes the current number of stored locations for operators.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub total_locations: usize,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running",
        timestamp: Utc::now().timestamp_millis(),
        total_locations: state.store.len().await,
    })
}
