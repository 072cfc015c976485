//! Health check handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"OK"`.
    pub status: String,
    /// Greeting shown to health checks.
    pub message: String,
    /// Server time, RFC 3339.
    pub timestamp: String,
    /// Listening port.
    pub port: u16,
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Sonicly Server is running!".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        port: state.config.port(),
    })
}
