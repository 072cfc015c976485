//! HTTP request handlers.

pub mod billing;
pub mod health;
pub mod payments;
pub mod subscriptions;
pub mod users;

use axum::response::IntoResponse;
use serde::Serialize;
use sonicly_core::UserId;

use crate::error::ApiError;

/// Acknowledgement body for operations that return no record.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    ApiError::NotFound("Endpoint not found".into()).into_response()
}

/// Parse the `:user_id` path segment.
pub(crate) fn parse_user(raw: &str) -> Result<UserId, ApiError> {
    Ok(UserId::new(raw)?)
}

