//! User profile handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::parse_user;
use crate::error::ApiError;
use crate::records::Record;
use crate::state::AppState;

/// Response for a saved profile.
#[derive(Debug, Serialize)]
pub struct SaveUserResponse {
    /// Outcome message.
    pub message: String,
    /// The merged profile.
    pub user: Record,
}

/// Get a user's profile.
///
/// Returns 404 if nothing was ever saved for the user.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let user_id = parse_user(&user_id)?;
    state
        .records
        .profile(&user_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("User not found".into()))
}

/// Merge the request body into a user's profile.
pub async fn save_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(patch): Json<Record>,
) -> Result<Json<SaveUserResponse>, ApiError> {
    let user_id = parse_user(&user_id)?;
    let user = state.records.save_profile(&user_id, patch)?;

    tracing::debug!(user_id = %user_id, "User profile saved");

    Ok(Json(SaveUserResponse {
        message: "User data saved successfully".into(),
        user,
    }))
}
