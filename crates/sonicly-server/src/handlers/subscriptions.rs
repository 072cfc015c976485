//! Subscription handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use sonicly_store::Collection;

use super::parse_user;
use crate::error::ApiError;
use crate::records::{Outcome, Placement, Record};
use crate::state::AppState;

/// Response for a stored subscription.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    /// Outcome message.
    pub message: String,
    /// The stored subscription.
    pub subscription: Record,
}

/// List a user's subscriptions in insertion order.
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let user_id = parse_user(&user_id)?;
    Ok(Json(state.records.list(Collection::Subscriptions, &user_id)?))
}

/// Append a subscription, stamping `createdAt` and `updatedAt`.
pub async fn add_subscription(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(record): Json<Record>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let user_id = parse_user(&user_id)?;
    let subscription = state.records.insert(
        Collection::Subscriptions,
        &user_id,
        record,
        Placement::Back,
        &["createdAt", "updatedAt"],
    )?;

    tracing::info!(
        user_id = %user_id,
        subscription_id = ?subscription.get("id"),
        "Subscription added"
    );

    Ok(Json(SubscriptionResponse {
        message: "Subscription added successfully".into(),
        subscription,
    }))
}

/// Merge the request body into one subscription.
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Path((user_id, subscription_id)): Path<(String, String)>,
    Json(patch): Json<Record>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let user_id = parse_user(&user_id)?;
    let outcome =
        state
            .records
            .update(Collection::Subscriptions, &user_id, &subscription_id, patch)?;

    match outcome {
        Outcome::Applied(subscription) => {
            tracing::debug!(user_id = %user_id, subscription_id = %subscription_id, "Subscription updated");
            Ok(Json(SubscriptionResponse {
                message: "Subscription updated successfully".into(),
                subscription,
            }))
        }
        Outcome::NoCollection => Err(ApiError::NotFound("User subscriptions not found".into())),
        Outcome::NoRecord => Err(ApiError::NotFound("Subscription not found".into())),
    }
}
