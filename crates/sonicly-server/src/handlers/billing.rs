//! Billing history handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use sonicly_store::Collection;

use super::parse_user;
use crate::error::ApiError;
use crate::records::{Placement, Record};
use crate::state::AppState;

/// Response for a stored billing record.
#[derive(Debug, Serialize)]
pub struct BillingResponse {
    /// Outcome message.
    pub message: String,
    /// The stored record.
    pub billing: Record,
}

/// List a user's billing records, latest first.
pub async fn list_billing_records(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let user_id = parse_user(&user_id)?;
    Ok(Json(state.records.list(Collection::BillingHistory, &user_id)?))
}

/// Prepend a billing record.
pub async fn add_billing_record(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(record): Json<Record>,
) -> Result<Json<BillingResponse>, ApiError> {
    let user_id = parse_user(&user_id)?;
    let billing = state.records.insert(
        Collection::BillingHistory,
        &user_id,
        record,
        Placement::Front,
        &["createdAt"],
    )?;

    tracing::info!(user_id = %user_id, billing_id = ?billing.get("id"), "Billing record added");

    Ok(Json(BillingResponse {
        message: "Billing record added successfully".into(),
        billing,
    }))
}
