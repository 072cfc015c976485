//! Payment method handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use sonicly_store::Collection;

use super::{parse_user, MessageResponse};
use crate::error::ApiError;
use crate::records::{Outcome, Placement, Record};
use crate::state::AppState;

/// Response for a stored payment method.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Outcome message.
    pub message: String,
    /// The stored payment method.
    pub payment: Record,
}

/// List a user's payment methods.
pub async fn list_payment_methods(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let user_id = parse_user(&user_id)?;
    Ok(Json(state.records.list(Collection::PaymentMethods, &user_id)?))
}

/// Append a payment method, stamping `createdAt`.
pub async fn add_payment_method(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(record): Json<Record>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let user_id = parse_user(&user_id)?;
    let payment = state.records.insert(
        Collection::PaymentMethods,
        &user_id,
        record,
        Placement::Back,
        &["createdAt"],
    )?;

    tracing::info!(user_id = %user_id, payment_id = ?payment.get("id"), "Payment method added");

    Ok(Json(PaymentResponse {
        message: "Payment method added successfully".into(),
        payment,
    }))
}

/// Merge the request body into one payment method.
pub async fn update_payment_method(
    State(state): State<Arc<AppState>>,
    Path((user_id, payment_id)): Path<(String, String)>,
    Json(patch): Json<Record>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let user_id = parse_user(&user_id)?;

    match state
        .records
        .update(Collection::PaymentMethods, &user_id, &payment_id, patch)?
    {
        Outcome::Applied(payment) => Ok(Json(PaymentResponse {
            message: "Payment method updated successfully".into(),
            payment,
        })),
        Outcome::NoCollection => Err(ApiError::NotFound("User payments not found".into())),
        Outcome::NoRecord => Err(ApiError::NotFound("Payment method not found".into())),
    }
}

/// Remove a payment method.
///
/// Removing an unknown ID succeeds; only a user with no stored payment
/// methods at all gets a 404.
pub async fn remove_payment_method(
    State(state): State<Arc<AppState>>,
    Path((user_id, payment_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = parse_user(&user_id)?;

    match state
        .records
        .remove(Collection::PaymentMethods, &user_id, &payment_id)?
    {
        Outcome::Applied(()) | Outcome::NoRecord => {
            tracing::info!(user_id = %user_id, payment_id = %payment_id, "Payment method removed");
            Ok(Json(MessageResponse {
                message: "Payment method removed successfully".into(),
            }))
        }
        Outcome::NoCollection => Err(ApiError::NotFound("User payments not found".into())),
    }
}
