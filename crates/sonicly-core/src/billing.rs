//! Billing history types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::BillingRecordId;
use crate::subscription::DEFAULT_CURRENCY;

/// Outcome of a billing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    /// Charged successfully.
    Paid,
    /// Awaiting settlement.
    Pending,
    /// Charge failed.
    Failed,
}

/// A single entry in a user's billing history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    /// Record ID.
    pub id: BillingRecordId,
    /// Billing date; the display ordering key.
    pub date: NaiveDate,
    /// Amount charged.
    pub amount: f64,
    /// Currency symbol or code.
    pub currency: String,
    /// Outcome.
    pub status: BillingStatus,
    /// Plan display name.
    pub plan: String,
    /// Payment method display string.
    pub payment_method: String,
    /// Transaction reference.
    pub transaction_id: String,
    /// Link to the invoice, if one exists.
    #[serde(
        rename = "invoice_url",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub invoice_url: Option<String>,
}

/// Partial billing record input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingRecordDraft {
    /// Billing date.
    pub date: Option<NaiveDate>,
    /// Amount charged.
    pub amount: Option<f64>,
    /// Currency.
    pub currency: Option<String>,
    /// Outcome.
    pub status: Option<BillingStatus>,
    /// Plan display name.
    pub plan: Option<String>,
    /// Payment method display string.
    pub payment_method: Option<String>,
    /// Transaction reference.
    pub transaction_id: Option<String>,
    /// Invoice link.
    #[serde(rename = "invoice_url")]
    pub invoice_url: Option<String>,
}

impl BillingRecordDraft {
    /// Fill in defaults and assign a fresh ID.
    #[must_use]
    pub fn build(self, today: NaiveDate, now: DateTime<Utc>) -> BillingRecord {
        BillingRecord {
            id: BillingRecordId::generate(),
            date: self.date.unwrap_or(today),
            amount: self
                .amount
                .filter(|a| a.is_finite() && *a >= 0.0)
                .unwrap_or(0.0),
            currency: self.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            status: self.status.unwrap_or(BillingStatus::Pending),
            plan: self.plan.unwrap_or_else(|| "Unknown Plan".to_string()),
            payment_method: self
                .payment_method
                .unwrap_or_else(|| "Unknown Method".to_string()),
            transaction_id: self
                .transaction_id
                .unwrap_or_else(|| format!("TXN{}", now.timestamp_millis())),
            invoice_url: self.invoice_url,
        }
    }
}

/// Sort records by date, newest first. Records on the same date keep their order.
pub fn sort_newest_first(records: &mut [BillingRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
