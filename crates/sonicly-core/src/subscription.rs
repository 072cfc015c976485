//! Subscription types.
//!
//! A subscription is never deleted: cancelling is a status transition applied
//! through a [`SubscriptionPatch`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::ids::SubscriptionId;
use crate::payment::{PaymentKind, PaymentSnapshot};

// ============================================================================
// Constants
// ============================================================================

/// Plan name used when a draft does not provide one.
pub const DEFAULT_PLAN_NAME: &str = "New Plan";

/// Price used when a draft does not provide a usable one.
pub const DEFAULT_PRICE: f64 = 199.0;

/// Currency symbol used when a draft does not provide one.
pub const DEFAULT_CURRENCY: &str = "₹";

/// Masked card digits used for the placeholder payment snapshot.
const PLACEHOLDER_LAST4: &str = "0000";

/// Kind of plan a subscription is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    /// Single-listener premium plan.
    #[default]
    Premium,
    /// Shared family plan.
    Family,
    /// Discounted student plan.
    Student,
}

/// Billing cadence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    /// Billed every calendar month.
    #[default]
    Month,
    /// Billed every twelve calendar months.
    Year,
}

impl BillingInterval {
    /// Number of calendar months in one billing period.
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::Month => 1,
            Self::Year => 12,
        }
    }

    /// The next billing date one period after `from`.
    #[must_use]
    pub fn next_billing(self, from: NaiveDate) -> NaiveDate {
        clock::add_months(from, self.months())
    }
}

/// Status of a subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is active.
    #[default]
    Active,
    /// Temporarily paused by the user.
    Paused,
    /// Cancelled; kept for history.
    Cancelled,
}

/// A user's subscription to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Display name of the plan.
    pub plan_name: String,
    /// Kind of plan.
    pub plan_type: PlanType,
    /// Price per interval (non-negative).
    pub price: f64,
    /// Currency symbol or code.
    pub currency: String,
    /// Billing cadence.
    pub interval: BillingInterval,
    /// Current status.
    pub status: SubscriptionStatus,
    /// Next billing date.
    pub next_billing: NaiveDate,
    /// Whether this is the user's primary subscription.
    pub is_default: bool,
    /// Display-only feature list.
    #[serde(default)]
    pub features: Vec<String>,
    /// Date the subscription started.
    pub start_date: NaiveDate,
    /// Denormalized copy of the payment method at subscription time.
    pub payment_method: PaymentSnapshot,
}

impl Subscription {
    /// Check if the subscription is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// Partial subscription input; missing fields are filled by [`SubscriptionDraft::build`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionDraft {
    /// Plan display name.
    pub plan_name: Option<String>,
    /// Kind of plan.
    pub plan_type: Option<PlanType>,
    /// Price per interval.
    pub price: Option<f64>,
    /// Currency symbol or code.
    pub currency: Option<String>,
    /// Billing cadence.
    pub interval: Option<BillingInterval>,
    /// Initial status.
    pub status: Option<SubscriptionStatus>,
    /// Explicit next billing date.
    pub next_billing: Option<NaiveDate>,
    /// Whether the new subscription should become primary.
    pub is_default: Option<bool>,
    /// Feature list.
    pub features: Option<Vec<String>>,
    /// Explicit start date.
    pub start_date: Option<NaiveDate>,
    /// Payment snapshot.
    pub payment_method: Option<PaymentSnapshot>,
}

impl SubscriptionDraft {
    /// Fill in defaults and assign a fresh ID.
    ///
    /// `nextBilling` defaults to one interval after `today`; a negative or
    /// non-finite price is treated as missing.
    #[must_use]
    pub fn build(self, today: NaiveDate) -> Subscription {
        let interval = self.interval.unwrap_or_default();
        Subscription {
            id: SubscriptionId::generate(),
            plan_name: self.plan_name.unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string()),
            plan_type: self.plan_type.unwrap_or_default(),
            price: self
                .price
                .filter(|p| p.is_finite() && *p >= 0.0)
                .unwrap_or(DEFAULT_PRICE),
            currency: self.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            interval,
            status: self.status.unwrap_or_default(),
            next_billing: self
                .next_billing
                .unwrap_or_else(|| interval.next_billing(today)),
            is_default: self.is_default.unwrap_or(false),
            features: self.features.unwrap_or_default(),
            start_date: self.start_date.unwrap_or(today),
            payment_method: self.payment_method.unwrap_or_else(|| PaymentSnapshot {
                kind: PaymentKind::Card,
                last4: Some(PLACEHOLDER_LAST4.to_string()),
                upi_id: None,
                brand: None,
            }),
        }
    }

    /// The canonical "Family Yearly" plan offered as an upgrade.
    #[must_use]
    pub fn family_yearly(upi_id: impl Into<String>) -> Self {
        Self {
            plan_name: Some("Family Yearly".to_string()),
            plan_type: Some(PlanType::Family),
            price: Some(2990.0),
            interval: Some(BillingInterval::Year),
            status: Some(SubscriptionStatus::Active),
            is_default: Some(false),
            features: Some(
                [
                    "Everything in Premium",
                    "Up to 6 family members",
                    "Individual profiles",
                    "Parental controls",
                    "Family mix playlists",
                    "Shared favorites",
                ]
                .map(String::from)
                .to_vec(),
            ),
            payment_method: Some(PaymentSnapshot::upi(upi_id)),
            ..Self::default()
        }
    }
}

/// Shallow-merge patch for a subscription.
///
/// Absent fields are left untouched and omitted from the wire body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionPatch {
    /// New plan display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// New plan kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
    /// New price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// New interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<BillingInterval>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    /// New next billing date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_billing: Option<NaiveDate>,
    /// New primacy flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Replacement feature list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// New start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Replacement payment snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentSnapshot>,
}

impl SubscriptionPatch {
    /// A patch that only sets the primacy flag.
    #[must_use]
    pub fn primacy(is_default: bool) -> Self {
        Self {
            is_default: Some(is_default),
            ..Self::default()
        }
    }

    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: SubscriptionStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merge the present fields onto `subscription`.
    pub fn apply(&self, subscription: &mut Subscription) {
        if let Some(v) = &self.plan_name {
            subscription.plan_name.clone_from(v);
        }
        if let Some(v) = self.plan_type {
            subscription.plan_type = v;
        }
        if let Some(v) = self.price.filter(|p| p.is_finite() && *p >= 0.0) {
            subscription.price = v;
        }
        if let Some(v) = &self.currency {
            subscription.currency.clone_from(v);
        }
        if let Some(v) = self.interval {
            subscription.interval = v;
        }
        if let Some(v) = self.status {
            subscription.status = v;
        }
        if let Some(v) = self.next_billing {
            subscription.next_billing = v;
        }
        if let Some(v) = self.is_default {
            subscription.is_default = v;
        }
        if let Some(v) = &self.features {
            subscription.features.clone_from(v);
        }
        if let Some(v) = self.start_date {
            subscription.start_date = v;
        }
        if let Some(v) = &self.payment_method {
            subscription.payment_method = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn build_fills_defaults() {
        let today = date(2025, 3, 10);
        let sub = SubscriptionDraft::default().build(today);

        assert!(sub.id.as_str().starts_with("sub_"));
        assert_eq!(sub.plan_name, DEFAULT_PLAN_NAME);
        assert_eq!(sub.plan_type, PlanType::Premium);
        assert!((sub.price - DEFAULT_PRICE).abs() < f64::EPSILON);
        assert_eq!(sub.currency, DEFAULT_CURRENCY);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.next_billing, date(2025, 4, 10));
        assert_eq!(sub.start_date, today);
        assert!(!sub.is_default);
        assert_eq!(sub.payment_method.last4.as_deref(), Some("0000"));
    }

    #[test]
    fn yearly_next_billing_is_twelve_months_out() {
        let draft = SubscriptionDraft {
            interval: Some(BillingInterval::Year),
            ..SubscriptionDraft::default()
        };
        assert_eq!(draft.build(date(2025, 3, 10)).next_billing, date(2026, 3, 10));
    }

    #[test]
    fn zero_price_is_kept_negative_is_replaced() {
        let free = SubscriptionDraft {
            price: Some(0.0),
            ..SubscriptionDraft::default()
        };
        assert!(free.build(date(2025, 1, 1)).price.abs() < f64::EPSILON);

        let negative = SubscriptionDraft {
            price: Some(-5.0),
            ..SubscriptionDraft::default()
        };
        assert!((negative.build(date(2025, 1, 1)).price - DEFAULT_PRICE).abs() < f64::EPSILON);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut sub = SubscriptionDraft::default().build(date(2025, 1, 1));
        let original_name = sub.plan_name.clone();

        SubscriptionPatch::status(SubscriptionStatus::Cancelled).apply(&mut sub);

        assert_eq!(sub.status, SubscriptionStatus::Cancelled);
        assert_eq!(sub.plan_name, original_name);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let json = serde_json::to_value(SubscriptionPatch::primacy(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "isDefault": true }));
    }

    #[test]
    fn subscription_wire_shape() {
        let json = serde_json::json!({
            "id": "sub_premium_monthly",
            "planName": "Premium Monthly",
            "planType": "premium",
            "price": 199,
            "currency": "₹",
            "interval": "month",
            "status": "active",
            "nextBilling": "2025-04-10",
            "isDefault": true,
            "features": ["No advertisements"],
            "startDate": "2025-01-10",
            "paymentMethod": { "type": "card", "last4": "4242", "brand": "Visa" },
            "createdAt": "2025-01-10T00:00:00.000Z"
        });

        let sub: Subscription = serde_json::from_value(json).unwrap();
        assert_eq!(sub.plan_type, PlanType::Premium);
        assert!(sub.is_default);
        assert_eq!(sub.payment_method.brand.as_deref(), Some("Visa"));
    }
}
