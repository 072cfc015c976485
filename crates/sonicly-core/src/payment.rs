//! Payment method types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::ids::PaymentMethodId;

/// Kind of payment instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Credit or debit card.
    Card,
    /// UPI virtual payment address.
    Upi,
    /// Direct bank transfer.
    BankTransfer,
}

/// Card payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card network (e.g. "visa").
    pub brand: String,
    /// Last four digits.
    pub last4: String,
    /// Expiry month (1-12).
    pub exp_month: u8,
    /// Expiry year.
    pub exp_year: u16,
}

/// UPI payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpiDetails {
    /// Virtual payment address (e.g. "name@bank").
    pub vpa: String,
}

/// Bank transfer payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    /// Last four digits of the account number.
    pub last4: String,
    /// IFSC branch code.
    pub ifsc: String,
}

/// Type-specific payload of a payment method.
///
/// On the wire this is `{"type": "card", "card": {...}}` and so on, flattened
/// into the enclosing [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentDetails {
    /// Card payment.
    Card {
        /// Card payload.
        card: CardDetails,
    },
    /// UPI payment.
    Upi {
        /// UPI payload.
        upi: UpiDetails,
    },
    /// Bank transfer.
    BankTransfer {
        /// Bank payload.
        bank: BankDetails,
    },
}

impl PaymentDetails {
    /// The instrument kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> PaymentKind {
        match self {
            Self::Card { .. } => PaymentKind::Card,
            Self::Upi { .. } => PaymentKind::Upi,
            Self::BankTransfer { .. } => PaymentKind::BankTransfer,
        }
    }
}

/// A stored payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Payment method ID.
    pub id: PaymentMethodId,
    /// Type-specific payload.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Whether this is the user's default method.
    #[serde(rename = "isDefault")]
    pub is_default: bool,
    /// Creation time (epoch milliseconds on the wire).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created: DateTime<Utc>,
}

/// Input for adding a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodDraft {
    /// Type-specific payload.
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Explicit default flag.
    #[serde(rename = "isDefault", default)]
    pub is_default: Option<bool>,
}

impl PaymentMethodDraft {
    /// Draft for a card.
    #[must_use]
    pub fn card(card: CardDetails) -> Self {
        Self {
            details: PaymentDetails::Card { card },
            is_default: None,
        }
    }

    /// Draft for a UPI address.
    #[must_use]
    pub fn upi(vpa: impl Into<String>) -> Self {
        Self {
            details: PaymentDetails::Upi {
                upi: UpiDetails { vpa: vpa.into() },
            },
            is_default: None,
        }
    }

    /// Build the stored method.
    ///
    /// When the user has no default method yet the new one becomes the default
    /// regardless of the draft's flag.
    #[must_use]
    pub fn build(self, has_default: bool) -> PaymentMethod {
        PaymentMethod {
            id: PaymentMethodId::generate(),
            details: self.details,
            is_default: self.is_default.unwrap_or(false) || !has_default,
            created: clock::now_millis(),
        }
    }
}

/// Shallow-merge patch for a payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodPatch {
    /// New default flag.
    #[serde(rename = "isDefault", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl PaymentMethodPatch {
    /// A patch that only sets the default flag.
    #[must_use]
    pub fn default_flag(is_default: bool) -> Self {
        Self {
            is_default: Some(is_default),
        }
    }

    /// Merge the present fields onto `method`.
    pub fn apply(&self, method: &mut PaymentMethod) {
        if let Some(v) = self.is_default {
            method.is_default = v;
        }
    }
}

/// Denormalized payment summary stored on a subscription.
///
/// This is a display copy, not a reference: it is never reconciled with the
/// live [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSnapshot {
    /// Instrument kind.
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    /// Masked card or account digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    /// UPI address.
    #[serde(rename = "upiId", default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
    /// Card brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl PaymentSnapshot {
    /// Snapshot for a UPI address.
    #[must_use]
    pub fn upi(upi_id: impl Into<String>) -> Self {
        Self {
            kind: PaymentKind::Upi,
            last4: None,
            upi_id: Some(upi_id.into()),
            brand: None,
        }
    }

    /// Snapshot for a card.
    #[must_use]
    pub fn card(brand: impl Into<String>, last4: impl Into<String>) -> Self {
        Self {
            kind: PaymentKind::Card,
            last4: Some(last4.into()),
            upi_id: None,
            brand: Some(brand.into()),
        }
    }

    /// Human-readable label, e.g. `Visa ****4242` or `UPI: name@bank`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            PaymentKind::Card => format!(
                "{} ****{}",
                self.brand.as_deref().unwrap_or("Unknown"),
                self.last4.as_deref().unwrap_or("0000")
            ),
            PaymentKind::Upi => format!("UPI: {}", self.upi_id.as_deref().unwrap_or("Unknown")),
            PaymentKind::BankTransfer => {
                format!("Bank ****{}", self.last4.as_deref().unwrap_or("0000"))
            }
        }
    }
}

impl From<&PaymentMethod> for PaymentSnapshot {
    fn from(method: &PaymentMethod) -> Self {
        match &method.details {
            PaymentDetails::Card { card } => Self {
                kind: PaymentKind::Card,
                last4: Some(card.last4.clone()),
                upi_id: None,
                brand: Some(card.brand.clone()),
            },
            PaymentDetails::Upi { upi } => Self::upi(upi.vpa.clone()),
            PaymentDetails::BankTransfer { bank } => Self {
                kind: PaymentKind::BankTransfer,
                last4: Some(bank.last4.clone()),
                upi_id: None,
                brand: None,
            },
        }
    }
}
