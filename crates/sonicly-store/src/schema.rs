//! Collection definitions.
//!
//! Each collection maps to a key prefix in the flat backends and to a column
//! family in `RocksDB`.

use std::fmt;

/// A logical per-user collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Subscriptions, a JSON array.
    Subscriptions,
    /// Payment methods, a JSON array.
    PaymentMethods,
    /// Billing records, a JSON array kept newest first.
    BillingHistory,
    /// User profile, a JSON object (record store server only).
    Users,
}

impl Collection {
    /// All collections, for backend initialization.
    pub const ALL: [Self; 4] = [
        Self::Subscriptions,
        Self::PaymentMethods,
        Self::BillingHistory,
        Self::Users,
    ];

    /// Storage name of the collection.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Subscriptions => "sonicly_subscriptions",
            Self::PaymentMethods => "sonicly_payment_methods",
            Self::BillingHistory => "sonicly_billing_history",
            Self::Users => "sonicly_users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    Collection::ALL.iter().map(|c| c.name()).collect()
}
