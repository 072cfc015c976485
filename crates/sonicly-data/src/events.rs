//! Change notifications.

use sonicly_core::UserId;

use crate::connectivity::Connectivity;

/// Emitted by the service exactly where observable state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    /// A different user (or none) is now bound.
    UserChanged(Option<UserId>),
    /// The user's subscriptions were written.
    SubscriptionsChanged(UserId),
    /// The user's payment methods were written.
    PaymentMethodsChanged(UserId),
    /// The user's billing history was written.
    BillingChanged(UserId),
    /// A health check moved the connectivity flag.
    ConnectivityChanged(Connectivity),
}
