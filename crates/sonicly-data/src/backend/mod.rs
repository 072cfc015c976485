//! The read/write capability shared by the remote store and the local cache.

mod local;
mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

use async_trait::async_trait;
use sonicly_core::{
    BillingRecord, PaymentMethod, PaymentMethodId, PaymentMethodPatch, Subscription,
    SubscriptionId, SubscriptionPatch, UserId,
};

use crate::error::BackendResult;

/// Per-user record storage.
///
/// Inserts return the record as the backend stored it.
#[async_trait]
pub trait RecordBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// List subscriptions.
    async fn subscriptions(&self, user_id: &UserId) -> BackendResult<Vec<Subscription>>;

    /// Append a subscription.
    async fn insert_subscription(
        &self,
        user_id: &UserId,
        subscription: &Subscription,
    ) -> BackendResult<Subscription>;

    /// Shallow-merge a patch into a subscription.
    async fn update_subscription(
        &self,
        user_id: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> BackendResult<()>;

    /// List payment methods.
    async fn payment_methods(&self, user_id: &UserId) -> BackendResult<Vec<PaymentMethod>>;

    /// Append a payment method.
    async fn insert_payment_method(
        &self,
        user_id: &UserId,
        method: &PaymentMethod,
    ) -> BackendResult<PaymentMethod>;

    /// Shallow-merge a patch into a payment method.
    async fn update_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
        patch: &PaymentMethodPatch,
    ) -> BackendResult<()>;

    /// Hard-delete a payment method.
    async fn remove_payment_method(&self, user_id: &UserId, id: &PaymentMethodId)
        -> BackendResult<()>;

    /// List billing records in storage order.
    async fn billing_history(&self, user_id: &UserId) -> BackendResult<Vec<BillingRecord>>;

    /// Store a billing record.
    async fn insert_billing_record(
        &self,
        user_id: &UserId,
        record: &BillingRecord,
    ) -> BackendResult<BillingRecord>;
}
