use async_trait::async_trait;
use sonicly_client::RecordStoreClient;
use sonicly_core::{
    BillingRecord, PaymentMethod, PaymentMethodId, PaymentMethodPatch, Subscription,
    SubscriptionId, SubscriptionPatch, UserId,
};

use super::RecordBackend;
use crate::error::BackendResult;

/// The record store, reached over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: RecordStoreClient,
}

impl RemoteBackend {
    /// Wrap a client.
    #[must_use]
    pub fn new(client: RecordStoreClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &RecordStoreClient {
        &self.client
    }
}

#[async_trait]
impl RecordBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn subscriptions(&self, user_id: &UserId) -> BackendResult<Vec<Subscription>> {
        Ok(self.client.subscriptions(user_id).await?)
    }

    async fn insert_subscription(
        &self,
        user_id: &UserId,
        subscription: &Subscription,
    ) -> BackendResult<Subscription> {
        Ok(self.client.add_subscription(user_id, subscription).await?)
    }

    async fn update_subscription(
        &self,
        user_id: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> BackendResult<()> {
        Ok(self.client.update_subscription(user_id, id, patch).await?)
    }

    async fn payment_methods(&self, user_id: &UserId) -> BackendResult<Vec<PaymentMethod>> {
        Ok(self.client.payment_methods(user_id).await?)
    }

    async fn insert_payment_method(
        &self,
        user_id: &UserId,
        method: &PaymentMethod,
    ) -> BackendResult<PaymentMethod> {
        Ok(self.client.add_payment_method(user_id, method).await?)
    }

    async fn update_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
        patch: &PaymentMethodPatch,
    ) -> BackendResult<()> {
        Ok(self.client.update_payment_method(user_id, id, patch).await?)
    }

    async fn remove_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
    ) -> BackendResult<()> {
        Ok(self.client.remove_payment_method(user_id, id).await?)
    }

    async fn billing_history(&self, user_id: &UserId) -> BackendResult<Vec<BillingRecord>> {
        Ok(self.client.billing_history(user_id).await?)
    }

    async fn insert_billing_record(
        &self,
        user_id: &UserId,
        record: &BillingRecord,
    ) -> BackendResult<BillingRecord> {
        Ok(self.client.add_billing_record(user_id, record).await?)
    }
}
