use async_trait::async_trait;
use sonicly_core::{
    BillingRecord, DemoProfile, PaymentMethod, PaymentMethodId, PaymentMethodPatch, Subscription,
    SubscriptionId, SubscriptionPatch, UserId,
};
use sonicly_store::{Collection, LocalCache};

use super::RecordBackend;
use crate::error::{BackendError, BackendResult};

/// The device-local cache.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    cache: LocalCache,
}

impl LocalBackend {
    /// Wrap a cache.
    #[must_use]
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    /// The underlying cache.
    #[must_use]
    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Drop every collection stored for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the first cache failure; earlier collections stay cleared.
    pub fn clear(&self, user_id: &UserId) -> BackendResult<()> {
        for collection in [
            Collection::Subscriptions,
            Collection::PaymentMethods,
            Collection::BillingHistory,
        ] {
            self.cache.clear(collection, user_id)?;
        }
        Ok(())
    }

    /// Write `profile` for a user whose subscriptions and payment methods were
    /// never stored. Returns false, writing nothing, otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read or written.
    pub fn seed(&self, user_id: &UserId, profile: &DemoProfile) -> BackendResult<bool> {
        if self.cache.contains(Collection::Subscriptions, user_id)?
            || self.cache.contains(Collection::PaymentMethods, user_id)?
        {
            return Ok(false);
        }

        self.cache
            .write(Collection::Subscriptions, user_id, &profile.subscriptions)?;
        self.cache
            .write(Collection::PaymentMethods, user_id, &profile.payment_methods)?;
        Ok(true)
    }
}

#[async_trait]
impl RecordBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn subscriptions(&self, user_id: &UserId) -> BackendResult<Vec<Subscription>> {
        Ok(self.cache.read(Collection::Subscriptions, user_id)?)
    }

    async fn insert_subscription(
        &self,
        user_id: &UserId,
        subscription: &Subscription,
    ) -> BackendResult<Subscription> {
        self.cache
            .modify(Collection::Subscriptions, user_id, |subs: &mut Vec<Subscription>| {
                subs.push(subscription.clone());
            })?;
        Ok(subscription.clone())
    }

    async fn update_subscription(
        &self,
        user_id: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> BackendResult<()> {
        let found = self
            .cache
            .modify(Collection::Subscriptions, user_id, |subs: &mut Vec<Subscription>| {
                subs.iter_mut()
                    .find(|s| &s.id == id)
                    .map(|s| patch.apply(s))
                    .is_some()
            })?;

        if found {
            Ok(())
        } else {
            Err(BackendError::NotFound {
                kind: "subscription",
                id: id.to_string(),
            })
        }
    }

    async fn payment_methods(&self, user_id: &UserId) -> BackendResult<Vec<PaymentMethod>> {
        Ok(self.cache.read(Collection::PaymentMethods, user_id)?)
    }

    async fn insert_payment_method(
        &self,
        user_id: &UserId,
        method: &PaymentMethod,
    ) -> BackendResult<PaymentMethod> {
        self.cache
            .modify(Collection::PaymentMethods, user_id, |methods: &mut Vec<PaymentMethod>| {
                methods.push(method.clone());
            })?;
        Ok(method.clone())
    }

    async fn update_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
        patch: &PaymentMethodPatch,
    ) -> BackendResult<()> {
        let found = self
            .cache
            .modify(Collection::PaymentMethods, user_id, |methods: &mut Vec<PaymentMethod>| {
                methods
                    .iter_mut()
                    .find(|m| &m.id == id)
                    .map(|m| patch.apply(m))
                    .is_some()
            })?;

        if found {
            Ok(())
        } else {
            Err(BackendError::NotFound {
                kind: "payment method",
                id: id.to_string(),
            })
        }
    }

    async fn remove_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
    ) -> BackendResult<()> {
        self.cache
            .modify(Collection::PaymentMethods, user_id, |methods: &mut Vec<PaymentMethod>| {
                methods.retain(|m| &m.id != id);
            })?;
        Ok(())
    }

    async fn billing_history(&self, user_id: &UserId) -> BackendResult<Vec<BillingRecord>> {
        Ok(self.cache.read(Collection::BillingHistory, user_id)?)
    }

    async fn insert_billing_record(
        &self,
        user_id: &UserId,
        record: &BillingRecord,
    ) -> BackendResult<BillingRecord> {
        self.cache
            .modify(Collection::BillingHistory, user_id, |records: &mut Vec<BillingRecord>| {
                records.insert(0, record.clone());
            })?;
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sonicly_core::{PaymentMethodDraft, SubscriptionDraft};

    fn backend() -> LocalBackend {
        LocalBackend::new(LocalCache::in_memory())
    }

    fn user() -> UserId {
        UserId::new("user_1").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[tokio::test]
    async fn update_merges_into_existing_subscription() {
        let backend = backend();
        let sub = SubscriptionDraft::default().build(today());
        backend.insert_subscription(&user(), &sub).await.unwrap();

        backend
            .update_subscription(&user(), &sub.id, &SubscriptionPatch::primacy(true))
            .await
            .unwrap();

        let subs = backend.subscriptions(&user()).await.unwrap();
        assert!(subs[0].is_default);
        assert_eq!(subs[0].plan_name, sub.plan_name);
    }

    #[tokio::test]
    async fn update_of_unknown_subscription_is_not_found() {
        let backend = backend();
        let id = SubscriptionId::new("sub_missing").unwrap();

        let err = backend
            .update_subscription(&user(), &id, &SubscriptionPatch::primacy(true))
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::NotFound { kind: "subscription", .. }));
    }

    #[tokio::test]
    async fn remove_of_unknown_method_is_a_no_op() {
        let backend = backend();
        let method = PaymentMethodDraft::upi("me@bank").build(false);
        backend.insert_payment_method(&user(), &method).await.unwrap();

        let other = PaymentMethodId::new("pm_other").unwrap();
        backend.remove_payment_method(&user(), &other).await.unwrap();

        assert_eq!(backend.payment_methods(&user()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_empties_every_collection() {
        let backend = backend();
        let sub = SubscriptionDraft::default().build(today());
        let method = PaymentMethodDraft::upi("me@bank").build(false);
        backend.insert_subscription(&user(), &sub).await.unwrap();
        backend.insert_payment_method(&user(), &method).await.unwrap();

        backend.clear(&user()).unwrap();

        assert!(backend.subscriptions(&user()).await.unwrap().is_empty());
        assert!(backend.payment_methods(&user()).await.unwrap().is_empty());
        assert!(backend.billing_history(&user()).await.unwrap().is_empty());
    }
}
