//! Subscription and billing orchestration.
//!
//! Every operation is routed by the connectivity flag: the record store first
//! while it is online (or not yet checked), the local cache otherwise. A failed
//! remote call falls back to the local cache for that same operation. After a
//! remote write succeeds the mutation is mirrored into the local cache so the
//! last-known copy survives a later outage.
//!
//! Writes made while offline stay local; nothing is replayed when the record
//! store comes back.

use std::sync::Arc;

use sonicly_client::{ClientOptions, RecordStoreClient};
use sonicly_core::{
    clock, demo_profile, sort_newest_first, BillingRecord, BillingRecordDraft, BillingSynthesizer, PaymentMethod,
    PaymentMethodDraft, PaymentMethodId, PaymentMethodPatch, Subscription, SubscriptionDraft,
    SubscriptionId, SubscriptionPatch, UserId,
};
use sonicly_store::{FileStore, LocalCache};
use tokio::sync::{broadcast, watch};

use crate::backend::{LocalBackend, RecordBackend, RemoteBackend};
use crate::config::DataServiceConfig;
use crate::connectivity::{Connectivity, ConnectivityMonitor};
use crate::error::{BackendError, BackendResult, DataError};
use crate::events::ServiceEvent;

const EVENT_CAPACITY: usize = 64;

/// Backend that accepted a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landed {
    Remote,
    Local,
}

/// UPI address used on the canonical family plan.
pub const FAMILY_PLAN_UPI_ID: &str = "family@paytm";

/// Offline-tolerant access to one user's subscriptions, payment methods and
/// billing history.
///
/// Construct one per application and share it behind an [`Arc`]. None of the
/// public operations fail: backend errors are logged and the operation
/// degrades to the local cache or to an empty result.
pub struct SubscriptionService {
    remote: Arc<dyn RecordBackend>,
    local: LocalBackend,
    monitor: Arc<ConnectivityMonitor>,
    synthesizer: BillingSynthesizer,
    user: watch::Sender<Option<UserId>>,
    events: broadcast::Sender<ServiceEvent>,
}

impl SubscriptionService {
    /// Assemble a service from its parts.
    #[must_use]
    pub fn new(
        remote: impl RecordBackend + 'static,
        local: LocalBackend,
        monitor: Arc<ConnectivityMonitor>,
    ) -> Self {
        let (user, _) = watch::channel(None);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            remote: Arc::new(remote),
            local,
            monitor,
            synthesizer: BillingSynthesizer::new(),
            user,
            events,
        }
    }

    /// Build the client, cache and monitor described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the cache directory
    /// cannot be created.
    pub fn from_config(config: &DataServiceConfig) -> Result<Self, DataError> {
        let client = RecordStoreClient::with_options(
            &config.api_url,
            ClientOptions::with_timeout(config.request_timeout()),
        )?;

        let cache = match &config.cache_dir {
            Some(dir) => LocalCache::new(FileStore::open(dir)?),
            None => {
                tracing::warn!("SONICLY_CACHE_DIR not set - local cache will not survive restarts");
                LocalCache::in_memory()
            }
        };

        let monitor = Arc::new(ConnectivityMonitor::new(
            client.clone(),
            config.check_timeout(),
        ));

        tracing::info!(api_url = %client.base_url(), "data service configured");

        Ok(Self::new(
            RemoteBackend::new(client),
            LocalBackend::new(cache),
            monitor,
        ))
    }

    /// Replace the billing history synthesizer (e.g. with a seeded RNG).
    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: BillingSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Receive change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ServiceEvent> {
        self.events.subscribe()
    }

    /// The connectivity monitor.
    #[must_use]
    pub fn monitor(&self) -> &Arc<ConnectivityMonitor> {
        &self.monitor
    }

    /// The local cache backend.
    #[must_use]
    pub fn local(&self) -> &LocalBackend {
        &self.local
    }

    /// The cached connectivity flag.
    #[must_use]
    pub fn connectivity(&self) -> Connectivity {
        self.monitor.current()
    }

    // ========================================================================
    // User scope and connectivity
    // ========================================================================

    /// Bind the user every subsequent operation applies to.
    pub fn set_current_user(&self, user_id: UserId) {
        self.bind_user(Some(user_id));
    }

    /// Unbind the current user. Reads return empty collections afterwards.
    pub fn clear_current_user(&self) {
        self.bind_user(None);
    }

    /// The bound user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserId> {
        self.user.borrow().clone()
    }

    /// Observe user changes.
    #[must_use]
    pub fn watch_user(&self) -> watch::Receiver<Option<UserId>> {
        self.user.subscribe()
    }

    /// Check the record store now.
    pub async fn check_status(&self) -> bool {
        let before = self.monitor.current();
        let online = self.monitor.check_status().await;
        let after = self.monitor.current();
        if before != after {
            self.emit(ServiceEvent::ConnectivityChanged(after));
        }
        online
    }

    /// Re-run the connectivity check.
    ///
    /// Offline writes are not replayed to the record store.
    pub async fn refresh_data(&self) -> bool {
        self.check_status().await
    }

    /// Pin the connectivity flag until the next health check.
    pub fn force_connectivity(&self, connectivity: Connectivity) {
        if self.monitor.set(connectivity) {
            self.emit(ServiceEvent::ConnectivityChanged(connectivity));
        }
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// The bound user's subscriptions.
    pub async fn subscriptions(&self) -> Vec<Subscription> {
        match self.current_user() {
            Some(user_id) => self.load_subscriptions(&user_id).await,
            None => Vec::new(),
        }
    }

    /// Create a subscription from `draft`, filling defaults.
    ///
    /// Returns the stored record, or `None` when no user is bound. A record
    /// flagged as default becomes the only default.
    pub async fn add_subscription(&self, draft: SubscriptionDraft) -> Option<Subscription> {
        let user_id = self.require_user("add_subscription")?;

        let subscription = draft.build(clock::today());
        let (created, landed) = self.store_subscription(&user_id, subscription).await;

        if created.is_default {
            self.assert_primary_subscription(&user_id, &created.id, landed)
                .await;
        }

        tracing::info!(
            user_id = %user_id,
            subscription_id = %created.id,
            plan = %created.plan_name,
            "subscription added"
        );
        self.emit(ServiceEvent::SubscriptionsChanged(user_id));
        Some(created)
    }

    /// Shallow-merge `patch` into a subscription.
    ///
    /// A patch setting `isDefault = true` clears the flag everywhere else.
    pub async fn update_subscription(&self, id: &SubscriptionId, patch: SubscriptionPatch) {
        let Some(user_id) = self.require_user("update_subscription") else {
            return;
        };

        let landed = self.patch_subscription(&user_id, id, &patch).await;

        if patch.is_default == Some(true) {
            self.assert_primary_subscription(&user_id, id, landed).await;
        }

        self.emit(ServiceEvent::SubscriptionsChanged(user_id));
    }

    /// Make `id` the only default subscription.
    pub async fn set_primary_subscription(&self, id: &SubscriptionId) {
        let Some(user_id) = self.require_user("set_primary_subscription") else {
            return;
        };

        if self
            .assert_primary_subscription(&user_id, id, self.routed())
            .await
        {
            self.emit(ServiceEvent::SubscriptionsChanged(user_id));
        }
    }

    /// Add the canonical family plan.
    pub async fn add_family_plan(&self) -> Option<Subscription> {
        self.add_subscription(SubscriptionDraft::family_yearly(FAMILY_PLAN_UPI_ID))
            .await
    }

    // ========================================================================
    // Payment methods
    // ========================================================================

    /// The bound user's payment methods.
    pub async fn payment_methods(&self) -> Vec<PaymentMethod> {
        match self.current_user() {
            Some(user_id) => self.load_payment_methods(&user_id).await,
            None => Vec::new(),
        }
    }

    /// Add a payment method.
    ///
    /// The method becomes the default when the draft asks for it or when the
    /// user has no default yet; either way it ends up the only default in the
    /// backend that stored it.
    pub async fn add_payment_method(&self, draft: PaymentMethodDraft) -> Option<PaymentMethod> {
        let user_id = self.require_user("add_payment_method")?;

        let existing = self.load_payment_methods(&user_id).await;
        let has_default = existing.iter().any(|m| m.is_default);
        let method = draft.build(has_default);
        let (created, landed) = self.store_payment_method(&user_id, method).await;

        if created.is_default {
            self.assert_default_payment_method(&user_id, &created.id, landed)
                .await;
        }

        tracing::info!(
            user_id = %user_id,
            payment_method_id = %created.id,
            kind = ?created.details.kind(),
            is_default = created.is_default,
            "payment method added"
        );
        self.emit(ServiceEvent::PaymentMethodsChanged(user_id));
        Some(created)
    }

    /// Delete a payment method. Removing the default leaves none.
    pub async fn remove_payment_method(&self, id: &PaymentMethodId) {
        let Some(user_id) = self.require_user("remove_payment_method") else {
            return;
        };

        let mut removed = false;
        if self.routes_remote() {
            match self.remote.remove_payment_method(&user_id, id).await {
                Ok(()) => {
                    removed = true;
                    self.write_through(
                        "remove_payment_method",
                        self.local.remove_payment_method(&user_id, id).await,
                    );
                }
                Err(e) => self.remote_failed("remove_payment_method", &user_id, &e),
            }
        }

        if !removed {
            if let Err(e) = self.local.remove_payment_method(&user_id, id).await {
                self.local_failed("remove_payment_method", &user_id, &e);
            }
        }

        tracing::info!(user_id = %user_id, payment_method_id = %id, "payment method removed");
        self.emit(ServiceEvent::PaymentMethodsChanged(user_id));
    }

    /// Make `id` the only default payment method.
    pub async fn set_default_payment_method(&self, id: &PaymentMethodId) {
        let Some(user_id) = self.require_user("set_default_payment_method") else {
            return;
        };

        if self
            .assert_default_payment_method(&user_id, id, self.routed())
            .await
        {
            self.emit(ServiceEvent::PaymentMethodsChanged(user_id));
        }
    }

    // ========================================================================
    // Billing history
    // ========================================================================

    /// The bound user's billing history, newest first.
    ///
    /// An empty history for a user with subscriptions is synthesized once and
    /// persisted through the normal write path. When the record store reports
    /// an empty history but the local cache holds records (e.g. synthesized
    /// earlier while remote writes were failing), the local copy is served.
    pub async fn billing_history(&self) -> Vec<BillingRecord> {
        let Some(user_id) = self.current_user() else {
            return Vec::new();
        };

        let mut records = self.load_billing_history(&user_id).await;

        if records.is_empty() && self.routes_remote() {
            records = self.local_billing_history(&user_id).await;
        }

        if records.is_empty() {
            let subscriptions = self.load_subscriptions(&user_id).await;
            if !subscriptions.is_empty() {
                records = self
                    .synthesizer
                    .synthesize(&subscriptions, clock::today());

                tracing::debug!(
                    user_id = %user_id,
                    count = records.len(),
                    "synthesized billing history"
                );

                for record in &records {
                    self.store_billing_record(&user_id, record.clone()).await;
                }
            }
        }

        sort_newest_first(&mut records);
        records
    }

    /// Record a billing entry from `draft`, filling defaults.
    pub async fn add_billing_record(&self, draft: BillingRecordDraft) -> Option<BillingRecord> {
        let user_id = self.require_user("add_billing_record")?;

        let record = draft.build(clock::today(), clock::now_millis());
        let created = self.store_billing_record(&user_id, record).await;

        tracing::info!(
            user_id = %user_id,
            billing_record_id = %created.id,
            amount = created.amount,
            "billing record added"
        );
        self.emit(ServiceEvent::BillingChanged(user_id));
        Some(created)
    }

    /// Clear the bound user's local collections. Remote data is untouched.
    pub async fn reset_data(&self) {
        let Some(user_id) = self.require_user("reset_data") else {
            return;
        };

        if let Err(e) = self.local.clear(&user_id) {
            self.local_failed("reset_data", &user_id, &e);
        }

        tracing::info!(user_id = %user_id, "local data reset");
        self.emit(ServiceEvent::SubscriptionsChanged(user_id.clone()));
        self.emit(ServiceEvent::PaymentMethodsChanged(user_id.clone()));
        self.emit(ServiceEvent::BillingChanged(user_id));
    }

    /// Seed the sample data of a demo account (`user_1` to `user_5`) into the
    /// local cache.
    ///
    /// Only a user with no stored subscriptions or payment methods is seeded;
    /// returns whether anything was written.
    pub fn seed_demo_data(&self) -> bool {
        let Some(user_id) = self.require_user("seed_demo_data") else {
            return false;
        };
        let Some(profile) = demo_profile(&user_id, clock::today(), clock::now_millis()) else {
            tracing::debug!(user_id = %user_id, "not a demo account - nothing to seed");
            return false;
        };

        match self.local.seed(&user_id, &profile) {
            Ok(true) => {
                tracing::info!(user_id = %user_id, "demo data seeded");
                self.emit(ServiceEvent::SubscriptionsChanged(user_id.clone()));
                self.emit(ServiceEvent::PaymentMethodsChanged(user_id));
                true
            }
            Ok(false) => false,
            Err(e) => {
                self.local_failed("seed_demo_data", &user_id, &e);
                false
            }
        }
    }

    // ========================================================================
    // Routing
    // ========================================================================

    fn routes_remote(&self) -> bool {
        self.monitor.current().routes_remote()
    }

    fn routed(&self) -> Landed {
        if self.routes_remote() {
            Landed::Remote
        } else {
            Landed::Local
        }
    }

    async fn load_subscriptions(&self, user_id: &UserId) -> Vec<Subscription> {
        if self.routes_remote() {
            match self.remote.subscriptions(user_id).await {
                Ok(subs) => return subs,
                Err(e) => self.remote_failed("subscriptions", user_id, &e),
            }
        }

        self.local_subscriptions(user_id).await
    }

    async fn local_subscriptions(&self, user_id: &UserId) -> Vec<Subscription> {
        self.local
            .subscriptions(user_id)
            .await
            .unwrap_or_else(|e| {
                self.local_failed("subscriptions", user_id, &e);
                Vec::new()
            })
    }

    async fn load_payment_methods(&self, user_id: &UserId) -> Vec<PaymentMethod> {
        if self.routes_remote() {
            match self.remote.payment_methods(user_id).await {
                Ok(methods) => return methods,
                Err(e) => self.remote_failed("payment_methods", user_id, &e),
            }
        }

        self.local_payment_methods(user_id).await
    }

    async fn local_payment_methods(&self, user_id: &UserId) -> Vec<PaymentMethod> {
        self.local
            .payment_methods(user_id)
            .await
            .unwrap_or_else(|e| {
                self.local_failed("payment_methods", user_id, &e);
                Vec::new()
            })
    }

    async fn load_billing_history(&self, user_id: &UserId) -> Vec<BillingRecord> {
        if self.routes_remote() {
            match self.remote.billing_history(user_id).await {
                Ok(records) => return records,
                Err(e) => self.remote_failed("billing_history", user_id, &e),
            }
        }

        self.local_billing_history(user_id).await
    }

    async fn local_billing_history(&self, user_id: &UserId) -> Vec<BillingRecord> {
        self.local
            .billing_history(user_id)
            .await
            .unwrap_or_else(|e| {
                self.local_failed("billing_history", user_id, &e);
                Vec::new()
            })
    }

    async fn store_subscription(
        &self,
        user_id: &UserId,
        subscription: Subscription,
    ) -> (Subscription, Landed) {
        if self.routes_remote() {
            match self.remote.insert_subscription(user_id, &subscription).await {
                Ok(created) => {
                    self.write_through(
                        "insert_subscription",
                        self.local.insert_subscription(user_id, &created).await,
                    );
                    return (created, Landed::Remote);
                }
                Err(e) => self.remote_failed("insert_subscription", user_id, &e),
            }
        }

        if let Err(e) = self.local.insert_subscription(user_id, &subscription).await {
            self.local_failed("insert_subscription", user_id, &e);
        }
        (subscription, Landed::Local)
    }

    async fn patch_subscription(
        &self,
        user_id: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> Landed {
        if self.routes_remote() {
            match self.remote.update_subscription(user_id, id, patch).await {
                Ok(()) => {
                    self.write_through(
                        "update_subscription",
                        self.local.update_subscription(user_id, id, patch).await,
                    );
                    return Landed::Remote;
                }
                Err(e) => self.remote_failed("update_subscription", user_id, &e),
            }
        }

        self.patch_local_subscription(user_id, id, patch).await;
        Landed::Local
    }

    async fn patch_local_subscription(
        &self,
        user_id: &UserId,
        id: &SubscriptionId,
        patch: &SubscriptionPatch,
    ) {
        if let Err(e) = self.local.update_subscription(user_id, id, patch).await {
            self.local_failed("update_subscription", user_id, &e);
        }
    }

    async fn store_payment_method(
        &self,
        user_id: &UserId,
        method: PaymentMethod,
    ) -> (PaymentMethod, Landed) {
        if self.routes_remote() {
            match self.remote.insert_payment_method(user_id, &method).await {
                Ok(created) => {
                    self.write_through(
                        "insert_payment_method",
                        self.local.insert_payment_method(user_id, &created).await,
                    );
                    return (created, Landed::Remote);
                }
                Err(e) => self.remote_failed("insert_payment_method", user_id, &e),
            }
        }

        if let Err(e) = self.local.insert_payment_method(user_id, &method).await {
            self.local_failed("insert_payment_method", user_id, &e);
        }
        (method, Landed::Local)
    }

    async fn patch_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
        patch: &PaymentMethodPatch,
    ) {
        if self.routes_remote() {
            match self.remote.update_payment_method(user_id, id, patch).await {
                Ok(()) => {
                    self.write_through(
                        "update_payment_method",
                        self.local.update_payment_method(user_id, id, patch).await,
                    );
                    return;
                }
                Err(e) => self.remote_failed("update_payment_method", user_id, &e),
            }
        }

        self.patch_local_payment_method(user_id, id, patch).await;
    }

    async fn patch_local_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
        patch: &PaymentMethodPatch,
    ) {
        if let Err(e) = self.local.update_payment_method(user_id, id, patch).await {
            self.local_failed("update_payment_method", user_id, &e);
        }
    }

    async fn store_billing_record(&self, user_id: &UserId, record: BillingRecord) -> BillingRecord {
        if self.routes_remote() {
            match self.remote.insert_billing_record(user_id, &record).await {
                Ok(created) => {
                    self.write_through(
                        "insert_billing_record",
                        self.local.insert_billing_record(user_id, &created).await,
                    );
                    return created;
                }
                Err(e) => self.remote_failed("insert_billing_record", user_id, &e),
            }
        }

        if let Err(e) = self.local.insert_billing_record(user_id, &record).await {
            self.local_failed("insert_billing_record", user_id, &e);
        }
        record
    }

    // ========================================================================
    // Primacy
    // ========================================================================

    /// Make `id` the only default subscription.
    ///
    /// `landed` names the backend holding the record. A local-only record is
    /// aligned in the local cache; a remote one is aligned remotely and then
    /// in the local copy. Returns false, changing nothing, if no backend
    /// consulted knows `id`.
    async fn assert_primary_subscription(
        &self,
        user_id: &UserId,
        id: &SubscriptionId,
        landed: Landed,
    ) -> bool {
        let known = match landed {
            Landed::Remote => {
                let routed = self.align_routed_subscriptions(user_id, id).await;
                self.align_local_subscriptions(user_id, id).await || routed
            }
            Landed::Local => self.align_local_subscriptions(user_id, id).await,
        };

        if known {
            tracing::info!(user_id = %user_id, subscription_id = %id, "primary subscription set");
        } else {
            tracing::warn!(
                user_id = %user_id,
                subscription_id = %id,
                "cannot make unknown subscription primary"
            );
        }
        known
    }

    async fn align_routed_subscriptions(&self, user_id: &UserId, id: &SubscriptionId) -> bool {
        let subscriptions = self.load_subscriptions(user_id).await;
        if !subscriptions.iter().any(|s| &s.id == id) {
            return false;
        }

        for sub in subscriptions {
            let is_primary = &sub.id == id;
            if sub.is_default != is_primary {
                self.patch_subscription(user_id, &sub.id, &SubscriptionPatch::primacy(is_primary))
                    .await;
            }
        }
        true
    }

    async fn align_local_subscriptions(&self, user_id: &UserId, id: &SubscriptionId) -> bool {
        let subscriptions = self.local_subscriptions(user_id).await;
        if !subscriptions.iter().any(|s| &s.id == id) {
            return false;
        }

        for sub in subscriptions {
            let is_primary = &sub.id == id;
            if sub.is_default != is_primary {
                self.patch_local_subscription(
                    user_id,
                    &sub.id,
                    &SubscriptionPatch::primacy(is_primary),
                )
                .await;
            }
        }
        true
    }

    /// Payment-method counterpart of [`Self::assert_primary_subscription`].
    async fn assert_default_payment_method(
        &self,
        user_id: &UserId,
        id: &PaymentMethodId,
        landed: Landed,
    ) -> bool {
        let known = match landed {
            Landed::Remote => {
                let routed = self.align_routed_payment_methods(user_id, id).await;
                self.align_local_payment_methods(user_id, id).await || routed
            }
            Landed::Local => self.align_local_payment_methods(user_id, id).await,
        };

        if known {
            tracing::info!(user_id = %user_id, payment_method_id = %id, "default payment method set");
        } else {
            tracing::warn!(
                user_id = %user_id,
                payment_method_id = %id,
                "cannot make unknown payment method default"
            );
        }
        known
    }

    async fn align_routed_payment_methods(&self, user_id: &UserId, id: &PaymentMethodId) -> bool {
        let methods = self.load_payment_methods(user_id).await;
        if !methods.iter().any(|m| &m.id == id) {
            return false;
        }

        for method in methods {
            let is_default = &method.id == id;
            if method.is_default != is_default {
                self.patch_payment_method(
                    user_id,
                    &method.id,
                    &PaymentMethodPatch::default_flag(is_default),
                )
                .await;
            }
        }
        true
    }

    async fn align_local_payment_methods(&self, user_id: &UserId, id: &PaymentMethodId) -> bool {
        let methods = self.local_payment_methods(user_id).await;
        if !methods.iter().any(|m| &m.id == id) {
            return false;
        }

        for method in methods {
            let is_default = &method.id == id;
            if method.is_default != is_default {
                self.patch_local_payment_method(
                    user_id,
                    &method.id,
                    &PaymentMethodPatch::default_flag(is_default),
                )
                .await;
            }
        }
        true
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn bind_user(&self, user_id: Option<UserId>) {
        let changed = self.user.send_if_modified(|current| {
            if *current == user_id {
                false
            } else {
                current.clone_from(&user_id);
                true
            }
        });

        if changed {
            match &user_id {
                Some(id) => tracing::info!(user_id = %id, "user bound"),
                None => tracing::info!("user unbound"),
            }
            self.emit(ServiceEvent::UserChanged(user_id));
        }
    }

    fn require_user(&self, operation: &'static str) -> Option<UserId> {
        let user_id = self.current_user();
        if user_id.is_none() {
            tracing::warn!(operation, "no user bound - ignoring");
        }
        user_id
    }

    fn emit(&self, event: ServiceEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn remote_failed(&self, operation: &'static str, user_id: &UserId, error: &BackendError) {
        tracing::warn!(
            operation,
            user_id = %user_id,
            backend = self.remote.name(),
            error = %error,
            "record store request failed - falling back to local cache"
        );
    }

    fn local_failed(&self, operation: &'static str, user_id: &UserId, error: &BackendError) {
        tracing::error!(
            operation,
            user_id = %user_id,
            backend = self.local.name(),
            error = %error,
            "local cache operation failed"
        );
    }

    #[allow(clippy::unused_self)]
    fn write_through<T>(&self, operation: &'static str, result: BackendResult<T>) {
        if let Err(e) = result {
            tracing::debug!(operation, error = %e, "local write-through skipped");
        }
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService")
            .field("user", &self.current_user())
            .field("connectivity", &self.connectivity())
            .finish_non_exhaustive()
    }
}
