//! Presentation-facing snapshot of the bound user's data.

use std::sync::Arc;
use std::time::Duration;

use sonicly_core::{BillingRecord, PaymentMethod, Subscription, UserId};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::connectivity::{check_ticker, Connectivity};
use crate::service::SubscriptionService;

/// Everything the subscription screens render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillingSnapshot {
    /// The bound user.
    pub user: Option<UserId>,
    /// The user's subscriptions.
    pub subscriptions: Vec<Subscription>,
    /// The user's payment methods.
    pub payment_methods: Vec<PaymentMethod>,
    /// The user's billing history, newest first.
    pub billing_history: Vec<BillingRecord>,
    /// Connectivity when the snapshot was taken.
    pub connectivity: Connectivity,
}

impl BillingSnapshot {
    /// The subscription flagged as default, if any.
    #[must_use]
    pub fn primary_subscription(&self) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.is_default)
    }

    /// The payment method flagged as default, if any.
    #[must_use]
    pub fn default_payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.is_default)
    }
}

/// Keeps a [`BillingSnapshot`] current by reacting to [`ServiceEvent`]s.
///
/// [`ServiceEvent`]: crate::ServiceEvent
#[derive(Debug)]
pub struct BillingView {
    service: Arc<SubscriptionService>,
    snapshot: watch::Sender<BillingSnapshot>,
}

impl BillingView {
    /// Create a view holding an empty snapshot.
    #[must_use]
    pub fn new(service: Arc<SubscriptionService>) -> Self {
        let (snapshot, _) = watch::channel(BillingSnapshot::default());
        Self { service, snapshot }
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BillingSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Observe snapshot updates.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<BillingSnapshot> {
        self.snapshot.subscribe()
    }

    /// Re-pull all three collections concurrently and publish the result.
    pub async fn refresh(&self) {
        let user = self.service.current_user();

        let (subscriptions, payment_methods, billing_history) = futures::join!(
            self.service.subscriptions(),
            self.service.payment_methods(),
            self.service.billing_history(),
        );

        self.snapshot.send_replace(BillingSnapshot {
            user,
            subscriptions,
            payment_methods,
            billing_history,
            connectivity: self.service.connectivity(),
        });
    }

    /// Refresh now, then on every service event, and check connectivity every
    /// `check_interval` (at least [`MIN_CHECK_INTERVAL`](crate::connectivity::MIN_CHECK_INTERVAL)).
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn(self: Arc<Self>, check_interval: Duration) -> JoinHandle<()> {
        let mut events = self.service.subscribe();

        tokio::spawn(async move {
            let mut ticker = check_ticker(check_interval);

            self.refresh().await;

            loop {
                tokio::select! {
                    event = events.recv() => match event {
                        Ok(event) => {
                            tracing::trace!(?event, "refreshing billing view");
                            self.refresh().await;
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "billing view lagged behind events");
                            self.refresh().await;
                        }
                        Err(RecvError::Closed) => break,
                    },
                    _ = ticker.tick() => {
                        self.service.check_status().await;
                    }
                }
            }
        })
    }
}
