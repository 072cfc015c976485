//! Billing view integration tests.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::TestHarness;
use sonicly_core::{PaymentMethodDraft, SubscriptionDraft};
use sonicly_data::{BillingView, Connectivity};

#[tokio::test]
async fn refresh_pulls_all_collections() {
    let harness = TestHarness::offline();
    let sub = harness
        .service
        .add_subscription(SubscriptionDraft {
            is_default: Some(true),
            ..SubscriptionDraft::default()
        })
        .await
        .unwrap();
    let method = harness
        .service
        .add_payment_method(PaymentMethodDraft::upi("me@bank"))
        .await
        .unwrap();

    let view = BillingView::new(harness.service.clone());
    view.refresh().await;

    let snapshot = view.snapshot();
    assert_eq!(snapshot.user.as_ref(), Some(&harness.user));
    assert_eq!(snapshot.subscriptions, vec![sub.clone()]);
    assert_eq!(snapshot.payment_methods, vec![method.clone()]);
    assert!(snapshot.billing_history.is_empty());
    assert_eq!(snapshot.connectivity, Connectivity::Offline);
    assert_eq!(snapshot.primary_subscription(), Some(&sub));
    assert_eq!(snapshot.default_payment_method(), Some(&method));
}

#[tokio::test]
async fn spawned_view_follows_service_changes() {
    let harness = TestHarness::offline();
    let view = Arc::new(BillingView::new(harness.service.clone()));
    let mut rx = view.watch();
    let task = view.clone().spawn(Duration::from_secs(3600));

    harness
        .service
        .add_subscription(SubscriptionDraft::default())
        .await
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        while rx.borrow_and_update().subscriptions.is_empty() {
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("view should pick up the new subscription");

    harness.service.clear_current_user();

    tokio::time::timeout(Duration::from_secs(5), async {
        while rx.borrow_and_update().user.is_some() {
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("view should drop the unbound user's data");

    assert!(view.snapshot().subscriptions.is_empty());
    task.abort();
}

#[tokio::test]
async fn zero_check_interval_does_not_stop_the_view() {
    let harness = TestHarness::offline();
    let view = Arc::new(BillingView::new(harness.service.clone()));
    let mut rx = view.watch();
    let task = view.clone().spawn(Duration::ZERO);

    tokio::time::timeout(Duration::from_secs(5), async {
        while rx.borrow_and_update().user.is_none() {
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("view should publish its first snapshot");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!task.is_finished());
    task.abort();
}
