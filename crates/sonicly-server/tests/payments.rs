//! Payment method endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

async fn add(harness: &TestHarness, body: Value) -> Value {
    let response = harness
        .server
        .post(&harness.path("payments"))
        .json(&body)
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn add_stamps_created_at_only() {
    let harness = TestHarness::new();

    let body = add(
        &harness,
        json!({ "id": "pm_1", "type": "upi", "upiId": "me@bank", "isDefault": true, "created": 1 }),
    )
    .await;

    assert_eq!(body["message"], "Payment method added successfully");
    assert_eq!(body["payment"]["id"], "pm_1");
    assert_eq!(body["payment"]["upiId"], "me@bank");
    assert!(body["payment"]["createdAt"].is_string());
    assert!(body["payment"].get("updatedAt").is_none());
}

#[tokio::test]
async fn update_moves_default_flag() {
    let harness = TestHarness::new();
    add(&harness, json!({ "id": "pm_1", "isDefault": true })).await;
    add(&harness, json!({ "id": "pm_2", "isDefault": false })).await;

    for (id, flag) in [("pm_1", false), ("pm_2", true)] {
        harness
            .server
            .put(&format!("{}/{id}", harness.path("payments")))
            .json(&json!({ "isDefault": flag }))
            .await
            .assert_status_ok();
    }

    let list: Vec<Value> = harness.server.get(&harness.path("payments")).await.json();
    let defaults: Vec<_> = list
        .iter()
        .filter(|m| m["isDefault"] == true)
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(defaults, ["pm_2"]);
}

#[tokio::test]
async fn update_unknown_method_is_not_found() {
    let harness = TestHarness::new();
    add(&harness, json!({ "id": "pm_1" })).await;

    let response = harness
        .server
        .put(&format!("{}/pm_9", harness.path("payments")))
        .json(&json!({ "isDefault": true }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Payment method not found" }));
}

#[tokio::test]
async fn delete_removes_method() {
    let harness = TestHarness::new();
    add(&harness, json!({ "id": "pm_1" })).await;
    add(&harness, json!({ "id": "pm_2" })).await;

    let response = harness
        .server
        .delete(&format!("{}/pm_1", harness.path("payments")))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Payment method removed successfully" }));

    let list: Vec<Value> = harness.server.get(&harness.path("payments")).await.json();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "pm_2");
}

#[tokio::test]
async fn delete_unknown_id_still_succeeds() {
    let harness = TestHarness::new();
    add(&harness, json!({ "id": "pm_1" })).await;

    harness
        .server
        .delete(&format!("{}/pm_9", harness.path("payments")))
        .await
        .assert_status_ok();

    let list: Vec<Value> = harness.server.get(&harness.path("payments")).await.json();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn delete_for_user_without_methods_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .delete(&format!("{}/pm_1", harness.path("payments")))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "User payments not found" }));
}
