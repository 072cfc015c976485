//! Billing history endpoint integration tests.

mod common;

use common::TestHarness;
use serde_json::{json, Value};

#[tokio::test]
async fn add_prepends_latest_first() {
    let harness = TestHarness::new();

    for (id, date) in [("inv_1", "2024-01-15"), ("inv_2", "2024-02-15")] {
        let response = harness
            .server
            .post(&harness.path("billing"))
            .json(&json!({ "id": id, "date": date, "amount": 199, "status": "paid" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["message"], "Billing record added successfully");
        assert_eq!(body["billing"]["id"], id);
        assert!(body["billing"]["createdAt"].is_string());
    }

    let list: Vec<Value> = harness.server.get(&harness.path("billing")).await.json();
    let ids: Vec<_> = list.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["inv_2", "inv_1"]);
}

#[tokio::test]
async fn empty_history_is_empty_list() {
    let harness = TestHarness::new();

    let response = harness.server.get(&harness.path("billing")).await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}
