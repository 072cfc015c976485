//! Health endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

#[tokio::test]
async fn health_check_returns_ok() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Sonicly Server is running!");
    assert_eq!(body["port"], 3001);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_endpoint_returns_not_found() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/nothing/here").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Endpoint not found" }));
}

#[tokio::test]
async fn invalid_user_id_is_rejected() {
    let harness = TestHarness::new();

    let response = harness.server.get("/api/subscriptions/bad%20id").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
