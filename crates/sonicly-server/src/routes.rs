//! Router configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, put};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{billing, health, not_found, payments, subscriptions, users};
use crate::state::AppState;

/// Maximum concurrent requests for record endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the server router with all routes and middleware.
///
/// # Routes
///
/// - `GET /api/health` - Health check
/// - `GET|POST /api/users/{userId}` - User profile
/// - `GET|POST /api/subscriptions/{userId}` - List / add subscriptions
/// - `PUT /api/subscriptions/{userId}/{subscriptionId}` - Update a subscription
/// - `GET|POST /api/payments/{userId}` - List / add payment methods
/// - `PUT|DELETE /api/payments/{userId}/{paymentId}` - Update / remove a payment method
/// - `GET|POST /api/billing/{userId}` - List / add billing records
///
/// Anything else answers 404 `{"error": "Endpoint not found"}`.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    let record_routes = Router::new()
        .route(
            "/users/:user_id",
            get(users::get_user).post(users::save_user),
        )
        .route(
            "/subscriptions/:user_id",
            get(subscriptions::list_subscriptions).post(subscriptions::add_subscription),
        )
        .route(
            "/subscriptions/:user_id/:subscription_id",
            put(subscriptions::update_subscription),
        )
        .route(
            "/payments/:user_id",
            get(payments::list_payment_methods).post(payments::add_payment_method),
        )
        .route(
            "/payments/:user_id/:payment_id",
            put(payments::update_payment_method).delete(payments::remove_payment_method),
        )
        .route(
            "/billing/:user_id",
            get(billing::list_billing_records).post(billing::add_billing_record),
        )
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .merge(record_routes);

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
