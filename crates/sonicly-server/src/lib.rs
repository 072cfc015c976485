//! Sonicly record store HTTP API.
//!
//! A small JSON store for users' subscriptions, payment methods and billing
//! history, addressed by user ID:
//!
//! - `GET /api/health`
//! - `GET|POST /api/users/{userId}`
//! - `GET|POST /api/subscriptions/{userId}`, `PUT /api/subscriptions/{userId}/{id}`
//! - `GET|POST /api/payments/{userId}`, `PUT|DELETE /api/payments/{userId}/{id}`
//! - `GET|POST /api/billing/{userId}`
//!
//! Records are stored as opaque JSON objects. Posted records keep their `id`
//! when one is supplied; otherwise a UUID is assigned. Updates shallow-merge
//! the request body into the stored object.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Axum handlers are async by signature

pub mod config;
pub mod error;
pub mod handlers;
pub mod records;
pub mod routes;
pub mod state;

pub use config::{ServerConfig, StoreBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
