//! Sonicly record store client.
//!
//! This crate provides a typed client for the remote record store that keeps
//! users' subscriptions, payment methods and billing history.
//!
//! Every failure (transport error, timeout, non-success status, malformed
//! payload) surfaces as [`ClientError::Unavailable`]: callers only need to know
//! that the remote store did not serve the request, not why.
//!
//! # Example
//!
//! ```no_run
//! use sonicly_client::RecordStoreClient;
//! use sonicly_core::UserId;
//!
//! # async fn example() -> Result<(), sonicly_client::ClientError> {
//! let client = RecordStoreClient::new("http://localhost:3001/api")?;
//! let user = UserId::new("user_1").unwrap();
//!
//! let subscriptions = client.subscriptions(&user).await?;
//! println!("{} subscriptions", subscriptions.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, RecordStoreClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use types::*;
