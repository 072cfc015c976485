//! Sonicly subscription and billing data service.
//!
//! Keeps a user's subscriptions, payment methods and billing history
//! consistent across the remote record store and a device-local cache:
//!
//! - [`ConnectivityMonitor`] checks the record store and publishes a
//!   tri-state [`Connectivity`] flag.
//! - [`SubscriptionService`] routes every read and write to the remote store
//!   while it is reachable and falls back to the [`LocalBackend`] otherwise.
//! - [`BillingView`] republishes a [`BillingSnapshot`] whenever the service
//!   reports a change.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sonicly_core::{SubscriptionDraft, UserId};
//! use sonicly_data::{BillingView, DataServiceConfig, SubscriptionService};
//!
//! # async fn example() -> Result<(), sonicly_data::DataError> {
//! let config = DataServiceConfig::from_env();
//! let service = Arc::new(SubscriptionService::from_config(&config)?);
//! service.set_current_user(UserId::new("user_1").unwrap());
//!
//! let view = Arc::new(BillingView::new(service.clone()));
//! let _task = view.clone().spawn(config.check_interval());
//!
//! service.add_subscription(SubscriptionDraft::default()).await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod events;
pub mod service;
pub mod view;

pub use backend::{LocalBackend, RecordBackend, RemoteBackend};
pub use config::DataServiceConfig;
pub use connectivity::{Connectivity, ConnectivityMonitor, MIN_CHECK_INTERVAL};
pub use error::{BackendError, DataError};
pub use events::ServiceEvent;
pub use service::SubscriptionService;
pub use view::{BillingSnapshot, BillingView};
