//! Local persistent cache for Sonicly.
//!
//! This crate holds the last-known copies of a user's subscriptions, payment
//! methods and billing history on the device, and backs the record store server.
//!
//! # Architecture
//!
//! Values are JSON arrays addressed by `(Collection, UserId)`:
//!
//! - `sonicly_subscriptions`: a user's subscriptions
//! - `sonicly_payment_methods`: a user's payment methods
//! - `sonicly_billing_history`: a user's billing records
//! - `sonicly_users`: profile objects (server side)
//!
//! Flat backends ([`MemoryStore`], [`FileStore`]) namespace keys as
//! `{collection}_{userId}`; [`RocksStore`] uses one column family per collection.
//!
//! # Example
//!
//! ```no_run
//! use sonicly_store::{Collection, FileStore, LocalCache};
//! use sonicly_core::{Subscription, UserId};
//!
//! let cache = LocalCache::new(FileStore::open("/tmp/sonicly-cache").unwrap());
//! let user = UserId::new("user_1").unwrap();
//!
//! // Missing entries read as an empty collection
//! let subs: Vec<Subscription> = cache.read(Collection::Subscriptions, &user).unwrap();
//! assert!(subs.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

pub use cache::LocalCache;
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;
pub use schema::Collection;

use sonicly_core::UserId;

/// The raw storage trait implemented by every backend.
///
/// Backends deal in bytes; [`LocalCache`] layers JSON encoding and the
/// "missing reads as empty" contract on top.
pub trait Store: Send + Sync {
    /// Get the value stored for a user's collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, collection: Collection, user_id: &UserId) -> Result<Option<Vec<u8>>>;

    /// Insert or replace the value for a user's collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn put(&self, collection: Collection, user_id: &UserId, value: &[u8]) -> Result<()>;

    /// Remove the value for a user's collection. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete(&self, collection: Collection, user_id: &UserId) -> Result<()>;
}
