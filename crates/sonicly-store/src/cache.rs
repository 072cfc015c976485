//! Typed cache over a raw [`Store`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sonicly_core::UserId;

use crate::error::Result;
use crate::memory::MemoryStore;
use crate::schema::Collection;
use crate::Store;

/// JSON-encoded, per-user collections on top of any [`Store`] backend.
///
/// Reads of a missing entry return an empty collection, never an error, so a
/// first-time user observes a clean "no data" state.
#[derive(Clone)]
pub struct LocalCache {
    store: Arc<dyn Store>,
}

impl LocalCache {
    /// Wrap a backend.
    pub fn new(store: impl Store + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wrap an already shared backend.
    #[must_use]
    pub fn from_shared(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// A cache backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read a user's collection; missing entries read as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored value is malformed.
    pub fn read<T: DeserializeOwned>(
        &self,
        collection: Collection,
        user_id: &UserId,
    ) -> Result<Vec<T>> {
        Ok(self.get(collection, user_id)?.unwrap_or_default())
    }

    /// Replace a user's collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be encoded or the backend fails.
    pub fn write<T: Serialize>(
        &self,
        collection: Collection,
        user_id: &UserId,
        items: &[T],
    ) -> Result<()> {
        self.put(collection, user_id, items)
    }

    /// Read, modify and write back a user's collection.
    ///
    /// The closure's result is returned after the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, decoding, encoding or writing fails.
    pub fn modify<T, R>(
        &self,
        collection: Collection,
        user_id: &UserId,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut items = self.read(collection, user_id)?;
        let result = f(&mut items);
        self.write(collection, user_id, &items)?;
        Ok(result)
    }

    /// Whether anything is stored for a user's collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn contains(&self, collection: Collection, user_id: &UserId) -> Result<bool> {
        Ok(self.store.get(collection, user_id)?.is_some())
    }

    /// Read a single JSON value (used for objects rather than arrays).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored value is malformed.
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        user_id: &UserId,
    ) -> Result<Option<T>> {
        self.store
            .get(collection, user_id)?
            .map(|data| serde_json::from_slice(&data).map_err(Into::into))
            .transpose()
    }

    /// Store a single JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the backend fails.
    pub fn put<T: Serialize + ?Sized>(
        &self,
        collection: Collection,
        user_id: &UserId,
        value: &T,
    ) -> Result<()> {
        let data = serde_json::to_vec(value)?;
        self.store.put(collection, user_id, &data)
    }

    /// Remove a user's collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn clear(&self, collection: Collection, user_id: &UserId) -> Result<()> {
        self.store.delete(collection, user_id)
    }
}

impl std::fmt::Debug for LocalCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use sonicly_core::{SubscriptionDraft, Subscription};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn today() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn missing_collection_reads_empty() {
        let cache = LocalCache::in_memory();
        let subs: Vec<Subscription> = cache.read(Collection::Subscriptions, &user("new")).unwrap();
        assert!(subs.is_empty());
        assert!(!cache.contains(Collection::Subscriptions, &user("new")).unwrap());
    }

    #[test]
    fn write_then_read() {
        let cache = LocalCache::in_memory();
        let u = user("user_1");
        let sub = SubscriptionDraft::default().build(today());

        cache
            .write(Collection::Subscriptions, &u, std::slice::from_ref(&sub))
            .unwrap();

        let subs: Vec<Subscription> = cache.read(Collection::Subscriptions, &u).unwrap();
        assert_eq!(subs, vec![sub]);
    }

    #[test]
    fn users_are_isolated() {
        let cache = LocalCache::in_memory();
        let sub = SubscriptionDraft::default().build(today());

        cache
            .write(Collection::Subscriptions, &user("a"), &[sub])
            .unwrap();

        let other: Vec<Subscription> = cache.read(Collection::Subscriptions, &user("b")).unwrap();
        assert!(other.is_empty());
    }

    #[test]
    fn modify_returns_closure_result() {
        let cache = LocalCache::in_memory();
        let u = user("user_1");

        let len = cache
            .modify(Collection::Subscriptions, &u, |subs: &mut Vec<Subscription>| {
                subs.push(SubscriptionDraft::default().build(today()));
                subs.len()
            })
            .unwrap();

        assert_eq!(len, 1);
        let subs: Vec<Subscription> = cache.read(Collection::Subscriptions, &u).unwrap();
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn malformed_entry_is_a_serialization_error() {
        let store = MemoryStore::new();
        let u = user("user_1");
        store.put(Collection::Subscriptions, &u, b"{not json").unwrap();
        let cache = LocalCache::new(store);

        let result: Result<Vec<Subscription>> = cache.read(Collection::Subscriptions, &u);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn clear_removes_entry() {
        let cache = LocalCache::in_memory();
        let u = user("user_1");
        cache
            .write(Collection::PaymentMethods, &u, &[serde_json::json!({})])
            .unwrap();

        cache.clear(Collection::PaymentMethods, &u).unwrap();

        assert!(!cache.contains(Collection::PaymentMethods, &u).unwrap());
    }
}
