//! In-process storage backend.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use sonicly_core::UserId;

use crate::error::Result;
use crate::keys;
use crate::schema::Collection;
use crate::Store;

/// A `HashMap`-backed store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for MemoryStore {
    fn get(&self, collection: Collection, user_id: &UserId) -> Result<Option<Vec<u8>>> {
        let key = keys::namespaced_key(collection, user_id);
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned())
    }

    fn put(&self, collection: Collection, user_id: &UserId, value: &[u8]) -> Result<()> {
        let key = keys::namespaced_key(collection, user_id);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value.to_vec());
        Ok(())
    }

    fn delete(&self, collection: Collection, user_id: &UserId) -> Result<()> {
        let key = keys::namespaced_key(collection, user_id);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let store = MemoryStore::new();
        let user = UserId::new("user_1").unwrap();

        store.put(Collection::Subscriptions, &user, b"[]").unwrap();
        assert_eq!(
            store.get(Collection::Subscriptions, &user).unwrap().as_deref(),
            Some(&b"[]"[..])
        );
        assert_eq!(store.len(), 1);

        store.delete(Collection::Subscriptions, &user).unwrap();
        assert!(store.get(Collection::Subscriptions, &user).unwrap().is_none());
        assert!(store.is_empty());

        // Deleting again is fine
        store.delete(Collection::Subscriptions, &user).unwrap();
    }
}
