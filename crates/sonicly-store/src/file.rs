//! File-per-key storage backend.
//!
//! Each namespaced key is stored as `<dir>/<key>.json`. Writes go to a
//! temporary file first and are renamed into place, so a crash mid-write
//! leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sonicly_core::UserId;

use crate::error::Result;
use crate::keys;
use crate::schema::Collection;
use crate::Store;

/// A directory of JSON files, one per user collection.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open or create a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        tracing::debug!(path = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// The root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, collection: Collection, user_id: &UserId) -> PathBuf {
        self.dir
            .join(format!("{}.json", keys::namespaced_key(collection, user_id)))
    }
}

impl Store for FileStore {
    fn get(&self, collection: Collection, user_id: &UserId) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path(collection, user_id)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, collection: Collection, user_id: &UserId, value: &[u8]) -> Result<()> {
        let path = self.path(collection, user_id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, collection: Collection, user_id: &UserId) -> Result<()> {
        match fs::remove_file(self.path(collection, user_id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn file_name_follows_key_convention() {
        let (store, dir) = create_test_store();
        let user = UserId::new("user_1").unwrap();

        store.put(Collection::PaymentMethods, &user, b"[]").unwrap();

        assert!(dir
            .path()
            .join("sonicly_payment_methods_user_1.json")
            .exists());
    }

    #[test]
    fn put_get_delete() {
        let (store, _dir) = create_test_store();
        let user = UserId::new("user_1").unwrap();

        assert!(store.get(Collection::Subscriptions, &user).unwrap().is_none());

        store.put(Collection::Subscriptions, &user, b"[1]").unwrap();
        store.put(Collection::Subscriptions, &user, b"[1,2]").unwrap();
        assert_eq!(
            store.get(Collection::Subscriptions, &user).unwrap().as_deref(),
            Some(&b"[1,2]"[..])
        );

        store.delete(Collection::Subscriptions, &user).unwrap();
        store.delete(Collection::Subscriptions, &user).unwrap();
        assert!(store.get(Collection::Subscriptions, &user).unwrap().is_none());
    }

    #[test]
    fn survives_reopen() {
        let (store, dir) = create_test_store();
        let user = UserId::new("user_1").unwrap();
        store.put(Collection::BillingHistory, &user, b"[]").unwrap();
        drop(store);

        let reopened = FileStore::open(dir.path()).unwrap();
        assert!(reopened
            .get(Collection::BillingHistory, &user)
            .unwrap()
            .is_some());
    }
}
