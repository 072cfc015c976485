//! `RocksDB` storage implementation.
//!
//! Each [`Collection`] is a column family keyed by user ID.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};

use sonicly_core::UserId;

use crate::error::{Result, StoreError};
use crate::schema::{all_column_families, Collection};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a column family handle.
    fn cf(&self, collection: Collection) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(collection.name())
            .ok_or_else(|| StoreError::Database(format!("column family not found: {collection}")))
    }
}

impl Store for RocksStore {
    fn get(&self, collection: Collection, user_id: &UserId) -> Result<Option<Vec<u8>>> {
        let cf = self.cf(collection)?;
        self.db
            .get_cf(&cf, user_id.as_str())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn put(&self, collection: Collection, user_id: &UserId, value: &[u8]) -> Result<()> {
        let cf = self.cf(collection)?;
        self.db
            .put_cf(&cf, user_id.as_str(), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn delete(&self, collection: Collection, user_id: &UserId) -> Result<()> {
        let cf = self.cf(collection)?;
        self.db
            .delete_cf(&cf, user_id.as_str())
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl std::fmt::Debug for RocksStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksStore").finish_non_exhaustive()
    }
}
