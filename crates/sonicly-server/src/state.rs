//! Application state.

use sonicly_store::{FileStore, LocalCache, StoreError};

use crate::config::{ServerConfig, StoreBackend};
use crate::records::RecordStore;

/// Application state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    /// Per-user record collections.
    pub records: RecordStore,

    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Create application state over an existing cache.
    #[must_use]
    pub fn new(cache: LocalCache, config: ServerConfig) -> Self {
        Self {
            records: RecordStore::new(cache),
            config,
        }
    }

    /// Open the configured storage backend under `config.data_dir`.
    pub fn open(config: ServerConfig) -> Result<Self, StoreError> {
        let cache = match config.store_backend {
            StoreBackend::File => {
                tracing::info!(path = %config.data_dir, "Opening file store");
                LocalCache::new(FileStore::open(&config.data_dir)?)
            }
            StoreBackend::Rocks => open_rocks(&config.data_dir)?,
        };

        Ok(Self::new(cache, config))
    }
}

#[cfg(feature = "rocksdb-backend")]
fn open_rocks(path: &str) -> Result<LocalCache, StoreError> {
    tracing::info!(path = %path, "Opening RocksDB store");
    Ok(LocalCache::new(sonicly_store::RocksStore::open(path)?))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_rocks(_path: &str) -> Result<LocalCache, StoreError> {
    Err(StoreError::Database(
        "RocksDB backend requested but the server was built without the rocksdb-backend feature"
            .into(),
    ))
}
