//! Error types for the data service.

use sonicly_client::ClientError;
use sonicly_store::StoreError;

/// Failure of a single backend operation.
///
/// These never cross the [`SubscriptionService`](crate::SubscriptionService)
/// boundary: remote failures downgrade to the local path and local failures
/// are logged.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The record store did not serve the request.
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// The local cache failed.
    #[error(transparent)]
    Local(#[from] StoreError),

    /// The addressed record does not exist in this backend.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind.
        kind: &'static str,
        /// Record ID.
        id: String,
    },
}

/// Result type for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors raised while assembling the data service.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The record store client could not be configured.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The local cache could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),
}
