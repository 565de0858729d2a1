//! Storage error types.

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened.
    #[error("failed to open database: {0}")]
    Open(String),

    /// A transaction could not be started or committed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// A write was attempted on a read-only transaction.
    #[error("transaction is read-only")]
    ReadOnly,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend reported an error.
    #[error("internal storage error: {0}")]
    Internal(String),
}
