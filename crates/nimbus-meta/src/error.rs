//! Error types for metadata operations.

use nimbus_core::CoreError;
use nimbus_storage::StorageError;
use thiserror::Error;

use crate::types::GraphSpaceId;

/// Errors that can occur in metadata operations.
#[derive(Debug, Error)]
pub enum MetaError {
    /// A key does not have the layout of its table.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// A value does not have the layout of its table.
    #[error("malformed value: {0}")]
    MalformedValue(String),

    /// A space with this id already exists.
    #[error("space already exists: {0}")]
    SpaceExists(GraphSpaceId),

    /// The space does not exist.
    #[error("space not found: {0}")]
    SpaceNotFound(GraphSpaceId),

    /// The name is already bound to a different id.
    #[error("name already in use: {0}")]
    NameExists(String),

    /// A schema payload could not be encoded or decoded.
    #[error("schema error: {0}")]
    Core(#[from] CoreError),

    /// A storage backend error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for metadata operations.
pub type MetaResult<T> = Result<T, MetaError>;
