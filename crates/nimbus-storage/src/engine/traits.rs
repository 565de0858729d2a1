//! Core storage engine traits.

use super::StorageError;

/// A key-value pair returned by scans.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// A storage engine that provides transactional key-value operations over a
/// single flat keyspace.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait StorageEngine: Send + Sync {
    /// The transaction type for this engine.
    type Transaction<'a>: Transaction
    where
        Self: 'a;

    /// Begin a read-only transaction.
    ///
    /// Read transactions see a consistent snapshot. Any number may run
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the transaction cannot be started.
    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Begin a read-write transaction.
    ///
    /// Write transactions are serialized.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the transaction cannot be started.
    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Flush any buffered data to durable storage.
    ///
    /// The default implementation does nothing, as backends handle durability
    /// on commit.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the flush fails.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// A transaction over the flat keyspace.
///
/// Write transactions must be explicitly committed; dropping one without
/// committing rolls its changes back.
pub trait Transaction {
    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] on a read-only transaction.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Remove `key`. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] on a read-only transaction.
    fn delete(&mut self, key: &[u8]) -> Result<bool, StorageError>;

    /// Return every record whose key starts with `prefix`, in ascending key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend scan fails.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>, StorageError>;

    /// Commit the transaction.
    ///
    /// For read-only transactions this simply releases the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the commit fails.
    fn commit(self) -> Result<(), StorageError>;

    /// Discard the transaction's changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    fn rollback(self) -> Result<(), StorageError>;

    /// Returns true if this transaction cannot write.
    fn is_read_only(&self) -> bool;

    /// Returns true if `key` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn contains(&self, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.get(key)?.is_some())
    }
}
