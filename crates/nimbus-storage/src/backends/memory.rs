//! In-memory storage backend.
//!
//! [`MemoryEngine`] keeps the whole keyspace in a `BTreeMap`. Read
//! transactions work on a snapshot taken when they begin. Write transactions
//! are serialized by a writer lock, mutate a private copy and publish it on
//! commit, so an uncommitted write is never visible to anyone else.
//!
//! Snapshots are full copies, which suits the small keyspaces of metadata
//! and tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, RwLock};

use tracing::debug;

use crate::engine::{KeyValue, StorageEngine, StorageError, Transaction};

type Keyspace = BTreeMap<Vec<u8>, Vec<u8>>;

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Internal("memory engine lock poisoned".to_owned())
}

/// A storage engine backed by an in-process ordered map.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    data: RwLock<Keyspace>,
    writer: Mutex<()>,
}

impl MemoryEngine {
    /// Create an empty engine.
    #[must_use]
    pub fn new() -> Self {
        debug!("opening in-memory storage engine");
        Self::default()
    }

    /// Number of committed records.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.data.read().map_err(poisoned)?.len())
    }

    /// Returns true if no records are committed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    fn snapshot(&self) -> Result<Keyspace, StorageError> {
        Ok(self.data.read().map_err(poisoned)?.clone())
    }
}

impl StorageEngine for MemoryEngine {
    type Transaction<'a> = MemoryTransaction<'a>;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        Ok(MemoryTransaction { shared: &self.data, view: self.snapshot()?, writer: None })
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        // Take the writer lock before the snapshot so the view is current.
        let writer = self.writer.lock().map_err(poisoned)?;
        Ok(MemoryTransaction { shared: &self.data, view: self.snapshot()?, writer: Some(writer) })
    }
}

/// A transaction on a [`MemoryEngine`].
pub struct MemoryTransaction<'a> {
    shared: &'a RwLock<Keyspace>,
    view: Keyspace,
    writer: Option<MutexGuard<'a, ()>>,
}

impl MemoryTransaction<'_> {
    fn ensure_writable(&self) -> Result<(), StorageError> {
        if self.writer.is_none() {
            return Err(StorageError::ReadOnly);
        }
        Ok(())
    }
}

impl Transaction for MemoryTransaction<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.view.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.ensure_writable()?;
        self.view.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<bool, StorageError> {
        self.ensure_writable()?;
        Ok(self.view.remove(key).is_some())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>, StorageError> {
        Ok(self
            .view
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn commit(self) -> Result<(), StorageError> {
        if self.writer.is_some() {
            *self.shared.write().map_err(poisoned)? = self.view;
        }
        Ok(())
    }

    fn rollback(self) -> Result<(), StorageError> {
        Ok(())
    }

    fn is_read_only(&self) -> bool {
        self.writer.is_none()
    }
}
