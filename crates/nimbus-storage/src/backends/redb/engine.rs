//! Redb engine and its configuration.

use std::path::Path;

use redb::backends::InMemoryBackend;
use redb::{Builder, Database};
use tracing::debug;

use super::tables::{self, DEFAULT_TABLE};
use super::transaction::RedbTransaction;
use crate::engine::{StorageEngine, StorageError};

/// Configuration for a [`RedbEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedbConfig {
    /// Page cache size in bytes. `None` keeps redb's default.
    pub cache_size: Option<usize>,
    /// Name of the physical table holding every record.
    pub table_name: &'static str,
}

impl RedbConfig {
    /// Create the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self { cache_size: None, table_name: DEFAULT_TABLE }
    }

    /// Set the page cache size in bytes.
    #[must_use]
    pub const fn cache_size(mut self, bytes: usize) -> Self {
        self.cache_size = Some(bytes);
        self
    }

    /// Set the physical table name.
    #[must_use]
    pub const fn table_name(mut self, name: &'static str) -> Self {
        self.table_name = name;
        self
    }

    fn builder(&self) -> Builder {
        let mut builder = Database::builder();
        if let Some(bytes) = self.cache_size {
            builder.set_cache_size(bytes);
        }
        builder
    }
}

impl Default for RedbConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A storage engine backed by a redb database.
pub struct RedbEngine {
    db: Database,
    table: &'static str,
}

impl RedbEngine {
    /// Open or create a database file with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Open or create a database file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the file cannot be opened.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: RedbConfig,
    ) -> Result<Self, StorageError> {
        let path = path.as_ref();
        debug!(path = %path.display(), table = config.table_name, "opening redb storage engine");
        let db = config.builder().create(path).map_err(|e| StorageError::Open(e.to_string()))?;
        Self::init(db, config.table_name)
    }

    /// Create a database that lives only in memory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        debug!("opening in-memory redb storage engine");
        let config = RedbConfig::default();
        let db = config
            .builder()
            .create_with_backend(InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Self::init(db, config.table_name)
    }

    // Create the table up front so read transactions never see it missing.
    fn init(db: Database, table: &'static str) -> Result<Self, StorageError> {
        let tx = db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;
        tx.open_table(tables::table(table)).map_err(|e| StorageError::Internal(e.to_string()))?;
        tx.commit().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(Self { db, table })
    }
}

impl StorageEngine for RedbEngine {
    type Transaction<'a> = RedbTransaction;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::read(tx, self.table))
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::write(tx, self.table))
    }
}
