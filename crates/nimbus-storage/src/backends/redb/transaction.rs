//! Redb transaction wrapper.

use redb::{ReadTransaction, ReadableTable, WriteTransaction};

use super::tables;
use crate::engine::{KeyValue, StorageError, Transaction};

fn internal(e: impl std::fmt::Display) -> StorageError {
    StorageError::Internal(e.to_string())
}

fn scan<T>(table: &T, prefix: &[u8]) -> Result<Vec<KeyValue>, StorageError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let mut out = Vec::new();
    for entry in table.range(prefix..).map_err(internal)? {
        let (key, value) = entry.map_err(internal)?;
        if !key.value().starts_with(prefix) {
            break;
        }
        out.push((key.value().to_vec(), value.value().to_vec()));
    }
    Ok(out)
}

fn lookup<T>(table: &T, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let value = table.get(key).map_err(internal)?;
    Ok(value.map(|v| v.value().to_vec()))
}

enum Inner {
    Read(ReadTransaction),
    Write(WriteTransaction),
}

/// A transaction on a [`RedbEngine`](super::RedbEngine).
pub struct RedbTransaction {
    inner: Inner,
    table: &'static str,
}

impl RedbTransaction {
    pub(super) fn read(tx: ReadTransaction, table: &'static str) -> Self {
        Self { inner: Inner::Read(tx), table }
    }

    pub(super) fn write(tx: WriteTransaction, table: &'static str) -> Self {
        Self { inner: Inner::Write(tx), table }
    }

    fn writer(&self) -> Result<&WriteTransaction, StorageError> {
        match &self.inner {
            Inner::Write(tx) => Ok(tx),
            Inner::Read(_) => Err(StorageError::ReadOnly),
        }
    }
}

impl Transaction for RedbTransaction {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let def = tables::table(self.table);
        match &self.inner {
            Inner::Read(tx) => lookup(&tx.open_table(def).map_err(internal)?, key),
            Inner::Write(tx) => lookup(&tx.open_table(def).map_err(internal)?, key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        let mut table = self.writer()?.open_table(tables::table(self.table)).map_err(internal)?;
        table.insert(key, value).map_err(internal)?;
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<bool, StorageError> {
        let mut table = self.writer()?.open_table(tables::table(self.table)).map_err(internal)?;
        let removed = table.remove(key).map_err(internal)?.is_some();
        Ok(removed)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>, StorageError> {
        let def = tables::table(self.table);
        match &self.inner {
            Inner::Read(tx) => scan(&tx.open_table(def).map_err(internal)?, prefix),
            Inner::Write(tx) => scan(&tx.open_table(def).map_err(internal)?, prefix),
        }
    }

    fn commit(self) -> Result<(), StorageError> {
        match self.inner {
            Inner::Read(_) => Ok(()),
            Inner::Write(tx) => tx.commit().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn rollback(self) -> Result<(), StorageError> {
        match self.inner {
            Inner::Read(_) => Ok(()),
            Inner::Write(tx) => tx.abort().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self.inner, Inner::Read(_))
    }
}
