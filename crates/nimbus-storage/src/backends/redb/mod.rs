//! Redb storage backend.
//!
//! This module provides a storage backend implementation using Redb,
//! a pure-Rust embedded database with ACID transactions.
//!
//! All records live in one physical table. The metadata codec already
//! namespaces its keys with table prefixes, so a prefix scan is a range scan
//! starting at the prefix that stops at the first key not sharing it.
//!
//! # Example
//!
//! ```
//! use nimbus_storage::backends::RedbEngine;
//! use nimbus_storage::{StorageEngine, Transaction};
//!
//! let engine = RedbEngine::in_memory().unwrap();
//!
//! let mut tx = engine.begin_write().unwrap();
//! tx.put(b"__spaces__\x00\x00\x00\x01", b"default").unwrap();
//! tx.commit().unwrap();
//!
//! let tx = engine.begin_read().unwrap();
//! assert_eq!(tx.scan_prefix(b"__spaces__").unwrap().len(), 1);
//! ```
//!
//! # Configuration
//!
//! ```no_run
//! use nimbus_storage::backends::redb::{RedbConfig, RedbEngine};
//!
//! let config = RedbConfig::new().cache_size(16 * 1024 * 1024);
//! let engine = RedbEngine::open_with_config("meta.redb", config).unwrap();
//! ```

mod engine;
pub mod tables;
mod transaction;

pub use engine::{RedbConfig, RedbEngine};
pub use transaction::RedbTransaction;
