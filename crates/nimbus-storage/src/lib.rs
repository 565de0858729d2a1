//! Nimbus Storage
//!
//! The flat key-value contract the metadata store is written against, and the
//! backends that implement it.
//!
//! # Overview
//!
//! The metadata codec only produces and parses byte keys and values. Reading
//! and writing them is the job of a key-value store that offers point reads,
//! point writes and prefix scans, wrapped in transactions:
//!
//! - [`StorageEngine`] - The main entry point, hands out transactions
//! - [`Transaction`] - `get`, `put`, `delete` and `scan_prefix`
//!
//! Scans are pure byte-range operations: a prefix scan returns every record
//! whose key starts with the prefix, in ascending byte order.
//!
//! # Example
//!
//! ```
//! use nimbus_storage::backends::MemoryEngine;
//! use nimbus_storage::{StorageEngine, Transaction};
//!
//! let engine = MemoryEngine::new();
//!
//! let mut tx = engine.begin_write().unwrap();
//! tx.put(b"__hosts__a", b"").unwrap();
//! tx.put(b"__hosts__b", b"").unwrap();
//! tx.put(b"__parts__a", b"x").unwrap();
//! tx.commit().unwrap();
//!
//! let tx = engine.begin_read().unwrap();
//! assert_eq!(tx.scan_prefix(b"__hosts__").unwrap().len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`engine`] - Storage engine traits and errors
//! - [`backends`] - In-memory and redb-backed implementations

#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod engine;

pub use engine::{KeyValue, StorageEngine, StorageError, StorageResult, Transaction};
