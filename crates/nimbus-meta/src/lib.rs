//! Nimbus Meta
//!
//! Binary key/value layouts for cluster metadata, and a store that reads and
//! writes them through any [`nimbus_storage::Transaction`].
//!
//! # Overview
//!
//! Metadata lives in one flat keyspace split into six logical tables, each
//! identified by a fixed ASCII prefix:
//!
//! | table        | key                                   | value                           |
//! |--------------|---------------------------------------|---------------------------------|
//! | `__spaces__` | space id                              | parts, replicas, name           |
//! | `__parts__`  | space id, part id                     | `(ip, port)` per host           |
//! | `__hosts__`  | ip, port                              | empty                           |
//! | `__tags__`   | space id, tag id, `i64::MAX - version`| name length, name, schema       |
//! | `__edges__`  | space id, edge type, version          | schema                          |
//! | `__index__`  | entry type, name                      | id                              |
//!
//! Every field is fixed-width big-endian, so a prefix scan is a logical table
//! scan and byte order is numeric order. Tag versions are inverted so a scan
//! over one tag returns the newest schema first.
//!
//! # Example
//!
//! ```
//! use nimbus_core::{ScalarKind, SchemaDescriptor};
//! use nimbus_meta::{MetaStore, SpaceProperties};
//! use nimbus_storage::backends::MemoryEngine;
//! use nimbus_storage::{StorageEngine, Transaction};
//!
//! let engine = MemoryEngine::new();
//! let mut tx = engine.begin_write().unwrap();
//! MetaStore::create_space(&mut tx, 1, &SpaceProperties::new("default", 10, 3)).unwrap();
//!
//! let schema = SchemaDescriptor::builder().column("name", ScalarKind::String).build().unwrap();
//! MetaStore::put_tag_schema(&mut tx, 1, 7, 0, "person", &schema).unwrap();
//! MetaStore::put_tag_schema(&mut tx, 1, 7, 1, "person", &schema).unwrap();
//! tx.commit().unwrap();
//!
//! let tx = engine.begin_read().unwrap();
//! let (version, _) = MetaStore::latest_tag_schema(&tx, 1, 7).unwrap().unwrap();
//! assert_eq!(version, 1);
//! ```
//!
//! # Modules
//!
//! - [`keys`] - Pure key/value encoders and decoders
//! - [`store`] - [`MetaStore`], transactional operations over the tables
//! - [`types`] - Identifiers, [`HostAddr`], [`EntryType`]

#![deny(clippy::unwrap_used)]

pub mod error;
pub mod keys;
pub mod store;
pub mod types;

pub use error::{MetaError, MetaResult};
pub use store::MetaStore;
pub use types::{
    EdgeType, EntryType, GraphSpaceId, HostAddr, PartitionId, SchemaItem, SchemaVersion,
    SpaceProperties, TagId,
};
