//! Transactional operations over the metadata tables.
//!
//! [`MetaStore`] is stateless: every operation takes the transaction it runs
//! in, so callers decide how operations are grouped and committed. Reads
//! take `&T`, writes take `&mut T`.
//!
//! # Example
//!
//! ```
//! use std::net::Ipv4Addr;
//! use nimbus_meta::{HostAddr, MetaStore, SpaceProperties};
//! use nimbus_storage::backends::MemoryEngine;
//! use nimbus_storage::{StorageEngine, Transaction};
//!
//! let engine = MemoryEngine::new();
//! let host = HostAddr::new(Ipv4Addr::LOCALHOST, 44500);
//!
//! let mut tx = engine.begin_write().unwrap();
//! MetaStore::create_space(&mut tx, 1, &SpaceProperties::new("nba", 2, 1)).unwrap();
//! MetaStore::add_hosts(&mut tx, &[host]).unwrap();
//! MetaStore::set_part_hosts(&mut tx, 1, 1, &[host]).unwrap();
//! tx.commit().unwrap();
//!
//! let tx = engine.begin_read().unwrap();
//! assert_eq!(MetaStore::space_id_by_name(&tx, "nba").unwrap(), Some(1));
//! assert_eq!(MetaStore::get_part_hosts(&tx, 1, 1).unwrap(), Some(vec![host]));
//! ```

mod cluster;
mod schema;
mod space;

use nimbus_storage::Transaction;

use crate::error::{MetaError, MetaResult};
use crate::keys;
use crate::types::GraphSpaceId;

/// Metadata storage operations.
pub struct MetaStore;

impl MetaStore {
    fn ensure_space<T: Transaction>(tx: &T, space: GraphSpaceId) -> MetaResult<()> {
        if tx.contains(&keys::space_key(space))? {
            Ok(())
        } else {
            Err(MetaError::SpaceNotFound(space))
        }
    }

    fn delete_prefix<T: Transaction>(tx: &mut T, prefix: &[u8]) -> MetaResult<usize> {
        let records = tx.scan_prefix(prefix)?;
        for (key, _) in &records {
            tx.delete(key)?;
        }
        Ok(records.len())
    }
}
