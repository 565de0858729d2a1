//! Partition placement and host records.

use nimbus_storage::Transaction;
use tracing::debug;

use super::MetaStore;
use crate::error::MetaResult;
use crate::keys;
use crate::types::{GraphSpaceId, HostAddr, PartitionId};

impl MetaStore {
    /// Set the hosts serving a partition, replacing any previous list.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::SpaceNotFound`](crate::MetaError::SpaceNotFound)
    /// if the space does not exist.
    pub fn set_part_hosts<T: Transaction>(
        tx: &mut T,
        space: GraphSpaceId,
        part: PartitionId,
        hosts: &[HostAddr],
    ) -> MetaResult<()> {
        Self::ensure_space(tx, space)?;
        tx.put(&keys::part_key(space, part), &keys::part_val(hosts))?;
        debug!(space, part, hosts = hosts.len(), "set part hosts");
        Ok(())
    }

    /// Get the hosts serving a partition, in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedValue`](crate::MetaError::MalformedValue)
    /// if the stored value is corrupt.
    pub fn get_part_hosts<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        part: PartitionId,
    ) -> MetaResult<Option<Vec<HostAddr>>> {
        tx.get(&keys::part_key(space, part))?.map(|val| keys::parse_part_val(&val)).transpose()
    }

    /// List every partition of a space with its hosts, in partition order.
    ///
    /// # Errors
    ///
    /// Returns a malformed error if any stored record is corrupt.
    pub fn list_parts<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
    ) -> MetaResult<Vec<(PartitionId, Vec<HostAddr>)>> {
        tx.scan_prefix(&keys::part_prefix(space))?
            .iter()
            .map(|(key, val)| {
                let (_, part) = keys::parse_part_key(key)?;
                Ok((part, keys::parse_part_val(val)?))
            })
            .collect()
    }

    /// Register hosts. Registering a known host is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn add_hosts<T: Transaction>(tx: &mut T, hosts: &[HostAddr]) -> MetaResult<()> {
        for host in hosts {
            tx.put(&keys::host_key(*host), &keys::host_val())?;
        }
        debug!(hosts = hosts.len(), "added hosts");
        Ok(())
    }

    /// Unregister a host. Returns `true` if it was registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn remove_host<T: Transaction>(tx: &mut T, host: HostAddr) -> MetaResult<bool> {
        let removed = tx.delete(&keys::host_key(host))?;
        debug!(%host, removed, "removed host");
        Ok(removed)
    }

    /// List registered hosts in address order.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedKey`](crate::MetaError::MalformedKey) if
    /// a stored key is corrupt.
    pub fn list_hosts<T: Transaction>(tx: &T) -> MetaResult<Vec<HostAddr>> {
        tx.scan_prefix(keys::host_prefix())?
            .iter()
            .map(|(key, _)| keys::parse_host_key(key))
            .collect()
    }
}
