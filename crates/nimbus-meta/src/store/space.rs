//! Space records and the space name index.

use nimbus_storage::Transaction;
use tracing::debug;

use super::MetaStore;
use crate::error::{MetaError, MetaResult};
use crate::keys;
use crate::types::{EntryType, GraphSpaceId, SpaceProperties};

impl MetaStore {
    /// Create a space and index its name.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::SpaceExists`] if the id is taken and
    /// [`MetaError::NameExists`] if the name is taken.
    pub fn create_space<T: Transaction>(
        tx: &mut T,
        space: GraphSpaceId,
        props: &SpaceProperties,
    ) -> MetaResult<()> {
        let key = keys::space_key(space);
        if tx.contains(&key)? {
            return Err(MetaError::SpaceExists(space));
        }
        let index = keys::index_key(EntryType::Space, &props.name);
        if tx.contains(&index)? {
            return Err(MetaError::NameExists(props.name.clone()));
        }

        tx.put(&key, &keys::space_val(props.partition_num, props.replica_factor, &props.name))?;
        tx.put(&index, &keys::index_val(space))?;
        debug!(space, name = %props.name, "created space");
        Ok(())
    }

    /// Get a space's properties.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedValue`] if the stored record is corrupt.
    pub fn get_space<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
    ) -> MetaResult<Option<SpaceProperties>> {
        tx.get(&keys::space_key(space))?.map(|val| keys::parse_space_val(&val)).transpose()
    }

    /// Look up a space id by name.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedValue`] if the index entry is corrupt.
    pub fn space_id_by_name<T: Transaction>(
        tx: &T,
        name: &str,
    ) -> MetaResult<Option<GraphSpaceId>> {
        tx.get(&keys::index_key(EntryType::Space, name))?
            .map(|val| keys::parse_index_val(&val))
            .transpose()
    }

    /// List every space in id order.
    ///
    /// # Errors
    ///
    /// Returns a malformed error if any stored record is corrupt.
    pub fn list_spaces<T: Transaction>(tx: &T) -> MetaResult<Vec<(GraphSpaceId, SpaceProperties)>> {
        tx.scan_prefix(keys::space_prefix())?
            .iter()
            .map(|(key, val)| Ok((keys::parse_space_id(key)?, keys::parse_space_val(val)?)))
            .collect()
    }

    /// Drop a space and everything stored under it: its name, parts, tag and
    /// edge schemas, and their names.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::SpaceNotFound`] if the space does not exist.
    pub fn drop_space<T: Transaction>(tx: &mut T, space: GraphSpaceId) -> MetaResult<()> {
        let props = Self::get_space(tx, space)?.ok_or(MetaError::SpaceNotFound(space))?;

        tx.delete(&keys::space_key(space))?;
        tx.delete(&keys::index_key(EntryType::Space, &props.name))?;
        let parts = Self::delete_prefix(tx, &keys::part_prefix(space))?;
        let tags = Self::delete_prefix(tx, &keys::schema_tags_prefix(space))?;
        let edges = Self::delete_prefix(tx, &keys::schema_edges_prefix(space))?;
        Self::delete_prefix(tx, &keys::schema_index_prefix(EntryType::Tag, space))?;
        Self::delete_prefix(tx, &keys::schema_index_prefix(EntryType::Edge, space))?;

        debug!(space, name = %props.name, parts, tags, edges, "dropped space");
        Ok(())
    }
}
