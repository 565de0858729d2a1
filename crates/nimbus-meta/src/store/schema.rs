//! Versioned tag and edge schemas.
//!
//! Tag keys invert their version, so the first record of a tag's scan is its
//! newest schema. Edge keys store the version as-is, so the newest edge
//! schema is the last record of its scan.

use nimbus_core::SchemaDescriptor;
use nimbus_storage::Transaction;
use tracing::debug;

use super::MetaStore;
use crate::error::{MetaError, MetaResult};
use crate::keys;
use crate::types::{EdgeType, EntryType, GraphSpaceId, SchemaItem, SchemaVersion, TagId};

impl MetaStore {
    /// Bind `name` to `id`, releasing any other name the id held before.
    fn bind_name<T: Transaction>(
        tx: &mut T,
        entry: EntryType,
        space: GraphSpaceId,
        name: &str,
        id: i32,
    ) -> MetaResult<()> {
        let index = keys::schema_index_key(entry, space, name);
        if let Some(val) = tx.get(&index)? {
            if keys::parse_index_val(&val)? != id {
                return Err(MetaError::NameExists(name.to_owned()));
            }
            return Ok(());
        }

        for (key, val) in tx.scan_prefix(&keys::schema_index_prefix(entry, space))? {
            if keys::parse_index_val(&val)? == id {
                let (_, _, old) = keys::parse_schema_index_key(&key)?;
                debug!(space, id, old, name, "rename schema entry");
                tx.delete(&key)?;
            }
        }
        Ok(tx.put(&index, &keys::index_val(id))?)
    }

    fn id_by_name<T: Transaction>(
        tx: &T,
        entry: EntryType,
        space: GraphSpaceId,
        name: &str,
    ) -> MetaResult<Option<i32>> {
        tx.get(&keys::schema_index_key(entry, space, name))?
            .map(|val| keys::parse_index_val(&val))
            .transpose()
    }

    /// Store a version of a tag schema and bind the tag's name.
    ///
    /// Writing an existing version replaces it. A different name renames the
    /// tag: the old name stops resolving and becomes free for other tags.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::SpaceNotFound`] if the space does not exist and
    /// [`MetaError::NameExists`] if the name belongs to another tag.
    pub fn put_tag_schema<T: Transaction>(
        tx: &mut T,
        space: GraphSpaceId,
        tag: TagId,
        version: SchemaVersion,
        name: &str,
        schema: &SchemaDescriptor,
    ) -> MetaResult<()> {
        Self::ensure_space(tx, space)?;
        Self::bind_name(tx, EntryType::Tag, space, name, tag)?;
        tx.put(&keys::schema_tag_key(space, tag, version), &keys::schema_tag_val(name, schema)?)?;
        debug!(space, tag, version, name, columns = schema.len(), "put tag schema");
        Ok(())
    }

    /// Get one version of a tag schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is corrupt.
    pub fn get_tag_schema<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        tag: TagId,
        version: SchemaVersion,
    ) -> MetaResult<Option<SchemaDescriptor>> {
        tx.get(&keys::schema_tag_key(space, tag, version))?
            .map(|val| keys::parse_tag_schema(&val))
            .transpose()
    }

    /// Get the newest version of a tag schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record is corrupt.
    pub fn latest_tag_schema<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        tag: TagId,
    ) -> MetaResult<Option<(SchemaVersion, SchemaDescriptor)>> {
        let records = tx.scan_prefix(&keys::schema_tag_prefix(space, tag))?;
        records
            .first()
            .map(|(key, val)| Ok((keys::parse_tag_version(key)?, keys::parse_tag_schema(val)?)))
            .transpose()
    }

    /// Every stored version of a tag, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedKey`] if a stored key is corrupt.
    pub fn tag_versions<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        tag: TagId,
    ) -> MetaResult<Vec<SchemaVersion>> {
        tx.scan_prefix(&keys::schema_tag_prefix(space, tag))?
            .iter()
            .map(|(key, _)| keys::parse_tag_version(key))
            .collect()
    }

    /// The newest schema of every tag in a space, in tag id order.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored record is corrupt.
    pub fn list_tags<T: Transaction>(tx: &T, space: GraphSpaceId) -> MetaResult<Vec<SchemaItem>> {
        let mut items: Vec<SchemaItem> = Vec::new();
        for (key, val) in tx.scan_prefix(&keys::schema_tags_prefix(space))? {
            let (_, tag, version) = keys::parse_tag_key(&key)?;
            // Versions of one tag are contiguous and newest first.
            if items.last().is_some_and(|item| item.id == tag) {
                continue;
            }
            items.push(SchemaItem {
                id: tag,
                name: keys::parse_tag_name(&val)?.to_owned(),
                version,
                schema: keys::parse_tag_schema(&val)?,
            });
        }
        Ok(items)
    }

    /// Look up a tag id by name within a space.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedValue`] if the index entry is corrupt.
    pub fn tag_id_by_name<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        name: &str,
    ) -> MetaResult<Option<TagId>> {
        Self::id_by_name(tx, EntryType::Tag, space, name)
    }

    /// Store a version of an edge schema and bind the edge type's name.
    ///
    /// Edge values carry no name, so the name lives only in the index. A
    /// different name renames the edge type, as for tags.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::SpaceNotFound`] if the space does not exist and
    /// [`MetaError::NameExists`] if the name belongs to another edge type.
    pub fn put_edge_schema<T: Transaction>(
        tx: &mut T,
        space: GraphSpaceId,
        edge_type: EdgeType,
        version: SchemaVersion,
        name: &str,
        schema: &SchemaDescriptor,
    ) -> MetaResult<()> {
        Self::ensure_space(tx, space)?;
        Self::bind_name(tx, EntryType::Edge, space, name, edge_type)?;
        tx.put(&keys::schema_edge_key(space, edge_type, version), &keys::schema_edge_val(schema)?)?;
        debug!(space, edge_type, version, name, columns = schema.len(), "put edge schema");
        Ok(())
    }

    /// Get one version of an edge schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is corrupt.
    pub fn get_edge_schema<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        edge_type: EdgeType,
        version: SchemaVersion,
    ) -> MetaResult<Option<SchemaDescriptor>> {
        tx.get(&keys::schema_edge_key(space, edge_type, version))?
            .map(|val| keys::parse_edge_schema(&val))
            .transpose()
    }

    /// Get the newest version of an edge schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record is corrupt.
    pub fn latest_edge_schema<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        edge_type: EdgeType,
    ) -> MetaResult<Option<(SchemaVersion, SchemaDescriptor)>> {
        let records = tx.scan_prefix(&keys::schema_edge_prefix(space, edge_type))?;
        records
            .last()
            .map(|(key, val)| Ok((keys::parse_edge_version(key)?, keys::parse_edge_schema(val)?)))
            .transpose()
    }

    /// Every stored version of an edge type, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedKey`] if a stored key is corrupt.
    pub fn edge_versions<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        edge_type: EdgeType,
    ) -> MetaResult<Vec<SchemaVersion>> {
        tx.scan_prefix(&keys::schema_edge_prefix(space, edge_type))?
            .iter()
            .map(|(key, _)| keys::parse_edge_version(key))
            .collect()
    }

    /// Look up an edge type by name within a space.
    ///
    /// # Errors
    ///
    /// Returns [`MetaError::MalformedValue`] if the index entry is corrupt.
    pub fn edge_type_by_name<T: Transaction>(
        tx: &T,
        space: GraphSpaceId,
        name: &str,
    ) -> MetaResult<Option<EdgeType>> {
        Self::id_by_name(tx, EntryType::Edge, space, name)
    }
}
