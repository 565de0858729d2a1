//! Key and value layouts for the metadata tables.
//!
//! Every function here is a pure transform between records and bytes. Keys
//! are the concatenation of a table prefix with fixed-width fields; only a
//! trailing name may be variable-width. All integers are big-endian so that
//! byte order matches numeric order for non-negative ids and versions.
//!
//! This layout is not byte-compatible with stores that write integers in
//! host-native order. A little-endian version field would only sort within
//! its lowest byte, so records written that way must be migrated rather
//! than read in place.
//!
//! # Layouts
//!
//! ```text
//! space key   [__spaces__][space: i32]
//! space val   [partition_num: i32][replica_factor: i32][name ...]
//! part key    [__parts__][space: i32][part: i32]
//! part val    ([ip: 4 octets][port: u32])*
//! host key    [__hosts__][ip: 4 octets][port: u32]
//! tag key     [__tags__][space: i32][tag: i32][i64::MAX - version: i64]
//! tag val     [name_len: i32][name][schema ...]
//! edge key    [__edges__][space: i32][edge_type: i32][version: i64]
//! edge val    [schema ...]
//! index key   [__index__][entry_type: i32][name ...]
//! index val   [id: i32]
//! ```
//!
//! Tag versions are stored inverted so a prefix scan over one tag yields the
//! newest version first. Edge versions are stored as-is, so the newest edge
//! schema is the last record of its scan.
//!
//! Decoders check lengths and prefixes and report
//! [`MetaError::MalformedKey`] or [`MetaError::MalformedValue`] rather than
//! reading past the end of a buffer.

use std::net::Ipv4Addr;

use nimbus_core::{Decoder, Encoder, SchemaDescriptor};
use tracing::trace;

use crate::error::{MetaError, MetaResult};
use crate::types::{
    EdgeType, EntryType, GraphSpaceId, HostAddr, PartitionId, SchemaVersion, SpaceProperties,
    TagId,
};

/// Prefix of the spaces table.
pub const SPACES_TABLE: &[u8] = b"__spaces__";
/// Prefix of the parts table.
pub const PARTS_TABLE: &[u8] = b"__parts__";
/// Prefix of the hosts table.
pub const HOSTS_TABLE: &[u8] = b"__hosts__";
/// Prefix of the tag schema table.
pub const TAGS_TABLE: &[u8] = b"__tags__";
/// Prefix of the edge schema table.
pub const EDGES_TABLE: &[u8] = b"__edges__";
/// Prefix of the name index table.
pub const INDEX_TABLE: &[u8] = b"__index__";

/// Encoded size of one host in a part value.
pub const HOST_UNIT_SIZE: usize = 8;

/// Sequential reader over the fixed-width fields of a key or value.
struct Fields<'a> {
    bytes: &'a [u8],
    malformed: fn(String) -> MetaError,
    what: &'static str,
}

impl<'a> Fields<'a> {
    fn key(key: &'a [u8], table: &[u8], what: &'static str) -> MetaResult<Self> {
        let bytes = key.strip_prefix(table).ok_or_else(|| {
            MetaError::MalformedKey(format!(
                "{what} key does not start with {}",
                String::from_utf8_lossy(table)
            ))
        })?;
        Ok(Self { bytes, malformed: MetaError::MalformedKey, what })
    }

    fn value(value: &'a [u8], what: &'static str) -> Self {
        Self { bytes: value, malformed: MetaError::MalformedValue, what }
    }

    fn take<const N: usize>(&mut self) -> MetaResult<[u8; N]> {
        match self.bytes.split_first_chunk::<N>() {
            Some((head, rest)) => {
                self.bytes = rest;
                Ok(*head)
            }
            None => Err(self.fail(format!("truncated, needed {N} more bytes"))),
        }
    }

    fn bytes(&mut self, len: usize) -> MetaResult<&'a [u8]> {
        if self.bytes.len() < len {
            return Err(self.fail(format!("truncated, needed {len} more bytes")));
        }
        let (head, rest) = self.bytes.split_at(len);
        self.bytes = rest;
        Ok(head)
    }

    fn i32(&mut self) -> MetaResult<i32> {
        self.take().map(i32::from_be_bytes)
    }

    fn u32(&mut self) -> MetaResult<u32> {
        self.take().map(u32::from_be_bytes)
    }

    fn i64(&mut self) -> MetaResult<i64> {
        self.take().map(i64::from_be_bytes)
    }

    fn ip(&mut self) -> MetaResult<Ipv4Addr> {
        self.take::<4>().map(Ipv4Addr::from)
    }

    fn utf8(&self, bytes: &'a [u8]) -> MetaResult<&'a str> {
        std::str::from_utf8(bytes).map_err(|e| self.fail(format!("name is not UTF-8: {e}")))
    }

    fn rest(self) -> &'a [u8] {
        self.bytes
    }

    fn finish(self) -> MetaResult<()> {
        if self.bytes.is_empty() {
            Ok(())
        } else {
            Err(self.fail(format!("{} trailing bytes", self.bytes.len())))
        }
    }

    fn fail(&self, reason: String) -> MetaError {
        (self.malformed)(format!("{}: {reason}", self.what))
    }
}

fn with_table(table: &[u8], extra: usize) -> Vec<u8> {
    let mut key = Vec::with_capacity(table.len() + extra);
    key.extend_from_slice(table);
    key
}

fn tag_storage_version(version: SchemaVersion) -> i64 {
    i64::MAX.wrapping_sub(version)
}

/// Namespace `key` under `segment` by plain concatenation.
#[must_use]
pub fn assemble_segment_key(segment: &[u8], key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(segment.len() + key.len());
    out.extend_from_slice(segment);
    out.extend_from_slice(key);
    out
}

// Spaces

/// Key of the space record for `space`.
#[must_use]
pub fn space_key(space: GraphSpaceId) -> Vec<u8> {
    let mut key = with_table(SPACES_TABLE, 4);
    key.extend_from_slice(&space.to_be_bytes());
    key
}

/// Value of a space record.
#[must_use]
pub fn space_val(partition_num: i32, replica_factor: i32, name: &str) -> Vec<u8> {
    let mut val = Vec::with_capacity(8 + name.len());
    val.extend_from_slice(&partition_num.to_be_bytes());
    val.extend_from_slice(&replica_factor.to_be_bytes());
    val.extend_from_slice(name.as_bytes());
    val
}

/// Prefix covering every space record.
#[must_use]
pub const fn space_prefix() -> &'static [u8] {
    SPACES_TABLE
}

/// Space id of a space key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not a space key.
pub fn parse_space_id(key: &[u8]) -> MetaResult<GraphSpaceId> {
    let mut fields = Fields::key(key, SPACES_TABLE, "space")?;
    let space = fields.i32()?;
    fields.finish()?;
    Ok(space)
}

/// Name stored in a space value: everything after the two counts.
///
/// # Errors
///
/// Returns [`MetaError::MalformedValue`] if the value is shorter than the
/// counts or the name is not UTF-8.
pub fn parse_space_name(val: &[u8]) -> MetaResult<&str> {
    let mut fields = Fields::value(val, "space");
    fields.bytes(8)?;
    let name = fields.utf8(fields.bytes)?;
    Ok(name)
}

/// Decode a full space value.
///
/// # Errors
///
/// Returns [`MetaError::MalformedValue`] if the value is truncated or the
/// name is not UTF-8.
pub fn parse_space_val(val: &[u8]) -> MetaResult<SpaceProperties> {
    let mut fields = Fields::value(val, "space");
    let partition_num = fields.i32()?;
    let replica_factor = fields.i32()?;
    let name = fields.utf8(fields.bytes)?;
    Ok(SpaceProperties::new(name, partition_num, replica_factor))
}

// Parts

/// Key of the part record for `part` in `space`.
#[must_use]
pub fn part_key(space: GraphSpaceId, part: PartitionId) -> Vec<u8> {
    let mut key = part_prefix(space);
    key.extend_from_slice(&part.to_be_bytes());
    key
}

/// Value of a part record: the hosts serving it, in order.
#[must_use]
pub fn part_val(hosts: &[HostAddr]) -> Vec<u8> {
    let mut val = Vec::with_capacity(hosts.len() * HOST_UNIT_SIZE);
    for host in hosts {
        val.extend_from_slice(&host.ip.octets());
        val.extend_from_slice(&host.port.to_be_bytes());
    }
    val
}

/// Prefix covering every part of `space`.
#[must_use]
pub fn part_prefix(space: GraphSpaceId) -> Vec<u8> {
    let mut prefix = with_table(PARTS_TABLE, 8);
    prefix.extend_from_slice(&space.to_be_bytes());
    prefix
}

/// Space and part id of a part key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not a part key.
pub fn parse_part_key(key: &[u8]) -> MetaResult<(GraphSpaceId, PartitionId)> {
    let mut fields = Fields::key(key, PARTS_TABLE, "part")?;
    let space = fields.i32()?;
    let part = fields.i32()?;
    fields.finish()?;
    Ok((space, part))
}

/// Decode the hosts of a part value.
///
/// # Errors
///
/// Returns [`MetaError::MalformedValue`] if the length is not a multiple of
/// [`HOST_UNIT_SIZE`].
pub fn parse_part_val(val: &[u8]) -> MetaResult<Vec<HostAddr>> {
    let count = val.len() / HOST_UNIT_SIZE;
    trace!(size = val.len(), unit = HOST_UNIT_SIZE, hosts = count, "decoding part value");
    if val.len() % HOST_UNIT_SIZE != 0 {
        return Err(MetaError::MalformedValue(format!(
            "part value of {} bytes is not a multiple of {HOST_UNIT_SIZE}",
            val.len()
        )));
    }

    let mut fields = Fields::value(val, "part");
    let mut hosts = Vec::with_capacity(count);
    for _ in 0..count {
        let ip = fields.ip()?;
        let port = fields.u32()?;
        hosts.push(HostAddr::new(ip, port));
    }
    Ok(hosts)
}

// Hosts

/// Key of the host record for `host`.
#[must_use]
pub fn host_key(host: HostAddr) -> Vec<u8> {
    let mut key = with_table(HOSTS_TABLE, HOST_UNIT_SIZE);
    key.extend_from_slice(&host.ip.octets());
    key.extend_from_slice(&host.port.to_be_bytes());
    key
}

/// Value of a host record. Hosts are existence-only.
#[must_use]
pub const fn host_val() -> Vec<u8> {
    Vec::new()
}

/// Prefix covering every host record.
#[must_use]
pub const fn host_prefix() -> &'static [u8] {
    HOSTS_TABLE
}

/// Host address of a host key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not a host key.
pub fn parse_host_key(key: &[u8]) -> MetaResult<HostAddr> {
    let mut fields = Fields::key(key, HOSTS_TABLE, "host")?;
    let ip = fields.ip()?;
    let port = fields.u32()?;
    fields.finish()?;
    Ok(HostAddr::new(ip, port))
}

// Tag schemas

/// Key of version `version` of tag `tag` in `space`.
///
/// The version is stored as `i64::MAX - version`, so for non-negative
/// versions newer keys sort first.
#[must_use]
pub fn schema_tag_key(space: GraphSpaceId, tag: TagId, version: SchemaVersion) -> Vec<u8> {
    let mut key = schema_tag_prefix(space, tag);
    key.extend_from_slice(&tag_storage_version(version).to_be_bytes());
    key
}

/// Value of a tag schema record.
///
/// # Errors
///
/// Returns [`MetaError::Core`] if the schema cannot be serialized, or
/// [`MetaError::MalformedValue`] if the name is longer than `i32::MAX` bytes.
pub fn schema_tag_val(name: &str, schema: &SchemaDescriptor) -> MetaResult<Vec<u8>> {
    let len = i32::try_from(name.len())
        .map_err(|_| MetaError::MalformedValue(format!("tag name of {} bytes", name.len())))?;
    let mut val = Vec::with_capacity(4 + name.len());
    val.extend_from_slice(&len.to_be_bytes());
    val.extend_from_slice(name.as_bytes());
    schema.encode_to(&mut val)?;
    Ok(val)
}

/// Prefix covering every version of tag `tag` in `space`, newest first.
#[must_use]
pub fn schema_tag_prefix(space: GraphSpaceId, tag: TagId) -> Vec<u8> {
    let mut prefix = schema_tags_prefix(space);
    prefix.extend_from_slice(&tag.to_be_bytes());
    prefix
}

/// Prefix covering every tag schema in `space`.
#[must_use]
pub fn schema_tags_prefix(space: GraphSpaceId) -> Vec<u8> {
    let mut prefix = with_table(TAGS_TABLE, 16);
    prefix.extend_from_slice(&space.to_be_bytes());
    prefix
}

/// Space, tag and version of a tag schema key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not a tag schema key.
pub fn parse_tag_key(key: &[u8]) -> MetaResult<(GraphSpaceId, TagId, SchemaVersion)> {
    let mut fields = Fields::key(key, TAGS_TABLE, "tag")?;
    let space = fields.i32()?;
    let tag = fields.i32()?;
    let version = tag_storage_version(fields.i64()?);
    fields.finish()?;
    Ok((space, tag, version))
}

/// Version of a tag schema key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not a tag schema key.
pub fn parse_tag_version(key: &[u8]) -> MetaResult<SchemaVersion> {
    parse_tag_key(key).map(|(_, _, version)| version)
}

fn split_tag_val(val: &[u8]) -> MetaResult<(&str, &[u8])> {
    let mut fields = Fields::value(val, "tag");
    let len = fields.i32()?;
    let len = usize::try_from(len)
        .map_err(|_| MetaError::MalformedValue(format!("tag: negative name length {len}")))?;
    let name = fields.bytes(len)?;
    let name = fields.utf8(name)?;
    Ok((name, fields.rest()))
}

/// Name stored in a tag schema value.
///
/// # Errors
///
/// Returns [`MetaError::MalformedValue`] if the length prefix does not fit
/// the value or the name is not UTF-8.
pub fn parse_tag_name(val: &[u8]) -> MetaResult<&str> {
    split_tag_val(val).map(|(name, _)| name)
}

/// Schema stored in a tag schema value, after the embedded name.
///
/// # Errors
///
/// Returns [`MetaError::MalformedValue`] for a bad name prefix and
/// [`MetaError::Core`] if the schema payload is corrupt.
pub fn parse_tag_schema(val: &[u8]) -> MetaResult<SchemaDescriptor> {
    let (_, payload) = split_tag_val(val)?;
    Ok(SchemaDescriptor::decode(payload)?)
}

// Edge schemas

/// Key of version `version` of edge type `edge_type` in `space`.
///
/// Unlike tag keys the version is stored as-is, so older keys sort first.
#[must_use]
pub fn schema_edge_key(
    space: GraphSpaceId,
    edge_type: EdgeType,
    version: SchemaVersion,
) -> Vec<u8> {
    let mut key = schema_edge_prefix(space, edge_type);
    key.extend_from_slice(&version.to_be_bytes());
    key
}

/// Value of an edge schema record: the serialized schema alone.
///
/// # Errors
///
/// Returns [`MetaError::Core`] if the schema cannot be serialized.
pub fn schema_edge_val(schema: &SchemaDescriptor) -> MetaResult<Vec<u8>> {
    Ok(schema.encode()?)
}

/// Prefix covering every version of `edge_type` in `space`, oldest first.
#[must_use]
pub fn schema_edge_prefix(space: GraphSpaceId, edge_type: EdgeType) -> Vec<u8> {
    let mut prefix = schema_edges_prefix(space);
    prefix.extend_from_slice(&edge_type.to_be_bytes());
    prefix
}

/// Prefix covering every edge schema in `space`.
#[must_use]
pub fn schema_edges_prefix(space: GraphSpaceId) -> Vec<u8> {
    let mut prefix = with_table(EDGES_TABLE, 16);
    prefix.extend_from_slice(&space.to_be_bytes());
    prefix
}

/// Space, edge type and version of an edge schema key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not an edge schema key.
pub fn parse_edge_key(key: &[u8]) -> MetaResult<(GraphSpaceId, EdgeType, SchemaVersion)> {
    let mut fields = Fields::key(key, EDGES_TABLE, "edge")?;
    let space = fields.i32()?;
    let edge_type = fields.i32()?;
    let version = fields.i64()?;
    fields.finish()?;
    Ok((space, edge_type, version))
}

/// Version of an edge schema key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not an edge schema key.
pub fn parse_edge_version(key: &[u8]) -> MetaResult<SchemaVersion> {
    parse_edge_key(key).map(|(_, _, version)| version)
}

/// Schema stored in an edge schema value.
///
/// # Errors
///
/// Returns [`MetaError::Core`] if the payload is corrupt.
pub fn parse_edge_schema(val: &[u8]) -> MetaResult<SchemaDescriptor> {
    Ok(SchemaDescriptor::decode(val)?)
}

// Name index

/// Prefix covering every index entry of `entry`.
#[must_use]
pub fn index_prefix(entry: EntryType) -> Vec<u8> {
    let mut prefix = with_table(INDEX_TABLE, 4);
    prefix.extend_from_slice(&entry.code().to_be_bytes());
    prefix
}

/// Key mapping `name` to an id of kind `entry`.
#[must_use]
pub fn index_key(entry: EntryType, name: &str) -> Vec<u8> {
    assemble_segment_key(&index_prefix(entry), name.as_bytes())
}

/// Key mapping a tag or edge `name` to its id within `space`.
///
/// Tag and edge names are only unique within a space, so the space id is
/// part of the indexed name.
#[must_use]
pub fn schema_index_key(entry: EntryType, space: GraphSpaceId, name: &str) -> Vec<u8> {
    assemble_segment_key(&schema_index_prefix(entry, space), name.as_bytes())
}

/// Prefix covering every tag or edge name index entry of `space`.
#[must_use]
pub fn schema_index_prefix(entry: EntryType, space: GraphSpaceId) -> Vec<u8> {
    assemble_segment_key(&index_prefix(entry), &space.to_be_bytes())
}

/// Entry type and name of an index key.
///
/// For tag and edge entries the returned name still carries the 4-byte space
/// id in front; use [`parse_schema_index_key`] for those.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not an index key.
pub fn parse_index_key(key: &[u8]) -> MetaResult<(EntryType, &[u8])> {
    let mut fields = Fields::key(key, INDEX_TABLE, "index")?;
    let entry = EntryType::try_from(fields.i32()?)?;
    Ok((entry, fields.rest()))
}

/// Entry type, space and name of a tag or edge index key.
///
/// # Errors
///
/// Returns [`MetaError::MalformedKey`] if `key` is not a tag or edge index key.
pub fn parse_schema_index_key(key: &[u8]) -> MetaResult<(EntryType, GraphSpaceId, &str)> {
    let mut fields = Fields::key(key, INDEX_TABLE, "index")?;
    let entry = EntryType::try_from(fields.i32()?)?;
    if entry == EntryType::Space {
        return Err(MetaError::MalformedKey("index: space entries are not space-scoped".into()));
    }
    let space = fields.i32()?;
    let name = fields.utf8(fields.bytes)?;
    Ok((entry, space, name))
}

/// Value of an index entry: the id the name maps to.
#[must_use]
pub fn index_val(id: i32) -> Vec<u8> {
    id.to_be_bytes().to_vec()
}

/// Id stored in an index entry.
///
/// # Errors
///
/// Returns [`MetaError::MalformedValue`] unless the value is exactly 4 bytes.
pub fn parse_index_val(val: &[u8]) -> MetaResult<i32> {
    let mut fields = Fields::value(val, "index");
    let id = fields.i32()?;
    fields.finish()?;
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nimbus_core::ScalarKind;

    use super::*;

    fn person() -> SchemaDescriptor {
        SchemaDescriptor::builder()
            .column("name", ScalarKind::String)
            .column("age", ScalarKind::Int64)
            .build()
            .unwrap()
    }

    fn host(last: u8, port: u32) -> HostAddr {
        HostAddr::new(Ipv4Addr::new(192, 168, 0, last), port)
    }

    #[test]
    fn space_key_layout() {
        let key = space_key(1);
        assert_eq!(key, b"__spaces__\x00\x00\x00\x01");
        assert!(key.starts_with(space_prefix()));
        assert_eq!(parse_space_id(&key).unwrap(), 1);
    }

    #[test]
    fn space_value_roundtrip() {
        let val = space_val(100, 3, "default_space");
        assert_eq!(&val[..8], &[0, 0, 0, 100, 0, 0, 0, 3]);
        assert_eq!(parse_space_name(&val).unwrap(), "default_space");
        assert_eq!(parse_space_val(&val).unwrap(), SpaceProperties::new("default_space", 100, 3));
    }

    #[test]
    fn space_value_with_empty_name() {
        assert_eq!(parse_space_name(&space_val(1, 1, "")).unwrap(), "");
    }

    #[test]
    fn short_space_value_is_malformed() {
        assert!(matches!(parse_space_name(&[0, 0, 0, 1]), Err(MetaError::MalformedValue(_))));
        assert!(matches!(parse_space_val(&[0; 7]), Err(MetaError::MalformedValue(_))));
    }

    #[test]
    fn space_id_rejects_other_tables() {
        assert!(matches!(parse_space_id(&part_key(1, 1)), Err(MetaError::MalformedKey(_))));
        assert!(matches!(parse_space_id(b"__spaces__\x00"), Err(MetaError::MalformedKey(_))));
    }

    #[test]
    fn part_key_layout() {
        let key = part_key(1, 2);
        assert_eq!(key, b"__parts__\x00\x00\x00\x01\x00\x00\x00\x02");
        assert!(key.starts_with(&part_prefix(1)));
        assert!(!key.starts_with(&part_prefix(2)));
        assert_eq!(parse_part_key(&key).unwrap(), (1, 2));
    }

    #[test]
    fn part_value_preserves_host_order() {
        let hosts = vec![host(3, 8000), host(1, 8001), host(2, 8002)];
        let val = part_val(&hosts);
        assert_eq!(val.len(), 3 * HOST_UNIT_SIZE);
        assert_eq!(parse_part_val(&val).unwrap(), hosts);
    }

    #[test]
    fn empty_part_value() {
        assert!(parse_part_val(&part_val(&[])).unwrap().is_empty());
    }

    #[test]
    fn part_value_of_odd_length_is_malformed() {
        let mut val = part_val(&[host(1, 1), host(2, 2)]);
        val.pop();
        assert!(matches!(parse_part_val(&val), Err(MetaError::MalformedValue(_))));
        assert!(matches!(parse_part_val(&[0; 12]), Err(MetaError::MalformedValue(_))));
    }

    #[test]
    fn host_key_layout() {
        let h = host(7, 0x0102_0304);
        let key = host_key(h);
        assert_eq!(&key[HOSTS_TABLE.len()..], &[192, 168, 0, 7, 1, 2, 3, 4]);
        assert!(key.starts_with(host_prefix()));
        assert_eq!(parse_host_key(&key).unwrap(), h);
        assert!(host_val().is_empty());
    }

    #[test]
    fn host_keys_order_by_address() {
        assert!(host_key(host(1, 9000)) < host_key(host(2, 1)));
        assert!(host_key(host(1, 1)) < host_key(host(1, 2)));
    }

    #[test]
    fn newer_tag_versions_sort_first() {
        let v5 = schema_tag_key(1, 2, 5);
        let v3 = schema_tag_key(1, 2, 3);
        assert!(v5 < v3);
        assert_eq!(parse_tag_version(&v5).unwrap(), 5);
        assert_eq!(parse_tag_version(&v3).unwrap(), 3);
    }

    #[test]
    fn tag_versions_descend_across_byte_boundaries() {
        let versions = [0i64, 1, 255, 256, 65_536, i64::from(i32::MAX), i64::MAX];
        let keys: Vec<_> = versions.iter().map(|&v| schema_tag_key(1, 1, v)).collect();
        for pair in keys.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn tag_key_roundtrip() {
        let key = schema_tag_key(4, 9, 12);
        assert!(key.starts_with(&schema_tag_prefix(4, 9)));
        assert!(key.starts_with(&schema_tags_prefix(4)));
        assert!(!key.starts_with(&schema_tags_prefix(5)));
        assert_eq!(parse_tag_key(&key).unwrap(), (4, 9, 12));
    }

    #[test]
    fn tag_value_roundtrip() {
        let val = schema_tag_val("person", &person()).unwrap();
        assert_eq!(&val[..4], &[0, 0, 0, 6]);
        assert_eq!(parse_tag_name(&val).unwrap(), "person");
        assert_eq!(parse_tag_schema(&val).unwrap(), person());
    }

    #[test]
    fn tag_value_with_overlong_name_length_is_malformed() {
        let mut val = schema_tag_val("person", &person()).unwrap();
        val[..4].copy_from_slice(&1000i32.to_be_bytes());
        assert!(matches!(parse_tag_name(&val), Err(MetaError::MalformedValue(_))));

        val[..4].copy_from_slice(&(-1i32).to_be_bytes());
        assert!(matches!(parse_tag_schema(&val), Err(MetaError::MalformedValue(_))));
    }

    #[test]
    fn corrupt_tag_schema_is_a_core_error() {
        let mut val = schema_tag_val("t", &SchemaDescriptor::empty()).unwrap();
        val.extend_from_slice(&[0xFF; 3]);
        assert!(matches!(parse_tag_schema(&val), Err(MetaError::Core(_))));
    }

    #[test]
    fn edge_versions_ascend() {
        let v3 = schema_edge_key(1, 2, 3);
        let v5 = schema_edge_key(1, 2, 5);
        assert!(v3 < v5);
        assert_eq!(parse_edge_version(&v5).unwrap(), 5);
        assert_eq!(parse_edge_key(&v3).unwrap(), (1, 2, 3));
        assert!(v3.starts_with(&schema_edge_prefix(1, 2)));
        assert!(v3.starts_with(&schema_edges_prefix(1)));
    }

    #[test]
    fn edge_value_is_schema_only() {
        let val = schema_edge_val(&person()).unwrap();
        assert_eq!(val, person().encode().unwrap());
        assert_eq!(parse_edge_schema(&val).unwrap(), person());
    }

    #[test]
    fn tag_and_edge_keys_do_not_collide() {
        assert_ne!(schema_tag_key(1, 1, 1), schema_edge_key(1, 1, 1));
        assert!(parse_edge_key(&schema_tag_key(1, 1, 1)).is_err());
        assert!(parse_tag_key(&schema_edge_key(1, 1, 1)).is_err());
    }

    #[test]
    fn index_key_layout() {
        let key = index_key(EntryType::Space, "default");
        assert_eq!(key, b"__index__\x00\x00\x00\x01default");
        assert!(key.starts_with(&index_prefix(EntryType::Space)));
        let (entry, name) = parse_index_key(&key).unwrap();
        assert_eq!(entry, EntryType::Space);
        assert_eq!(name, b"default");
    }

    #[test]
    fn schema_index_key_is_space_scoped() {
        let key = schema_index_key(EntryType::Tag, 3, "person");
        assert!(key.starts_with(&schema_index_prefix(EntryType::Tag, 3)));
        assert!(!key.starts_with(&schema_index_prefix(EntryType::Tag, 4)));
        assert!(!key.starts_with(&schema_index_prefix(EntryType::Edge, 3)));
        assert_eq!(parse_schema_index_key(&key).unwrap(), (EntryType::Tag, 3, "person"));
        assert!(parse_schema_index_key(&index_key(EntryType::Space, "s")).is_err());
    }

    #[test]
    fn index_key_with_unknown_entry_is_malformed() {
        let key = assemble_segment_key(INDEX_TABLE, &9i32.to_be_bytes());
        assert!(matches!(parse_index_key(&key), Err(MetaError::MalformedKey(_))));
    }

    #[test]
    fn index_value_roundtrip() {
        assert_eq!(parse_index_val(&index_val(-7)).unwrap(), -7);
        assert!(matches!(parse_index_val(&[0, 0, 1]), Err(MetaError::MalformedValue(_))));
        assert!(matches!(parse_index_val(&[0; 5]), Err(MetaError::MalformedValue(_))));
    }

    #[test]
    fn segment_key_concatenates() {
        assert_eq!(assemble_segment_key(b"seg", b"key"), b"segkey");
        assert_eq!(assemble_segment_key(b"", b"key"), b"key");
    }
}
