//! Metadata identifiers and records.

use std::fmt;
use std::net::Ipv4Addr;

use nimbus_core::SchemaDescriptor;
use serde::{Deserialize, Serialize};

use crate::error::MetaError;

/// Identifier of a graph space.
pub type GraphSpaceId = i32;
/// Identifier of a partition within a space.
pub type PartitionId = i32;
/// Identifier of a tag within a space.
pub type TagId = i32;
/// Identifier of an edge type within a space.
pub type EdgeType = i32;
/// Version of a tag or edge schema.
pub type SchemaVersion = i64;

/// Address of a storage host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HostAddr {
    /// IPv4 address.
    pub ip: Ipv4Addr,
    /// Port.
    pub port: u32,
}

impl HostAddr {
    /// Create a host address.
    #[must_use]
    pub const fn new(ip: Ipv4Addr, port: u32) -> Self {
        Self { ip, port }
    }
}

impl fmt::Display for HostAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// The kind of entity a name index entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum EntryType {
    /// A graph space.
    Space = 1,
    /// A tag.
    Tag = 2,
    /// An edge type.
    Edge = 3,
}

impl EntryType {
    /// The wire code stored in index keys.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for EntryType {
    type Error = MetaError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Space),
            2 => Ok(Self::Tag),
            3 => Ok(Self::Edge),
            other => Err(MetaError::MalformedKey(format!("unknown index entry type {other}"))),
        }
    }
}

/// The stored properties of a graph space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceProperties {
    /// Space name, unique across the cluster.
    pub name: String,
    /// Number of partitions.
    pub partition_num: i32,
    /// Replicas per partition.
    pub replica_factor: i32,
}

impl SpaceProperties {
    /// Create space properties.
    pub fn new(name: impl Into<String>, partition_num: i32, replica_factor: i32) -> Self {
        Self { name: name.into(), partition_num, replica_factor }
    }
}

/// A named, versioned tag or edge schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaItem {
    /// Tag id or edge type.
    pub id: i32,
    /// Tag or edge name.
    pub name: String,
    /// Schema version.
    pub version: SchemaVersion,
    /// Field layout.
    pub schema: SchemaDescriptor,
}
