//! Redb table definitions.

use redb::TableDefinition;

/// Name of the physical table used when none is configured.
pub const DEFAULT_TABLE: &str = "nimbus_meta";

/// The definition of the physical table named `name`.
///
/// Keys and values are raw bytes; ordering is plain byte order.
#[must_use]
pub const fn table(name: &str) -> TableDefinition<'_, &'static [u8], &'static [u8]> {
    TableDefinition::new(name)
}
