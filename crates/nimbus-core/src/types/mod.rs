//! Core data types.

mod schema;
mod variant;

pub use schema::{ColumnDef, SchemaBuilder, SchemaDescriptor, SharedSchema};
pub use variant::{Row, ScalarKind, Variant, VertexId};
