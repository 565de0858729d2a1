//! Nimbus Core
//!
//! The binary data-representation core shared by the query pipeline and the
//! metadata service.
//!
//! # Overview
//!
//! - **Values**: [`Variant`], a closed union over 64-bit integers, doubles,
//!   booleans and strings, tagged by [`ScalarKind`]
//! - **Schemas**: [`SchemaDescriptor`], the ordered `(name, kind)` list used to
//!   interpret encoded rows, shared as a [`SharedSchema`]
//! - **Casts**: [`cast()`] applies the fixed coercion matrix between kinds
//! - **Rows**: [`RowSetWriter`] and [`RowSet`] encode and lazily decode
//!   schema-bound rows
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nimbus_core::{RowSetWriter, ScalarKind, SchemaDescriptor, Variant};
//!
//! let schema = Arc::new(
//!     SchemaDescriptor::builder()
//!         .column("name", ScalarKind::String)
//!         .column("age", ScalarKind::Int64)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let mut writer = RowSetWriter::new(Arc::clone(&schema));
//! writer.add_values(&[Variant::from("Tom"), Variant::from(22i64)]).unwrap();
//! let rows = writer.finish();
//!
//! let first = rows.iter().next().unwrap().unwrap();
//! assert_eq!(first.get_by_name("age").unwrap(), Variant::Int64(22));
//!
//! // Casting follows the fixed matrix, including the empty-string rule.
//! assert_eq!(Variant::from("").cast(ScalarKind::Bool).unwrap(), Variant::Bool(true));
//! ```
//!
//! # Modules
//!
//! - [`types`] - [`Variant`], [`ScalarKind`] and [`SchemaDescriptor`]
//! - [`cast`] - the coercion matrix
//! - [`encoding`] - the row codec and compact schema serialization
//! - [`error`] - [`CoreError`] and [`CastError`]

#![deny(clippy::unwrap_used)]

pub mod cast;
pub mod encoding;
pub mod error;
pub mod types;

pub use cast::{cast, cast_to_code};
pub use encoding::row::{RowIter, RowReader, RowSet, RowSetWriter, RowWriter};
pub use encoding::{Decoder, Encoder};
pub use error::{CastError, CoreError};
pub use types::{
    ColumnDef, Row, ScalarKind, SchemaBuilder, SchemaDescriptor, SharedSchema, Variant, VertexId,
};
