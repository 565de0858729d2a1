//! Nimbus Query
//!
//! The unit of data passed between traversal pipeline steps.
//!
//! # Overview
//!
//! An [`InterimResult`] is either a bare frontier of vertex ids or a
//! schema-bound [`RowSet`](nimbus_core::RowSet). Later steps pull vertex id
//! columns out of it, materialize it into [`RowValue`] wire records for a
//! client, or build an [`InterimResultIndex`] to look rows up by vertex id.
//!
//! # Example
//!
//! ```
//! use nimbus_core::{ScalarKind, SchemaDescriptor, Variant};
//! use nimbus_query::{ColumnValue, InterimResult, RowValue};
//!
//! let schema = SchemaDescriptor::builder()
//!     .column("id", ScalarKind::Int64)
//!     .column("name", ScalarKind::String)
//!     .build()
//!     .unwrap()
//!     .into_shared();
//!
//! let rows = vec![
//!     RowValue::new(vec![ColumnValue::Integer(1), ColumnValue::Str("Tom".into())]),
//!     RowValue::new(vec![ColumnValue::Integer(2), ColumnValue::Str("Lucy".into())]),
//! ];
//! let result = InterimResult::from_rows(schema, &rows).unwrap();
//! assert_eq!(result.get_vids("id").unwrap(), vec![1, 2]);
//!
//! let index = result.build_index("id").unwrap();
//! assert_eq!(index.lookup(2, "name").unwrap(), &Variant::from("Lucy"));
//! ```

#![deny(clippy::unwrap_used)]

pub mod error;
pub mod interim;
pub mod wire;

pub use error::{InterimError, QueryResult};
pub use interim::{InterimResult, InterimResultIndex};
pub use wire::{decode_rows, encode_rows, ColumnValue, RowValue};
