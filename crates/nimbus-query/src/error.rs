//! Error types for interim result operations.

use nimbus_core::{CoreError, ScalarKind, VertexId};
use thiserror::Error;

/// Errors that can occur when querying interim results.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterimError {
    /// The schema has no such column, or it does not hold vertex ids.
    #[error("column `{0}' not found")]
    ColumnNotFound(String),

    /// An index was requested over a column that does not hold vertex ids.
    #[error("column `{column}' holds {kind} values, not vertex ids")]
    NotVertexIdColumn {
        /// The requested column.
        column: String,
        /// Its declared kind.
        kind: ScalarKind,
    },

    /// The operation needs a schema but the result is a bare frontier.
    #[error("frontier results carry no schema")]
    NoSchema,

    /// No indexed row holds this vertex id.
    #[error("vertex {0} is not in the index")]
    VertexNotIndexed(VertexId),

    /// An incoming wire row does not fit the schema.
    #[error("row {row} does not match the schema: {reason}")]
    RowMismatch {
        /// Position of the offending row.
        row: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Row bytes could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CoreError),
}

/// Result type for interim result operations.
pub type QueryResult<T> = Result<T, InterimError>;
