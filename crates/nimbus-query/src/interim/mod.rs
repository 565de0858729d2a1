//! Interim results passed between pipeline steps.
//!
//! An [`InterimResult`] has exactly one of two shapes, fixed at construction:
//!
//! - **Frontier**: the vertex ids reached by a traversal step, no schema.
//! - **Table**: a schema plus an encoded row set, decoded on demand.
//!
//! Both shapes are immutable once built. A table result can be indexed by one
//! of its vertex id columns with [`InterimResult::build_index`].

mod index;

use std::collections::HashSet;

use nimbus_core::{RowSet, RowSetWriter, SharedSchema, VertexId};
use tracing::{debug, trace};

use crate::error::{InterimError, QueryResult};
use crate::wire::{ColumnValue, RowValue};

pub use index::InterimResultIndex;

/// The unit of data passed between pipeline steps.
#[derive(Debug, Clone)]
pub enum InterimResult {
    /// A traversal frontier: vertex ids with no schema.
    Frontier(Vec<VertexId>),
    /// Schema-bound rows.
    Table(RowSet),
}

impl InterimResult {
    /// Wrap a frontier of vertex ids.
    #[must_use]
    pub const fn from_vids(vids: Vec<VertexId>) -> Self {
        Self::Frontier(vids)
    }

    /// Wrap an encoded row set.
    #[must_use]
    pub const fn from_row_set(rows: RowSet) -> Self {
        Self::Table(rows)
    }

    /// Re-encode wire rows, for example ones received from a remote step.
    ///
    /// Every row must have one value per column, each of the column's kind.
    ///
    /// # Errors
    ///
    /// Returns [`InterimError::RowMismatch`] for the first row that does not
    /// fit the schema. No partial result is produced.
    pub fn from_rows(schema: SharedSchema, rows: &[RowValue]) -> QueryResult<Self> {
        let mut writer = RowSetWriter::new(schema);
        for (pos, row) in rows.iter().enumerate() {
            let schema = writer.schema();
            if row.len() != schema.len() {
                return Err(InterimError::RowMismatch {
                    row: pos,
                    reason: format!("{} values for {} columns", row.len(), schema.len()),
                });
            }
            let mut out = writer.row_writer();
            for (col, value) in schema.iter().zip(row.columns()) {
                if value.kind() != col.kind {
                    return Err(InterimError::RowMismatch {
                        row: pos,
                        reason: format!(
                            "column `{}' expects {}, got {}",
                            col.name,
                            col.kind,
                            value.kind()
                        ),
                    });
                }
                match value {
                    ColumnValue::Integer(v) => out.write_int(*v),
                    ColumnValue::DoublePrecision(v) => out.write_double(*v),
                    ColumnValue::BoolVal(v) => out.write_bool(*v),
                    ColumnValue::Str(v) => out.write_str(v),
                };
            }
            writer.add_row(out)?;
        }
        Ok(Self::Table(writer.finish()))
    }

    /// The schema of a table result.
    #[must_use]
    pub fn schema(&self) -> Option<&SharedSchema> {
        self.row_set().map(RowSet::schema)
    }

    /// The rows of a table result.
    #[must_use]
    pub const fn row_set(&self) -> Option<&RowSet> {
        match self {
            Self::Frontier(_) => None,
            Self::Table(rows) => Some(rows),
        }
    }

    /// Returns true for a frontier result.
    #[must_use]
    pub const fn is_frontier(&self) -> bool {
        matches!(self, Self::Frontier(_))
    }

    /// Number of vertex ids or rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Frontier(vids) => vids.len(),
            Self::Table(rows) => rows.len(),
        }
    }

    /// Returns true if there are no vertex ids or rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn vid_column(rows: &RowSet, column: &str) -> QueryResult<usize> {
        let schema = rows.schema();
        match schema.index_of(column) {
            Some(index) if schema.columns()[index].kind.is_vertex_id() => Ok(index),
            _ => Err(InterimError::ColumnNotFound(column.to_owned())),
        }
    }

    fn table_vids<'a>(
        rows: &'a RowSet,
        column: &str,
    ) -> QueryResult<impl Iterator<Item = QueryResult<VertexId>> + 'a> {
        let index = Self::vid_column(rows, column)?;
        Ok(rows.iter().map(move |row| -> QueryResult<VertexId> { Ok(row?.get_int(index)?) }))
    }

    /// The vertex ids in `column`, one per row, in row order.
    ///
    /// A frontier result returns its ids as-is and ignores `column`.
    ///
    /// # Errors
    ///
    /// Returns [`InterimError::ColumnNotFound`] if a table result has no such
    /// column or it does not hold vertex ids.
    pub fn get_vids(&self, column: &str) -> QueryResult<Vec<VertexId>> {
        match self {
            Self::Frontier(vids) => {
                trace!(column, "frontier result ignores the requested column");
                Ok(vids.clone())
            }
            Self::Table(rows) => Self::table_vids(rows, column)?.collect(),
        }
    }

    /// The distinct vertex ids in `column`, in no particular order.
    ///
    /// A frontier result is deduplicated too and ignores `column`.
    ///
    /// # Errors
    ///
    /// As for [`get_vids`](Self::get_vids).
    pub fn get_distinct_vids(&self, column: &str) -> QueryResult<Vec<VertexId>> {
        let uniq: HashSet<VertexId> = match self {
            Self::Frontier(vids) => {
                trace!(column, "frontier result ignores the requested column");
                vids.iter().copied().collect()
            }
            Self::Table(rows) => Self::table_vids(rows, column)?.collect::<QueryResult<_>>()?,
        };
        Ok(uniq.into_iter().collect())
    }

    /// Materialize every row as a wire record, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`InterimError::NoSchema`] for a frontier result and
    /// [`InterimError::Codec`] if the row bytes are corrupt.
    pub fn get_rows(&self) -> QueryResult<Vec<RowValue>> {
        let rows = self.row_set().ok_or(InterimError::NoSchema)?;
        rows.iter()
            .map(|row| -> QueryResult<RowValue> {
                let values = row?.to_row()?;
                Ok(RowValue::new(values.into_iter().map(ColumnValue::from).collect()))
            })
            .collect()
    }

    /// Index the rows by the vertex ids in `vid_column`.
    ///
    /// If several rows hold the same id, the last one wins.
    ///
    /// # Errors
    ///
    /// Returns [`InterimError::NoSchema`] for a frontier result,
    /// [`InterimError::ColumnNotFound`] if the column is absent and
    /// [`InterimError::NotVertexIdColumn`] if it does not hold vertex ids.
    pub fn build_index(&self, vid_column: &str) -> QueryResult<InterimResultIndex> {
        let rows = self.row_set().ok_or(InterimError::NoSchema)?;
        let schema = rows.schema();
        let vid_index = schema
            .index_of(vid_column)
            .ok_or_else(|| InterimError::ColumnNotFound(vid_column.to_owned()))?;
        let kind = schema.columns()[vid_index].kind;
        if !kind.is_vertex_id() {
            return Err(InterimError::NotVertexIdColumn { column: vid_column.to_owned(), kind });
        }

        let index = InterimResultIndex::build(rows, vid_index)?;
        debug!(
            column = vid_column,
            rows = index.row_count(),
            vids = index.vid_count(),
            "built interim result index"
        );
        Ok(index)
    }
}

impl From<Vec<VertexId>> for InterimResult {
    fn from(vids: Vec<VertexId>) -> Self {
        Self::from_vids(vids)
    }
}

impl From<RowSet> for InterimResult {
    fn from(rows: RowSet) -> Self {
        Self::from_row_set(rows)
    }
}
