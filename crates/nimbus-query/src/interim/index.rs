//! Vertex id index over a table result.

use std::collections::HashMap;

use nimbus_core::{Row, RowSet, Variant, VertexId};

use crate::error::{InterimError, QueryResult};

/// Rows of a table result, addressable by vertex id and column name.
///
/// Built in one pass by [`InterimResult::build_index`](super::InterimResult::build_index)
/// and immutable afterwards. Rebuild it if the underlying result changes.
#[derive(Debug, Clone)]
pub struct InterimResultIndex {
    rows: Vec<Row>,
    column_to_index: HashMap<String, usize>,
    vid_to_row: HashMap<VertexId, usize>,
}

impl InterimResultIndex {
    pub(super) fn build(rows: &RowSet, vid_index: usize) -> QueryResult<Self> {
        let column_to_index = rows
            .schema()
            .iter()
            .enumerate()
            .map(|(i, col)| (col.name.clone(), i))
            .collect();

        let mut decoded = Vec::with_capacity(rows.len());
        let mut vid_to_row = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            let row = row?.to_row()?;
            if let Some(vid) = row.get(vid_index).and_then(Variant::as_int) {
                // Last row wins for repeated ids.
                vid_to_row.insert(vid, pos);
            }
            decoded.push(row);
        }

        Ok(Self { rows: decoded, column_to_index, vid_to_row })
    }

    /// The value of `column` in the row indexed under `vid`.
    ///
    /// # Errors
    ///
    /// Returns [`InterimError::VertexNotIndexed`] if no row holds `vid` and
    /// [`InterimError::ColumnNotFound`] if there is no such column.
    pub fn lookup(&self, vid: VertexId, column: &str) -> QueryResult<&Variant> {
        let row = self.row(vid).ok_or(InterimError::VertexNotIndexed(vid))?;
        let index = self
            .column_index(column)
            .ok_or_else(|| InterimError::ColumnNotFound(column.to_owned()))?;
        row.get(index).ok_or_else(|| InterimError::ColumnNotFound(column.to_owned()))
    }

    /// The whole row indexed under `vid`.
    #[must_use]
    pub fn row(&self, vid: VertexId) -> Option<&Row> {
        self.vid_to_row.get(&vid).and_then(|&pos| self.rows.get(pos))
    }

    /// Returns true if some row holds `vid`.
    #[must_use]
    pub fn contains_vid(&self, vid: VertexId) -> bool {
        self.vid_to_row.contains_key(&vid)
    }

    /// Position of `column` in the schema.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_to_index.get(column).copied()
    }

    /// Number of rows decoded into the index.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct vertex ids indexed.
    #[must_use]
    pub fn vid_count(&self) -> usize {
        self.vid_to_row.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nimbus_core::{RowSetWriter, ScalarKind, SchemaDescriptor};

    use crate::InterimResult;

    use super::*;

    fn friends() -> InterimResult {
        let schema = SchemaDescriptor::builder()
            .column("name", ScalarKind::String)
            .column("vid", ScalarKind::Int64)
            .column("close", ScalarKind::Bool)
            .build()
            .unwrap()
            .into_shared();
        let mut writer = RowSetWriter::new(schema);
        for (name, vid, close) in [("Tom", 1i64, true), ("Lucy", 2, false), ("Tim", 1, false)] {
            writer
                .add_values(&[Variant::from(name), Variant::from(vid), Variant::from(close)])
                .unwrap();
        }
        InterimResult::from_row_set(writer.finish())
    }

    #[test]
    fn lookup_by_vid_and_column() {
        let index = friends().build_index("vid").unwrap();
        assert_eq!(index.lookup(2, "name").unwrap(), &Variant::from("Lucy"));
        assert_eq!(index.lookup(2, "close").unwrap(), &Variant::Bool(false));
        assert_eq!(index.column_index("close"), Some(2));
        assert_eq!(index.row_count(), 3);
    }

    #[test]
    fn repeated_vid_keeps_last_row() {
        let index = friends().build_index("vid").unwrap();
        assert_eq!(index.lookup(1, "name").unwrap(), &Variant::from("Tim"));
        assert_eq!(index.vid_count(), 2);
    }

    #[test]
    fn missing_keys_are_errors() {
        let index = friends().build_index("vid").unwrap();
        assert!(!index.contains_vid(9));
        assert!(index.row(9).is_none());
        assert_eq!(index.lookup(9, "name"), Err(InterimError::VertexNotIndexed(9)));
        assert_eq!(index.lookup(1, "age"), Err(InterimError::ColumnNotFound("age".into())));
    }
}
