//! The row codec.
//!
//! # Format
//!
//! A row is the concatenation of its fields in schema order, with no type
//! tags. Each field is laid out according to the kind the schema declares for
//! its position:
//!
//! - `Int64`: 8 bytes (big-endian i64)
//! - `Double`: 8 bytes (big-endian IEEE 754 bits)
//! - `Bool`: 1 byte, `0x00` or `0x01`
//! - `String`: 4 bytes length (big-endian u32) + UTF-8 bytes
//!
//! Byte order is fixed rather than host-native, so rows written on one
//! platform decode on any other. Rows from a host-native writer do not.
//!
//! A row set is a sequence of rows, each framed by a 4-byte big-endian length:
//!
//! ```text
//! [len: u32][row bytes] [len: u32][row bytes] ...
//! ```
//!
//! # Decoding
//!
//! [`RowSet::iter`] returns a forward-only cursor. Fields are decoded only when
//! asked for, and any number of independent cursors may walk the same buffer.
//! Because [`ScalarKind`] is a closed enum, every schema the codec can be
//! handed is decodable; the only decode failures are truncated or corrupt
//! bytes.

use std::sync::Arc;

use crate::error::CoreError;
use crate::types::{Row, ScalarKind, SchemaDescriptor, SharedSchema, Variant};

/// Size of the per-row length frame.
const ROW_FRAME_LEN: usize = 4;

fn encode_len(len: usize, what: &str) -> Result<[u8; 4], CoreError> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| CoreError::Encoding(format!("{what} too long: {len} bytes")))
}

fn read_array<const N: usize>(
    data: &[u8],
    offset: usize,
    what: &str,
) -> Result<[u8; N], CoreError> {
    data.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| CoreError::truncated(what))
}

fn read_len(data: &[u8], offset: usize, what: &str) -> Result<usize, CoreError> {
    let len = u32::from_be_bytes(read_array::<4>(data, offset, what)?);
    usize::try_from(len).map_err(|_| CoreError::Encoding(format!("{what} length overflow")))
}

/// Returns the encoded width of the field of `kind` starting at `offset`.
fn field_width(kind: ScalarKind, data: &[u8], offset: usize) -> Result<usize, CoreError> {
    match kind {
        ScalarKind::Int64 | ScalarKind::Double => Ok(8),
        ScalarKind::Bool => Ok(1),
        ScalarKind::String => Ok(4 + read_len(data, offset, "string length")?),
    }
}

/// Decodes the field of `kind` at `offset`, returning it with its width.
fn read_field(kind: ScalarKind, data: &[u8], offset: usize) -> Result<(Variant, usize), CoreError> {
    match kind {
        ScalarKind::Int64 => {
            let bytes = read_array::<8>(data, offset, "Int64 field")?;
            Ok((Variant::Int64(i64::from_be_bytes(bytes)), 8))
        }
        ScalarKind::Double => {
            let bytes = read_array::<8>(data, offset, "Double field")?;
            Ok((Variant::Double(f64::from_be_bytes(bytes)), 8))
        }
        ScalarKind::Bool => {
            let [b] = read_array::<1>(data, offset, "Bool field")?;
            Ok((Variant::Bool(b != 0), 1))
        }
        ScalarKind::String => {
            let len = read_len(data, offset, "string length")?;
            let start = offset + 4;
            let bytes = data
                .get(start..start + len)
                .ok_or_else(|| CoreError::truncated("String field"))?;
            let s = std::str::from_utf8(bytes)
                .map_err(|e| CoreError::Encoding(format!("invalid UTF-8 in String field: {e}")))?;
            Ok((Variant::String(s.to_owned()), 4 + len))
        }
    }
}

/// Encodes one row.
///
/// Values are appended in schema order. The writer trusts its caller to
/// append exactly one value per field with the declared kind; this is only
/// checked in debug builds.
#[derive(Debug, Clone)]
pub struct RowWriter {
    schema: SharedSchema,
    buf: Vec<u8>,
    written: usize,
    error: Option<CoreError>,
}

impl RowWriter {
    /// Creates a writer for a row of `schema`.
    #[must_use]
    pub fn new(schema: SharedSchema) -> Self {
        Self { schema, buf: Vec::new(), written: 0, error: None }
    }

    fn expect_kind(&mut self, kind: ScalarKind) {
        debug_assert_eq!(
            self.schema.column(self.written).map(|c| c.kind),
            Some(kind),
            "value {} does not match the schema",
            self.written
        );
        self.written += 1;
    }

    /// Appends an `Int64` field.
    pub fn write_int(&mut self, v: i64) -> &mut Self {
        self.expect_kind(ScalarKind::Int64);
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Appends a `Double` field.
    pub fn write_double(&mut self, v: f64) -> &mut Self {
        self.expect_kind(ScalarKind::Double);
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Appends a `Bool` field.
    pub fn write_bool(&mut self, v: bool) -> &mut Self {
        self.expect_kind(ScalarKind::Bool);
        self.buf.push(u8::from(v));
        self
    }

    /// Appends a `String` field.
    pub fn write_str(&mut self, v: &str) -> &mut Self {
        self.expect_kind(ScalarKind::String);
        match encode_len(v.len(), "string") {
            Ok(len) => {
                self.buf.extend_from_slice(&len);
                self.buf.extend_from_slice(v.as_bytes());
            }
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Appends a value, dispatching on its kind.
    pub fn write(&mut self, value: &Variant) -> &mut Self {
        match value {
            Variant::Int64(v) => self.write_int(*v),
            Variant::Double(v) => self.write_double(*v),
            Variant::Bool(v) => self.write_bool(*v),
            Variant::String(v) => self.write_str(v),
        }
    }

    /// Returns the number of fields written so far.
    #[must_use]
    pub const fn fields_written(&self) -> usize {
        self.written
    }

    /// Finishes the row and returns its bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if a string did not fit its length field.
    pub fn finish(self) -> Result<Vec<u8>, CoreError> {
        debug_assert_eq!(self.written, self.schema.len(), "row is missing fields");
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.buf),
        }
    }
}

/// Encodes a sequence of rows sharing one schema.
#[derive(Debug, Clone)]
pub struct RowSetWriter {
    schema: SharedSchema,
    data: Vec<u8>,
    rows: usize,
}

impl RowSetWriter {
    /// Creates an empty row set writer.
    #[must_use]
    pub fn new(schema: SharedSchema) -> Self {
        Self::with_capacity(schema, 0)
    }

    /// Creates a writer whose buffer is pre-sized to `bytes`.
    #[must_use]
    pub fn with_capacity(schema: SharedSchema, bytes: usize) -> Self {
        Self { schema, data: Vec::with_capacity(bytes), rows: 0 }
    }

    /// Returns the schema rows are written against.
    #[must_use]
    pub fn schema(&self) -> &SharedSchema {
        &self.schema
    }

    /// Returns a fresh row writer for this set's schema.
    #[must_use]
    pub fn row_writer(&self) -> RowWriter {
        RowWriter::new(Arc::clone(&self.schema))
    }

    /// Appends a finished row.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the row could not be encoded.
    pub fn add_row(&mut self, row: RowWriter) -> Result<(), CoreError> {
        let bytes = row.finish()?;
        self.add_encoded(&bytes)
    }

    /// Appends a row given as values in schema order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the row could not be encoded.
    pub fn add_values(&mut self, values: &[Variant]) -> Result<(), CoreError> {
        let mut row = self.row_writer();
        for value in values {
            row.write(value);
        }
        self.add_row(row)
    }

    fn add_encoded(&mut self, bytes: &[u8]) -> Result<(), CoreError> {
        self.data.extend_from_slice(&encode_len(bytes.len(), "row")?);
        self.data.extend_from_slice(bytes);
        self.rows += 1;
        Ok(())
    }

    /// Returns the number of rows written.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if no rows were written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Finishes the set.
    #[must_use]
    pub fn finish(self) -> RowSet {
        RowSet { schema: self.schema, data: Arc::from(self.data), rows: self.rows }
    }
}

/// An encoded, immutable row set bound to its schema.
///
/// Cloning is cheap: the schema and the buffer are shared.
#[derive(Debug, Clone)]
pub struct RowSet {
    schema: SharedSchema,
    data: Arc<[u8]>,
    rows: usize,
}

impl RowSet {
    /// Wraps a buffer produced by a [`RowSetWriter`], for example one received
    /// from another process.
    ///
    /// Only the row framing is checked here; fields are validated as they are
    /// decoded.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the framing is truncated.
    pub fn from_parts(schema: SharedSchema, data: impl Into<Arc<[u8]>>) -> Result<Self, CoreError> {
        let data = data.into();
        let mut rows = 0;
        let mut pos = 0;
        while pos < data.len() {
            let len = read_len(&data, pos, "row length")?;
            pos += ROW_FRAME_LEN + len;
            if pos > data.len() {
                return Err(CoreError::truncated("row"));
            }
            rows += 1;
        }
        Ok(Self { schema, data, rows })
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &SharedSchema {
        &self.schema
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if the set has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns a new forward-only cursor over the rows.
    #[must_use]
    pub fn iter(&self) -> RowIter<'_> {
        RowIter { schema: &self.schema, data: &self.data, pos: 0 }
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = Result<RowReader<'a>, CoreError>;
    type IntoIter = RowIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only cursor over a [`RowSet`].
///
/// After yielding an error the cursor is exhausted.
#[derive(Debug, Clone)]
pub struct RowIter<'a> {
    schema: &'a SchemaDescriptor,
    data: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = Result<RowReader<'a>, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (data, pos) = (self.data, self.pos);
        if pos >= data.len() {
            return None;
        }
        let frame = read_len(data, pos, "row length").and_then(|len| {
            let start = pos + ROW_FRAME_LEN;
            data.get(start..start + len).ok_or_else(|| CoreError::truncated("row"))
        });
        match frame {
            Ok(row) => {
                self.pos = pos + ROW_FRAME_LEN + row.len();
                Some(Ok(RowReader { schema: self.schema, data: row }))
            }
            Err(e) => {
                self.pos = data.len();
                Some(Err(e))
            }
        }
    }
}

/// Lazy view of one encoded row.
#[derive(Debug, Clone, Copy)]
pub struct RowReader<'a> {
    schema: &'a SchemaDescriptor,
    data: &'a [u8],
}

impl<'a> RowReader<'a> {
    /// Returns the schema of this row.
    #[must_use]
    pub const fn schema(&self) -> &'a SchemaDescriptor {
        self.schema
    }

    /// Returns the raw row bytes.
    #[must_use]
    pub const fn raw(&self) -> &'a [u8] {
        self.data
    }

    fn offset_of(&self, index: usize) -> Result<(ScalarKind, usize), CoreError> {
        let kind = self
            .schema
            .column(index)
            .map(|c| c.kind)
            .ok_or(CoreError::ColumnOutOfRange { index, len: self.schema.len() })?;
        let mut offset = 0;
        for col in &self.schema.columns()[..index] {
            offset += field_width(col.kind, self.data, offset)?;
        }
        Ok((kind, offset))
    }

    fn index_of(&self, name: &str) -> Result<usize, CoreError> {
        self.schema.index_of(name).ok_or_else(|| CoreError::ColumnNotFound(name.to_owned()))
    }

    /// Decodes the field at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ColumnOutOfRange`] for a bad index, or
    /// [`CoreError::Encoding`] if the row bytes are corrupt.
    pub fn get(&self, index: usize) -> Result<Variant, CoreError> {
        let (kind, offset) = self.offset_of(index)?;
        read_field(kind, self.data, offset).map(|(v, _)| v)
    }

    /// Decodes the field named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ColumnNotFound`] if the schema has no such field.
    pub fn get_by_name(&self, name: &str) -> Result<Variant, CoreError> {
        self.get(self.index_of(name)?)
    }

    /// Decodes an `Int64` field by position.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeMismatch`] if the field is not `Int64`.
    pub fn get_int(&self, index: usize) -> Result<i64, CoreError> {
        match self.get(index)? {
            Variant::Int64(v) => Ok(v),
            other => Err(CoreError::type_mismatch("Int64", other.kind().name())),
        }
    }

    /// Decodes a `Double` field by position.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeMismatch`] if the field is not `Double`.
    pub fn get_double(&self, index: usize) -> Result<f64, CoreError> {
        match self.get(index)? {
            Variant::Double(v) => Ok(v),
            other => Err(CoreError::type_mismatch("Double", other.kind().name())),
        }
    }

    /// Decodes a `Bool` field by position.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeMismatch`] if the field is not `Bool`.
    pub fn get_bool(&self, index: usize) -> Result<bool, CoreError> {
        match self.get(index)? {
            Variant::Bool(v) => Ok(v),
            other => Err(CoreError::type_mismatch("Bool", other.kind().name())),
        }
    }

    /// Borrows a `String` field by position without copying it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TypeMismatch`] if the field is not `String`.
    pub fn get_str(&self, index: usize) -> Result<&'a str, CoreError> {
        let (kind, offset) = self.offset_of(index)?;
        if kind != ScalarKind::String {
            return Err(CoreError::type_mismatch("String", kind.name()));
        }
        let len = read_len(self.data, offset, "string length")?;
        let bytes = self
            .data
            .get(offset + 4..offset + 4 + len)
            .ok_or_else(|| CoreError::truncated("String field"))?;
        std::str::from_utf8(bytes)
            .map_err(|e| CoreError::Encoding(format!("invalid UTF-8 in String field: {e}")))
    }

    /// Decodes the vertex ID stored in the field named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ColumnNotFound`] if there is no such field and
    /// [`CoreError::TypeMismatch`] if it does not hold vertex IDs.
    pub fn get_vid(&self, name: &str) -> Result<i64, CoreError> {
        self.get_int(self.index_of(name)?)
    }

    /// Decodes every field in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the bytes are corrupt or do not
    /// match the schema length exactly.
    pub fn to_row(&self) -> Result<Row, CoreError> {
        let mut row = Vec::with_capacity(self.schema.len());
        let mut offset = 0;
        for col in self.schema {
            let (value, width) = read_field(col.kind, self.data, offset)?;
            row.push(value);
            offset += width;
        }
        if offset != self.data.len() {
            return Err(CoreError::Encoding(format!(
                "row has {} trailing bytes",
                self.data.len() - offset
            )));
        }
        Ok(row)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn person() -> SharedSchema {
        SchemaDescriptor::builder()
            .column("name", ScalarKind::String)
            .column("age", ScalarKind::Int64)
            .build()
            .unwrap()
            .into_shared()
    }

    fn all_kinds() -> SharedSchema {
        SchemaDescriptor::builder()
            .column("id", ScalarKind::Int64)
            .column("score", ScalarKind::Double)
            .column("alive", ScalarKind::Bool)
            .column("note", ScalarKind::String)
            .build()
            .unwrap()
            .into_shared()
    }

    fn tom_and_lucy() -> RowSet {
        let mut writer = RowSetWriter::new(person());
        writer.add_values(&["Tom".into(), 22i64.into()]).unwrap();
        writer.add_values(&["Lucy".into(), 8i64.into()]).unwrap();
        writer.finish()
    }

    #[test]
    fn encode_then_decode() {
        let rows = tom_and_lucy();
        assert_eq!(rows.len(), 2);

        let decoded: Vec<Row> = rows.iter().map(|r| r.unwrap().to_row().unwrap()).collect();
        assert_eq!(
            decoded,
            vec![
                vec![Variant::from("Tom"), Variant::Int64(22)],
                vec![Variant::from("Lucy"), Variant::Int64(8)],
            ]
        );
    }

    #[test]
    fn typed_row_writer() {
        let schema = all_kinds();
        let mut set = RowSetWriter::new(Arc::clone(&schema));
        let mut row = set.row_writer();
        row.write_int(7).write_double(0.5).write_bool(true).write_str("hi");
        assert_eq!(row.fields_written(), 4);
        set.add_row(row).unwrap();
        let rows = set.finish();

        let reader = rows.iter().next().unwrap().unwrap();
        assert_eq!(reader.get_int(0).unwrap(), 7);
        assert_eq!(reader.get_double(1).unwrap(), 0.5);
        assert!(reader.get_bool(2).unwrap());
        assert_eq!(reader.get_str(3).unwrap(), "hi");
    }

    #[test]
    fn lazy_field_access() {
        let rows = tom_and_lucy();
        let second = rows.iter().nth(1).unwrap().unwrap();
        assert_eq!(second.get_by_name("age").unwrap(), Variant::Int64(8));
        assert_eq!(second.get_vid("age").unwrap(), 8);
        assert_eq!(second.get_str(0).unwrap(), "Lucy");
    }

    #[test]
    fn independent_cursors() {
        let rows = tom_and_lucy();
        let mut a = rows.iter();
        let mut b = rows.iter();
        a.next();
        let first_b = b.next().unwrap().unwrap();
        let second_a = a.next().unwrap().unwrap();
        assert_eq!(first_b.get_str(0).unwrap(), "Tom");
        assert_eq!(second_a.get_str(0).unwrap(), "Lucy");
        assert!(a.next().is_none());
    }

    #[test]
    fn missing_and_mistyped_columns() {
        let rows = tom_and_lucy();
        let row = rows.iter().next().unwrap().unwrap();
        assert_eq!(row.get_vid("height"), Err(CoreError::ColumnNotFound("height".into())));
        assert!(matches!(row.get_vid("name"), Err(CoreError::TypeMismatch { .. })));
        assert!(matches!(row.get(5), Err(CoreError::ColumnOutOfRange { index: 5, len: 2 })));
    }

    #[test]
    fn from_parts_counts_rows() {
        let rows = tom_and_lucy();
        let copy = RowSet::from_parts(person(), rows.data().to_vec()).unwrap();
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.data(), rows.data());
    }

    #[test]
    fn from_parts_rejects_truncated_framing() {
        let rows = tom_and_lucy();
        let data = rows.data();
        let err = RowSet::from_parts(person(), data[..data.len() - 1].to_vec()).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn corrupt_row_is_an_error() {
        // A row that claims a 100 byte string but holds 2 bytes.
        let mut data = Vec::new();
        let row = [0, 0, 0, 100, b'h', b'i'];
        data.extend_from_slice(&(row.len() as u32).to_be_bytes());
        data.extend_from_slice(&row);
        let schema =
            SchemaDescriptor::builder().column("s", ScalarKind::String).build().unwrap();
        let rows = RowSet::from_parts(schema.into_shared(), data).unwrap();
        let reader = rows.iter().next().unwrap().unwrap();
        assert!(matches!(reader.to_row(), Err(CoreError::Encoding(_))));
    }

    #[test]
    fn trailing_bytes_in_row_are_an_error() {
        let mut data = Vec::new();
        let row = [0u8; 9];
        data.extend_from_slice(&(row.len() as u32).to_be_bytes());
        data.extend_from_slice(&row);
        let schema =
            SchemaDescriptor::builder().column("i", ScalarKind::Int64).build().unwrap();
        let rows = RowSet::from_parts(schema.into_shared(), data).unwrap();
        let reader = rows.iter().next().unwrap().unwrap();
        assert_eq!(reader.get_int(0).unwrap(), 0);
        assert!(reader.to_row().is_err());
    }

    #[test]
    fn empty_set() {
        let rows = RowSetWriter::new(person()).finish();
        assert!(rows.is_empty());
        assert!(rows.iter().next().is_none());
    }
}
