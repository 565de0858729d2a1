//! Wire records exchanged with clients and remote pipeline steps.
//!
//! A [`RowValue`] is an ordered list of [`ColumnValue`]s. Unlike encoded
//! rows, wire records tag every value with its kind, so they can be read
//! without a schema.
//!
//! # Format
//!
//! Each column is a 1-byte tag followed by the payload:
//!
//! - `BoolVal`: `0x01` + `0x00` (false) or `0x01` (true)
//! - `Integer`: `0x02` + 8 bytes (big-endian i64)
//! - `DoublePrecision`: `0x03` + 8 bytes (big-endian IEEE 754 f64)
//! - `Str`: `0x04` + 4 bytes length + UTF-8 bytes
//!
//! A row is a 4-byte column count followed by its columns, and a row list
//! is a 4-byte row count followed by its rows.

use nimbus_core::{cast, cast_to_code, CastError, CoreError, Decoder, Encoder, ScalarKind, Variant};
use serde::{Deserialize, Serialize};

/// Type tags for column variants. They match the [`ScalarKind`] codes.
mod tags {
    pub const BOOL_VAL: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const DOUBLE_PRECISION: u8 = 0x03;
    pub const STR: u8 = 0x04;
}

/// One tagged value of a wire row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    /// 64-bit signed integer, also used for vertex ids.
    Integer(i64),
    /// 64-bit float.
    DoublePrecision(f64),
    /// Boolean.
    BoolVal(bool),
    /// UTF-8 string.
    Str(String),
}

impl ColumnValue {
    /// The scalar kind this value carries.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Integer(_) => ScalarKind::Int64,
            Self::DoublePrecision(_) => ScalarKind::Double,
            Self::BoolVal(_) => ScalarKind::Bool,
            Self::Str(_) => ScalarKind::String,
        }
    }

    /// Casts this value to `target` in place.
    ///
    /// On failure the value is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::Parse`] if a string does not parse as a number.
    pub fn cast_to(&mut self, target: ScalarKind) -> Result<(), CastError> {
        if self.kind() != target {
            *self = cast(&Variant::from(self.clone()), target)?.into();
        }
        Ok(())
    }

    /// Casts this value in place to the kind with wire code `code`.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::UnsupportedType`] for an unknown code, otherwise
    /// the errors of [`cast_to`](Self::cast_to).
    pub fn cast_to_code(&mut self, code: i32) -> Result<(), CastError> {
        *self = cast_to_code(&Variant::from(self.clone()), code)?.into();
        Ok(())
    }
}

impl From<Variant> for ColumnValue {
    fn from(value: Variant) -> Self {
        match value {
            Variant::Int64(v) => Self::Integer(v),
            Variant::Double(v) => Self::DoublePrecision(v),
            Variant::Bool(v) => Self::BoolVal(v),
            Variant::String(v) => Self::Str(v),
        }
    }
}

impl From<ColumnValue> for Variant {
    fn from(value: ColumnValue) -> Self {
        match value {
            ColumnValue::Integer(v) => Self::Int64(v),
            ColumnValue::DoublePrecision(v) => Self::Double(v),
            ColumnValue::BoolVal(v) => Self::Bool(v),
            ColumnValue::Str(v) => Self::String(v),
        }
    }
}

/// One row of a result, as sent to clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowValue {
    /// Column values in schema order.
    pub columns: Vec<ColumnValue>,
}

impl RowValue {
    /// Create a row from its columns.
    #[must_use]
    pub const fn new(columns: Vec<ColumnValue>) -> Self {
        Self { columns }
    }

    /// The columns of this row.
    #[must_use]
    pub fn columns(&self) -> &[ColumnValue] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<Vec<ColumnValue>> for RowValue {
    fn from(columns: Vec<ColumnValue>) -> Self {
        Self::new(columns)
    }
}

fn encode_count(len: usize, what: &str, buf: &mut Vec<u8>) -> Result<(), CoreError> {
    let len = u32::try_from(len).map_err(|_| CoreError::Encoding(format!("{what} too long")))?;
    buf.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

fn unexpected_end() -> CoreError {
    CoreError::Encoding("unexpected end of input".to_owned())
}

fn take<const N: usize>(bytes: &[u8], pos: usize) -> Result<[u8; N], CoreError> {
    bytes
        .get(pos..pos + N)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(unexpected_end)
}

fn decode_count(bytes: &[u8], pos: usize) -> Result<usize, CoreError> {
    usize::try_from(u32::from_be_bytes(take(bytes, pos)?))
        .map_err(|_| CoreError::Encoding("count exceeds platform capacity".to_owned()))
}

impl Encoder for ColumnValue {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        match self {
            Self::BoolVal(b) => {
                buf.push(tags::BOOL_VAL);
                buf.push(u8::from(*b));
            }
            Self::Integer(i) => {
                buf.push(tags::INTEGER);
                buf.extend_from_slice(&i.to_be_bytes());
            }
            Self::DoublePrecision(f) => {
                buf.push(tags::DOUBLE_PRECISION);
                buf.extend_from_slice(&f.to_be_bytes());
            }
            Self::Str(s) => {
                buf.push(tags::STR);
                encode_count(s.len(), "string", buf)?;
                buf.extend_from_slice(s.as_bytes());
            }
        }
        Ok(())
    }
}

/// Decode one column value, returning it with the number of bytes consumed.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] for an unknown tag or truncated input.
pub fn decode_column(bytes: &[u8]) -> Result<(ColumnValue, usize), CoreError> {
    let tag = *bytes.first().ok_or_else(unexpected_end)?;
    match tag {
        tags::BOOL_VAL => {
            let [b] = take::<1>(bytes, 1)?;
            Ok((ColumnValue::BoolVal(b != 0), 2))
        }
        tags::INTEGER => Ok((ColumnValue::Integer(i64::from_be_bytes(take(bytes, 1)?)), 9)),
        tags::DOUBLE_PRECISION => {
            Ok((ColumnValue::DoublePrecision(f64::from_be_bytes(take(bytes, 1)?)), 9))
        }
        tags::STR => {
            let len = decode_count(bytes, 1)?;
            let raw = bytes.get(5..5 + len).ok_or_else(unexpected_end)?;
            let s = std::str::from_utf8(raw)
                .map_err(|e| CoreError::Encoding(format!("invalid UTF-8: {e}")))?;
            Ok((ColumnValue::Str(s.to_owned()), 5 + len))
        }
        other => Err(CoreError::Encoding(format!("unknown column tag {other:#04x}"))),
    }
}

impl Decoder for ColumnValue {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let (value, read) = decode_column(bytes)?;
        if read != bytes.len() {
            return Err(CoreError::Encoding("trailing bytes after column".to_owned()));
        }
        Ok(value)
    }
}

impl Encoder for RowValue {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        encode_count(self.columns.len(), "row", buf)?;
        for column in &self.columns {
            column.encode_to(buf)?;
        }
        Ok(())
    }
}

fn decode_row(bytes: &[u8]) -> Result<(RowValue, usize), CoreError> {
    let count = decode_count(bytes, 0)?;
    // Every column takes at least two bytes.
    let mut columns = Vec::with_capacity(count.min(bytes.len() / 2));
    let mut pos = 4;
    for _ in 0..count {
        let (column, read) = decode_column(&bytes[pos..])?;
        columns.push(column);
        pos += read;
    }
    Ok((RowValue::new(columns), pos))
}

impl Decoder for RowValue {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let (row, read) = decode_row(bytes)?;
        if read != bytes.len() {
            return Err(CoreError::Encoding("trailing bytes after row".to_owned()));
        }
        Ok(row)
    }
}

/// Encode a list of rows.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if a length does not fit its field.
pub fn encode_rows(rows: &[RowValue]) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    encode_count(rows.len(), "row list", &mut buf)?;
    for row in rows {
        row.encode_to(&mut buf)?;
    }
    Ok(buf)
}

/// Decode a list of rows produced by [`encode_rows`].
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] for an unknown tag, truncated input or
/// trailing bytes.
pub fn decode_rows(bytes: &[u8]) -> Result<Vec<RowValue>, CoreError> {
    let count = decode_count(bytes, 0)?;
    // Every row takes at least four bytes.
    let mut rows = Vec::with_capacity(count.min(bytes.len() / 4));
    let mut pos = 4;
    for _ in 0..count {
        let (row, read) = decode_row(&bytes[pos..])?;
        rows.push(row);
        pos += read;
    }
    if pos != bytes.len() {
        return Err(CoreError::Encoding("trailing bytes after row list".to_owned()));
    }
    Ok(rows)
}
