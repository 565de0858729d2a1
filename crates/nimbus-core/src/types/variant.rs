//! The scalar value type used everywhere in the core.
//!
//! [`Variant`] is a closed union over the four supported scalar kinds. There
//! is no null variant: absence is modelled by the caller (for example with
//! `Option<Variant>`).
//!
//! # Example
//!
//! ```
//! use nimbus_core::{ScalarKind, Variant};
//!
//! let name: Variant = "Alice".into();
//! let age: Variant = 30i64.into();
//!
//! assert_eq!(name.kind(), ScalarKind::String);
//! assert_eq!(age.as_int(), Some(30));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CastError;

/// A vertex identifier.
pub type VertexId = i64;

/// One decoded row: a value per schema field, in schema order.
pub type Row = Vec<Variant>;

/// The kind of a [`Variant`], and the declared type of a schema field.
///
/// `Int64` doubles as the vertex identifier kind: a column holds vertex IDs
/// exactly when it is declared `Int64`.
///
/// | Kind | Wire code | Encoded width |
/// |------|-----------|---------------|
/// | `Bool` | 1 | 1 byte |
/// | `Int64` | 2 | 8 bytes |
/// | `Double` | 3 | 8 bytes |
/// | `String` | 4 | 4-byte length + UTF-8 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    /// 64-bit signed integer (also used for vertex identifiers).
    Int64,
    /// IEEE 754 double-precision float.
    Double,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
}

impl ScalarKind {
    /// All supported kinds, in wire-code order.
    pub const ALL: [Self; 4] = [Self::Bool, Self::Int64, Self::Double, Self::String];

    /// Returns the stable numeric code used on the wire.
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Bool => 1,
            Self::Int64 => 2,
            Self::Double => 3,
            Self::String => 4,
        }
    }

    /// Returns `true` if columns of this kind hold vertex identifiers.
    #[inline]
    #[must_use]
    pub const fn is_vertex_id(self) -> bool {
        matches!(self, Self::Int64)
    }

    /// Returns the kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int64 => "Int64",
            Self::Double => "Double",
            Self::Bool => "Bool",
            Self::String => "String",
        }
    }
}

impl TryFrom<i32> for ScalarKind {
    type Error = CastError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Bool),
            2 => Ok(Self::Int64),
            3 => Ok(Self::Double),
            4 => Ok(Self::String),
            other => Err(CastError::UnsupportedType(other)),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar value. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point number
    Double(f64),
    /// Boolean value
    Bool(bool),
    /// UTF-8 string
    String(String),
}

impl Variant {
    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        match self {
            Self::Int64(_) => ScalarKind::Int64,
            Self::Double(_) => ScalarKind::Double,
            Self::Bool(_) => ScalarKind::Bool,
            Self::String(_) => ScalarKind::String,
        }
    }

    /// Returns the value as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a double if it is one.
    #[inline]
    #[must_use]
    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts this value to `target` using the fixed coercion matrix.
    ///
    /// # Errors
    ///
    /// Returns [`CastError::Parse`] when a string cannot be parsed as the
    /// requested numeric kind.
    pub fn cast(&self, target: ScalarKind) -> Result<Self, CastError> {
        crate::cast::cast(self, target)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int64(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<i32> for Variant {
    fn from(v: i32) -> Self {
        Self::Int64(i64::from(v))
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}
