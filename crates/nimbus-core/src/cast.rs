//! The cast engine.
//!
//! Explicit coercion between the four scalar kinds:
//!
//! | from \ to | `Int64` | `Double` | `Bool` | `String` |
//! |-----------|---------|----------|--------|----------|
//! | `Int64` | identity | `v as f64` | `v != 0` | decimal |
//! | `Double` | truncate toward zero | identity | `v != 0.0` | shortest round-trip decimal |
//! | `Bool` | `0` / `1` | `0.0` / `1.0` | identity | `"false"` / `"true"` |
//! | `String` | parse | parse | `s.is_empty()` | identity |
//!
//! String to `Bool` yields `true` only for the empty string.
//!
//! Double to `Int64` saturates at the `i64` bounds and maps NaN to `0`.

use tracing::warn;

use crate::error::CastError;
use crate::types::{ScalarKind, Variant};

/// Casts `value` to the `target` kind.
///
/// Every pair of kinds is total except `String -> Int64` and
/// `String -> Double`, which fail when the string does not parse.
///
/// # Errors
///
/// Returns [`CastError::Parse`] carrying the offending string.
///
/// # Example
///
/// ```
/// use nimbus_core::{cast, ScalarKind, Variant};
///
/// assert_eq!(cast(&Variant::Double(-2.9), ScalarKind::Int64).unwrap(), Variant::Int64(-2));
/// assert_eq!(cast(&Variant::Bool(true), ScalarKind::String).unwrap(), Variant::from("true"));
/// assert!(cast(&Variant::from("12a"), ScalarKind::Int64).is_err());
/// ```
pub fn cast(value: &Variant, target: ScalarKind) -> Result<Variant, CastError> {
    match target {
        ScalarKind::Int64 => to_int(value).map(Variant::Int64),
        ScalarKind::Double => to_double(value).map(Variant::Double),
        ScalarKind::Bool => Ok(Variant::Bool(to_bool(value))),
        ScalarKind::String => Ok(Variant::String(to_string(value))),
    }
}

/// Casts `value` to the kind identified by a raw wire type code.
///
/// # Errors
///
/// Returns [`CastError::UnsupportedType`] if `code` is not one of the four
/// supported kinds, otherwise the errors of [`cast`].
pub fn cast_to_code(value: &Variant, code: i32) -> Result<Variant, CastError> {
    let target = ScalarKind::try_from(code).inspect_err(|_| {
        warn!(code, "cast to unsupported type");
    })?;
    cast(value, target)
}

#[allow(clippy::cast_possible_truncation)]
fn to_int(value: &Variant) -> Result<i64, CastError> {
    match value {
        Variant::Int64(i) => Ok(*i),
        Variant::Double(d) => Ok(*d as i64),
        Variant::Bool(b) => Ok(i64::from(*b)),
        Variant::String(s) => s.parse().map_err(|_| CastError::parse(s, ScalarKind::Int64)),
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_double(value: &Variant) -> Result<f64, CastError> {
    match value {
        Variant::Int64(i) => Ok(*i as f64),
        Variant::Double(d) => Ok(*d),
        Variant::Bool(b) => Ok(f64::from(u8::from(*b))),
        Variant::String(s) => s.parse().map_err(|_| CastError::parse(s, ScalarKind::Double)),
    }
}

fn to_bool(value: &Variant) -> bool {
    match value {
        Variant::Int64(i) => *i != 0,
        Variant::Double(d) => *d != 0.0,
        Variant::Bool(b) => *b,
        Variant::String(s) => s.is_empty(),
    }
}

fn to_string(value: &Variant) -> String {
    match value {
        Variant::String(s) => s.clone(),
        Variant::Double(d) => format_double(*d),
        other => other.to_string(),
    }
}

/// Shortest decimal that parses back to `d`.
///
/// Magnitudes outside `[1e-4, 1e16)` switch to exponent form, so `1e300`
/// stays five bytes instead of three hundred.
fn format_double(d: f64) -> String {
    let abs = d.abs();
    if d.is_finite() && abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        format!("{d:e}")
    } else {
        d.to_string()
    }
}
