//! Error types for the core crate.

use thiserror::Error;

use crate::types::ScalarKind;

/// Maximum length for value display in error messages.
const MAX_VALUE_DISPLAY_LEN: usize = 100;

/// Errors that can occur in the core crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An encoding or decoding error occurred.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A value type mismatch occurred.
    #[error("type mismatch: expected {expected}, got {actual}{}", value.as_ref().map(|v| format!(" (value: {v})")).unwrap_or_default())]
    TypeMismatch {
        /// The expected type.
        expected: String,
        /// The actual type.
        actual: String,
        /// The value that caused the mismatch (truncated for display).
        value: Option<String>,
    },

    /// A schema has no field with the given name.
    #[error("column `{0}' not found")]
    ColumnNotFound(String),

    /// A field position is outside the schema.
    #[error("column index {index} out of range for schema with {len} columns")]
    ColumnOutOfRange {
        /// The requested position.
        index: usize,
        /// The number of columns in the schema.
        len: usize,
    },

    /// A validation error occurred.
    #[error("validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Creates an "unexpected end of input" encoding error for a named part.
    #[must_use]
    pub fn truncated(what: &str) -> Self {
        Self::Encoding(format!("unexpected end of input while reading {what}"))
    }

    /// Creates a type mismatch error without a value.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch { expected: expected.into(), actual: actual.into(), value: None }
    }

    /// Creates a type mismatch error with a value for debugging.
    ///
    /// The value is truncated to 100 characters for display.
    #[must_use]
    pub fn type_mismatch_with_value(
        expected: impl Into<String>,
        actual: impl Into<String>,
        value: impl std::fmt::Display,
    ) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            value: Some(truncate_for_display(&value.to_string())),
        }
    }
}

/// Errors produced by the cast engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CastError {
    /// A string could not be parsed as the requested numeric kind.
    #[error("casting from string {value:?} to {target} failed")]
    Parse {
        /// The offending string (truncated for display).
        value: String,
        /// The kind the cast was aiming for.
        target: ScalarKind,
    },

    /// The target type code is not one of the four supported kinds.
    #[error("type not supported yet: {0}")]
    UnsupportedType(i32),
}

impl CastError {
    pub(crate) fn parse(value: &str, target: ScalarKind) -> Self {
        Self::Parse { value: truncate_for_display(value), target }
    }
}

fn truncate_for_display(value: &str) -> String {
    if value.len() <= MAX_VALUE_DISPLAY_LEN {
        return value.to_owned();
    }
    let mut end = MAX_VALUE_DISPLAY_LEN;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &value[..end])
}
