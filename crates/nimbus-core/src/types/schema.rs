//! Schema descriptors.
//!
//! A [`SchemaDescriptor`] is the ordered list of `(name, kind)` pairs that
//! tells the row codec how to interpret row bytes. Field order is the on-wire
//! column order. Descriptors are immutable after construction and shared
//! through [`SharedSchema`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ScalarKind;
use crate::error::CoreError;

/// A reference-counted, immutable schema handle.
pub type SharedSchema = Arc<SchemaDescriptor>;

/// One field of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDef {
    /// The field name, unique within its schema.
    pub name: String,
    /// The declared kind of the field.
    pub kind: ScalarKind,
}

impl ColumnDef {
    /// Creates a new column definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// An ordered sequence of uniquely named, typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnDef>", into = "Vec<ColumnDef>")]
pub struct SchemaDescriptor {
    columns: Vec<ColumnDef>,
    name_to_index: HashMap<String, usize>,
}

impl SchemaDescriptor {
    /// Creates a schema from its columns.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if two columns share a name.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, CoreError> {
        let mut name_to_index = HashMap::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            if name_to_index.insert(col.name.clone(), i).is_some() {
                return Err(CoreError::Validation(format!("duplicate column `{}'", col.name)));
            }
        }
        Ok(Self { columns, name_to_index })
    }

    /// Creates an empty schema.
    #[must_use]
    pub fn empty() -> Self {
        Self { columns: Vec::new(), name_to_index: HashMap::new() }
    }

    /// Starts building a schema column by column.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the columns in order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Gets the column at a position.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnDef> {
        self.columns.get(index)
    }

    /// Gets the position of a column by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Gets the declared kind of a column by name.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<ScalarKind> {
        self.index_of(name).map(|i| self.columns[i].kind)
    }

    /// Iterates over the columns in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDef> {
        self.columns.iter()
    }

    /// Consumes the schema into a shared handle.
    #[must_use]
    pub fn into_shared(self) -> SharedSchema {
        Arc::new(self)
    }
}

impl Default for SchemaDescriptor {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<ColumnDef>> for SchemaDescriptor {
    type Error = CoreError;

    fn try_from(columns: Vec<ColumnDef>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<SchemaDescriptor> for Vec<ColumnDef> {
    fn from(schema: SchemaDescriptor) -> Self {
        schema.columns
    }
}

impl<'a> IntoIterator for &'a SchemaDescriptor {
    type Item = &'a ColumnDef;
    type IntoIter = std::slice::Iter<'a, ColumnDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Builder for [`SchemaDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    columns: Vec<ColumnDef>,
}

impl SchemaBuilder {
    /// Appends a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.columns.push(ColumnDef::new(name, kind));
        self
    }

    /// Finishes the schema.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if two columns share a name.
    pub fn build(self) -> Result<SchemaDescriptor, CoreError> {
        SchemaDescriptor::new(self.columns)
    }
}
