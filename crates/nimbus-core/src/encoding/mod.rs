//! Serialization for rows and schemas.
//!
//! # Encoding Traits
//!
//! - [`Encoder`] - Serialize types to bytes
//! - [`Decoder`] - Deserialize types from bytes
//!
//! # Row Codec
//!
//! The [`row`] module encodes sequences of [`Variant`](crate::Variant)s
//! against a [`SchemaDescriptor`](crate::SchemaDescriptor) and decodes them
//! back lazily. Rows carry no type tags: each field is read strictly by the
//! kind the schema declares for its position.
//!
//! # Schema Serialization
//!
//! [`SchemaDescriptor`](crate::SchemaDescriptor) implements both traits with a
//! compact `bincode` encoding. This is the payload stored in tag and edge
//! schema records of the metadata store.

pub mod row;
mod schema;
mod traits;


pub use traits::{Decoder, Encoder};
