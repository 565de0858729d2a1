//! Compact serialization for [`SchemaDescriptor`].

use crate::error::CoreError;
use crate::types::SchemaDescriptor;

use super::traits::{Decoder, Encoder};

impl Encoder for SchemaDescriptor {
    fn encode_to(&self, buf: &mut Vec<u8>) -> Result<(), CoreError> {
        let bytes = bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| CoreError::Encoding(e.to_string()))?;
        buf.extend_from_slice(&bytes);
        Ok(())
    }
}

impl Decoder for SchemaDescriptor {
    fn decode(bytes: &[u8]) -> Result<Self, CoreError> {
        let (schema, read): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())
                .map_err(|e| CoreError::Encoding(format!("invalid schema payload: {e}")))?;
        if read != bytes.len() {
            return Err(CoreError::Encoding(format!(
                "{} trailing bytes after schema payload",
                bytes.len() - read
            )));
        }
        Ok(schema)
    }
}
