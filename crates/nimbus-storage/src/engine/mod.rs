//! Storage engine traits and abstractions.
//!
//! - [`StorageEngine`] - Main entry point for creating transactions
//! - [`Transaction`] - Transaction with get/put/delete/prefix-scan operations
//!
//! All operations return [`StorageResult<T>`], an alias for
//! `Result<T, StorageError>`.

mod error;
mod traits;

pub use error::{StorageError, StorageResult};
pub use traits::{KeyValue, StorageEngine, Transaction};
