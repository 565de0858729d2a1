//! Storage backend implementations.
//!
//! # Available Backends
//!
//! - [`memory`] - `BTreeMap` behind a lock, for tests and embedded use
//! - [`redb`] - Pure-Rust embedded database with ACID transactions

pub mod memory;
pub mod redb;

pub use self::memory::{MemoryEngine, MemoryTransaction};
pub use self::redb::{RedbConfig, RedbEngine, RedbTransaction};
