//! Tests for the in-memory storage backend.

mod engine_tests;

use std::sync::Arc;
use std::thread;

use nimbus_storage::backends::MemoryEngine;
use nimbus_storage::{StorageEngine, StorageResult, Transaction};

use engine_tests::{run_test_suite, TestHarness};

struct MemoryHarness;

impl TestHarness for MemoryHarness {
    type Engine = MemoryEngine;

    fn create_engine() -> StorageResult<Self::Engine> {
        Ok(MemoryEngine::new())
    }
}

#[test]
fn test_memory_compliance() {
    run_test_suite::<MemoryHarness>();
}

#[test]
fn test_concurrent_writers_are_serialized() {
    let engine = Arc::new(MemoryEngine::new());

    let handles: Vec<_> = (0u8..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut tx = engine.begin_write().expect("failed to begin write");
                tx.put(&[b'k', i], &[i]).expect("failed to put");
                tx.commit().expect("failed to commit");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer panicked");
    }

    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.scan_prefix(b"k").expect("failed to scan").len(), 8);
}
