//! Tests for the Redb storage backend.

mod engine_tests;

use nimbus_storage::backends::redb::{RedbConfig, RedbEngine};
use nimbus_storage::{StorageEngine, StorageResult, Transaction};

use engine_tests::{run_test_suite, TestHarness};

struct RedbHarness;

impl TestHarness for RedbHarness {
    type Engine = RedbEngine;

    fn create_engine() -> StorageResult<Self::Engine> {
        RedbEngine::in_memory()
    }
}

#[test]
fn test_redb_compliance() {
    run_test_suite::<RedbHarness>();
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("meta.redb");

    {
        let engine = RedbEngine::open(&path).expect("failed to open");
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put(b"__spaces__\x00\x00\x00\x01", b"default").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    let engine = RedbEngine::open(&path).expect("failed to reopen");
    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(
        tx.get(b"__spaces__\x00\x00\x00\x01").expect("failed to get"),
        Some(b"default".to_vec())
    );
}

#[test]
fn test_custom_table_name() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("custom.redb");
    let config = RedbConfig::new().table_name("custom").cache_size(1 << 20);

    let engine = RedbEngine::open_with_config(&path, config).expect("failed to open");
    let mut tx = engine.begin_write().expect("failed to begin write");
    tx.put(b"k", b"v").expect("failed to put");
    tx.commit().expect("failed to commit");

    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.scan_prefix(b"k").expect("failed to scan").len(), 1);
}
