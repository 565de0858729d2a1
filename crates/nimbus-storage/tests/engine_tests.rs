//! Compliance tests for the storage engine contract.
//!
//! These tests validate the trait contracts and can be run against any
//! storage engine implementation.

#![allow(dead_code)]

use nimbus_storage::{StorageEngine, StorageError, StorageResult, Transaction};

/// A test harness for storage engine implementations.
pub trait TestHarness {
    /// The storage engine type being tested.
    type Engine: StorageEngine;

    /// Create a new storage engine for testing.
    fn create_engine() -> StorageResult<Self::Engine>;

    /// Clean up after tests (remove temp files, etc.).
    fn cleanup(_engine: Self::Engine) {}
}

/// Run the standard test suite against a storage engine.
pub fn run_test_suite<H: TestHarness>() {
    test_basic_operations::<H>();
    test_transaction_isolation::<H>();
    test_rollback::<H>();
    test_prefix_scan::<H>();
    test_prefix_scan_sees_own_writes::<H>();
    test_get_sees_own_writes::<H>();
    test_read_only_enforcement::<H>();
}

fn put_all<E: StorageEngine>(engine: &E, records: &[(&[u8], &[u8])]) {
    let mut tx = engine.begin_write().expect("failed to begin write");
    for (key, value) in records {
        tx.put(key, value).expect("failed to put");
    }
    tx.commit().expect("failed to commit");
}

fn put_one<E: StorageEngine>(engine: &E, key: &[u8], value: &[u8]) {
    put_all(engine, &[(key, value)]);
}

fn test_basic_operations<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    put_one(&engine, b"key1", b"value1");
    {
        let tx = engine.begin_read().expect("failed to begin read");
        assert_eq!(tx.get(b"key1").expect("failed to get"), Some(b"value1".to_vec()));
        assert!(tx.contains(b"key1").expect("failed to check"));
    }

    put_one(&engine, b"key1", b"value1_updated");
    {
        let tx = engine.begin_read().expect("failed to begin read");
        assert_eq!(tx.get(b"key1").expect("failed to get"), Some(b"value1_updated".to_vec()));
    }

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        assert!(tx.delete(b"key1").expect("failed to delete"));
        assert!(!tx.delete(b"nonexistent").expect("failed to delete"));
        tx.commit().expect("failed to commit");
    }
    {
        let tx = engine.begin_read().expect("failed to begin read");
        assert_eq!(tx.get(b"key1").expect("failed to get"), None);
    }

    H::cleanup(engine);
}

fn test_transaction_isolation<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");
    put_one(&engine, b"key1", b"initial");

    let before = engine.begin_read().expect("failed to begin read");
    assert_eq!(before.get(b"key1").expect("failed to get"), Some(b"initial".to_vec()));
    drop(before);

    put_one(&engine, b"key1", b"updated");

    let after = engine.begin_read().expect("failed to begin read");
    assert_eq!(after.get(b"key1").expect("failed to get"), Some(b"updated".to_vec()));
    drop(after);

    H::cleanup(engine);
}

fn test_rollback<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");
    put_one(&engine, b"kept", b"1");

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put(b"discarded", b"2").expect("failed to put");
        tx.delete(b"kept").expect("failed to delete");
        tx.rollback().expect("failed to rollback");
    }
    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put(b"dropped", b"3").expect("failed to put");
    }

    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.get(b"kept").expect("failed to get"), Some(b"1".to_vec()));
    assert_eq!(tx.get(b"discarded").expect("failed to get"), None);
    assert_eq!(tx.get(b"dropped").expect("failed to get"), None);
    drop(tx);

    H::cleanup(engine);
}

fn test_prefix_scan<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");
    let records: [(&[u8], &[u8]); 6] = [
        (b"__tags__b", b"2"),
        (b"__tags__a", b"1"),
        (b"__tags_", b"shorter"),
        (b"__tagt__", b"after"),
        (b"__spaces__a", b"other"),
        (b"__tags__\xff", b"high"),
    ];
    put_all(&engine, &records);

    let tx = engine.begin_read().expect("failed to begin read");
    let records = tx.scan_prefix(b"__tags__").expect("failed to scan");
    let keys: Vec<Vec<u8>> = records.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, vec![b"__tags__a".to_vec(), b"__tags__b".to_vec(), b"__tags__\xff".to_vec()]);
    assert_eq!(records[0].1, b"1".to_vec());

    assert!(tx.scan_prefix(b"__hosts__").expect("failed to scan").is_empty());
    assert_eq!(tx.scan_prefix(b"").expect("failed to scan").len(), 6);
    drop(tx);

    H::cleanup(engine);
}

fn test_prefix_scan_sees_own_writes<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");
    let records: [(&[u8], &[u8]); 2] = [(b"p:1", b"a"), (b"p:2", b"b")];
    put_all(&engine, &records);

    let mut tx = engine.begin_write().expect("failed to begin write");
    tx.put(b"p:3", b"c").expect("failed to put");
    tx.delete(b"p:1").expect("failed to delete");
    let keys: Vec<Vec<u8>> =
        tx.scan_prefix(b"p:").expect("failed to scan").into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![b"p:2".to_vec(), b"p:3".to_vec()]);
    tx.commit().expect("failed to commit");

    H::cleanup(engine);
}

fn test_get_sees_own_writes<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");
    put_one(&engine, b"k:1", b"old");

    let mut tx = engine.begin_write().expect("failed to begin write");
    assert_eq!(tx.get(b"k:1").expect("failed to get"), Some(b"old".to_vec()));
    tx.put(b"k:1", b"new").expect("failed to put");
    tx.put(b"k:2", b"added").expect("failed to put");
    assert_eq!(tx.get(b"k:1").expect("failed to get"), Some(b"new".to_vec()));
    assert_eq!(tx.get(b"k:2").expect("failed to get"), Some(b"added".to_vec()));
    assert_eq!(tx.get(b"k:3").expect("failed to get"), None);
    tx.commit().expect("failed to commit");

    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.get(b"k:1").expect("failed to get"), Some(b"new".to_vec()));
    assert_eq!(tx.get(b"k:3").expect("failed to get"), None);
    drop(tx);

    H::cleanup(engine);
}

fn test_read_only_enforcement<H: TestHarness>() {
    let engine = H::create_engine().expect("failed to create engine");

    let mut tx = engine.begin_read().expect("failed to begin read");
    assert!(tx.is_read_only());
    assert!(matches!(tx.put(b"key", b"value"), Err(StorageError::ReadOnly)));
    assert!(matches!(tx.delete(b"key"), Err(StorageError::ReadOnly)));
    drop(tx);

    let tx = engine.begin_write().expect("failed to begin write");
    assert!(!tx.is_read_only());
    tx.rollback().expect("failed to rollback");

    H::cleanup(engine);
}
