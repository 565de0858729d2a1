//! Benchmarks for row set encoding and lazy decoding.

#![allow(missing_docs, clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nimbus_core::{RowSet, RowSetWriter, ScalarKind, SchemaDescriptor, SharedSchema, Variant};

fn schema() -> SharedSchema {
    SchemaDescriptor::builder()
        .column("id", ScalarKind::Int64)
        .column("name", ScalarKind::String)
        .column("score", ScalarKind::Double)
        .column("active", ScalarKind::Bool)
        .build()
        .unwrap()
        .into_shared()
}

fn build(rows: usize) -> RowSet {
    let mut writer = RowSetWriter::with_capacity(schema(), rows * 40);
    for i in 0..rows {
        let id = i64::try_from(i).unwrap();
        writer
            .add_values(&[
                Variant::Int64(id),
                Variant::String(format!("vertex-{i}")),
                Variant::Double(id as f64 * 0.5),
                Variant::Bool(i % 2 == 0),
            ])
            .unwrap();
    }
    writer.finish()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_set_encode");
    for rows in [100usize, 10_000] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| black_box(build(rows)));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_set_decode");
    for rows in [100usize, 10_000] {
        let set = build(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("to_row", rows), &set, |b, set| {
            b.iter(|| {
                for row in set {
                    black_box(row.unwrap().to_row().unwrap());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("get_vid", rows), &set, |b, set| {
            b.iter(|| {
                for row in set {
                    black_box(row.unwrap().get_vid("id").unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
