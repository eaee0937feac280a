//! Criterion benchmarks for packtree
//!
//! Run with: cargo bench --bench decode_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use packtree::{deserialize, deserialize_in_place, deserialize_with, Arena, Config, Copying, SliceCursor};
use serde_json::json;

fn sample_document(entries: usize) -> Vec<u8> {
    let items: Vec<_> = (0..entries)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("sensor-{i}"),
                "offset": -(i as i64) * 1_000,
                "reading": i as f64 * 0.5,
                "active": i % 2 == 0,
                "tags": ["east", "roof"],
            })
        })
        .collect();
    rmp_serde::to_vec(&items).unwrap()
}

fn bench_scalars(c: &mut Criterion) {
    let fixint = [0x2a];
    let uint64 = [0xcf, 0, 0, 0, 1, 0, 0, 0, 0];
    let mut float64 = vec![0xcb];
    float64.extend_from_slice(&1.5f64.to_be_bytes());

    c.bench_function("scalar_fixint", |b| {
        let mut arena = Arena::new();
        b.iter(|| black_box(deserialize(black_box(&fixint), &mut arena).unwrap()));
    });

    c.bench_function("scalar_uint64", |b| {
        let mut arena = Arena::new();
        b.iter(|| black_box(deserialize(black_box(&uint64), &mut arena).unwrap()));
    });

    c.bench_function("scalar_float64_narrowed", |b| {
        let config = Config::new().without_double();
        let mut arena = Arena::new();
        b.iter(|| {
            let mut cursor = SliceCursor::new(black_box(&float64));
            let value = deserialize_with(&mut cursor, &mut arena, Copying::new(), config).unwrap();
            black_box(value);
        });
    });
}

fn bench_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_decode");

    for entries in [1usize, 16, 256] {
        let data = sample_document(entries);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("copying", entries), &data, |b, data| {
            let mut arena = Arena::new();
            b.iter(|| {
                arena.reset();
                let root = deserialize(black_box(data), &mut arena).unwrap();
                black_box(root);
            });
        });

        group.bench_with_input(BenchmarkId::new("in_place", entries), &data, |b, data| {
            b.iter(|| {
                let mut arena = Arena::new();
                let root = deserialize_in_place(black_box(data), &mut arena).unwrap();
                black_box(root);
            });
        });
    }

    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let mut data = vec![0x91; 200];
    data.push(0xc0);
    let config = Config::new().with_nesting_limit(200);

    c.bench_function("nested_arrays_200", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let mut cursor = SliceCursor::new(black_box(&data));
            let root = deserialize_with(&mut cursor, &mut arena, Copying::new(), config).unwrap();
            black_box(root);
        });
    });
}

criterion_group!(benches, bench_scalars, bench_documents, bench_deep_nesting);
criterion_main!(benches);
