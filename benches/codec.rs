#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use vellum_cbor::{decode_value, encode_canonical, encode_value, Map, Value};

fn sample_small() -> Vec<u8> {
    vec![0xa1, 0x61, 0x61, 0x01] // {"a":1}
}

fn sample_medium() -> Value {
    let mut map = Map::new();
    for i in 0..64u64 {
        let entry = Value::Array(vec![
            Value::Unsigned(i),
            Value::from_i64(-(i as i64) - 1),
            Value::Float64(i as f64 + 0.5),
            Value::Text(format!("node-{i:03}")),
        ]);
        map.insert(Value::Text(format!("k{i:03}")), entry);
    }
    Value::Map(map)
}

fn bench_codec(c: &mut Criterion) {
    let small = sample_small();
    c.bench_function("decode_small", |b| {
        b.iter(|| decode_value(black_box(&small)).unwrap())
    });

    let medium = sample_medium();
    let medium_bytes = encode_value(&medium);

    c.bench_function("decode_medium", |b| {
        b.iter(|| decode_value(black_box(&medium_bytes)).unwrap())
    });

    c.bench_function("encode_medium", |b| {
        b.iter(|| encode_value(black_box(&medium)))
    });

    c.bench_function("encode_canonical_medium", |b| {
        b.iter(|| encode_canonical(black_box(&medium)))
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
