//! Record codec benchmarks
//!
//! Measures per-field encode and decode cost and the full
//! set-write-clear cycle a table writer runs for every row.

use std::hint::black_box as hint_black_box;
use std::io::Cursor;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dbf_codec::{RecordBuffer, Schema, SchemaBuilder};

fn bench_schema() -> Arc<Schema> {
    SchemaBuilder::new()
        .character("NAME", 40)
        .number("QTY", 10, 0)
        .number("PRICE", 12, 2)
        .float("RATIO", 20, 6)
        .integer("ID")
        .boolean("ACTIVE")
        .date("SOLD")
        .build()
        .unwrap()
}

fn bench_field_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_set");
    let mut record = RecordBuffer::new(bench_schema());

    let cases = [
        ("character", 0, "The quick brown fox"),
        ("number_integer", 1, "1234567"),
        ("number_fixed", 2, "12345.67"),
        ("float", 3, "-1.234567e10"),
        ("integer", 4, "-2147483648"),
        ("boolean", 5, "yes"),
        ("date", 6, "2024-01-15"),
    ];

    for (name, col_idx, value) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &value, |b, value| {
            b.iter(|| record.set(black_box(col_idx), black_box(value)).unwrap());
        });
    }

    group.finish();
}

fn bench_field_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_get");
    let mut record = RecordBuffer::new(bench_schema());
    record.set(0, "The quick brown fox").unwrap();
    record.set(2, "12345.67").unwrap();
    record.set(6, "2024-01-15").unwrap();

    group.bench_function("raw", |b| {
        b.iter(|| hint_black_box(record.get_raw(black_box(0)).unwrap().len()));
    });

    group.bench_function("text", |b| {
        b.iter(|| hint_black_box(record.get(black_box(0)).unwrap()));
    });

    group.bench_function("f64", |b| {
        b.iter(|| hint_black_box(record.get_f64(black_box(2)).unwrap()));
    });

    group.bench_function("date", |b| {
        b.iter(|| hint_black_box(record.get_date(black_box(6)).unwrap()));
    });

    group.bench_function("by_name", |b| {
        b.iter(|| hint_black_box(record.get_by_name(black_box("price")).unwrap()));
    });

    group.finish();
}

fn bench_row_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_cycle");
    let schema = bench_schema();

    group.bench_function("set_write_clear", |b| {
        let mut record = RecordBuffer::new(schema.clone());
        let mut sink = Vec::with_capacity(schema.record_len());
        b.iter(|| {
            sink.clear();
            record.set(0, "Widget").unwrap();
            record.set(1, "42").unwrap();
            record.set(2, "3.1").unwrap();
            record.set(5, "T").unwrap();
            record.write_and_clear(&mut sink).unwrap();
            hint_black_box(sink.len())
        });
    });

    group.bench_function("read", |b| {
        let mut record = RecordBuffer::new(schema.clone());
        record.set(0, "Widget").unwrap();
        let bytes = record.as_bytes().to_vec();
        b.iter(|| {
            let mut source = Cursor::new(black_box(bytes.as_slice()));
            hint_black_box(record.read_from(&mut source).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_field_set, bench_field_get, bench_row_cycle);
criterion_main!(benches);
