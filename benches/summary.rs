use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_data_summary::report::{render_html, render_text, render_xlsx_to_buffer};
use rust_data_summary::summary::compute;
use rust_data_summary::types::{DataSet, DataType, Field, Schema, Value};

const SPECIES: [&str; 3] = ["setosa", "versicolor", "virginica"];

fn synthetic(rows: usize) -> DataSet {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("length", DataType::Float64),
        Field::new("species", DataType::Utf8),
        Field::new("checked", DataType::Bool),
    ]);
    let data = (0..rows)
        .map(|i| {
            let length = if i % 17 == 0 {
                Value::Null
            } else {
                Value::Float64(((i * 7919) % 1000) as f64 / 10.0)
            };
            vec![
                Value::Int64((i % 250) as i64),
                length,
                Value::Utf8(SPECIES[i % SPECIES.len()].to_string()),
                Value::Bool(i % 2 == 0),
            ]
        })
        .collect();
    DataSet::new(schema, data)
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    for rows in [1_000usize, 100_000] {
        let ds = synthetic(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter(|| compute(black_box(ds)).unwrap())
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let results = compute(&synthetic(10_000)).unwrap();

    let mut group = c.benchmark_group("render");
    group.bench_function("text", |b| b.iter(|| render_text(black_box(&results))));
    group.bench_function("html", |b| b.iter(|| render_html(black_box(&results))));
    group.bench_function("xlsx", |b| b.iter(|| render_xlsx_to_buffer(black_box(&results)).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_compute, bench_render);
criterion_main!(benches);
