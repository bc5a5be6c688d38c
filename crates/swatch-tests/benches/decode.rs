//! Decode Benchmarks
//!
//! Single-file decode throughput and parallel batch decode.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use swatch_core::{Blocks, DecodeOptions, RawFile, decode_all, decode_bytes};
use swatch_tests::{encode_records, random_records};

fn bench_single_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_file");
    let options = DecodeOptions::default();

    for colors in [16usize, 256, 4096] {
        let data = encode_records(&random_records(colors as u64, colors, 4));
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("blocks", colors), &data, |b, data| {
            b.iter(|| {
                Blocks::new(black_box(data))
                    .unwrap()
                    .filter(Result::is_ok)
                    .count()
            })
        });

        group.bench_with_input(BenchmarkId::new("decode", colors), &data, |b, data| {
            b.iter(|| decode_bytes("bench", black_box(data), &options).unwrap())
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let options = DecodeOptions::default();

    for files in [8usize, 64] {
        let corpus: Vec<RawFile> = (0..files)
            .map(|i| RawFile::new(format!("c{i}"), encode_records(&random_records(i as u64, 200, 2))))
            .collect();
        group.throughput(Throughput::Elements(files as u64));

        group.bench_with_input(BenchmarkId::new("decode_all", files), &corpus, |b, corpus| {
            b.iter(|| decode_all(black_box(corpus), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_file, bench_batch);
criterion_main!(benches);
