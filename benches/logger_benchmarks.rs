//! Criterion benchmarks for structlog

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io;
use structlog::prelude::*;

fn sink() -> Logger {
    Logger::zero(vec![]).set_output(WriterAppender::new(io::sink()))
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("zero", |b| {
        b.iter(|| black_box(Logger::zero(vec![])));
    });

    group.bench_function("standard", |b| {
        b.iter(|| black_box(Logger::standard(vec![])));
    });

    let parent = sink();
    parent.info("warm", vec![]);
    group.bench_function("derive_and_first_use", |b| {
        b.iter(|| {
            let child = parent.derive(keyvals!["_u", "bench"]);
            child.debug(black_box("first"), vec![]);
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_text_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_logging");
    group.throughput(Throughput::Elements(1));

    let zero = sink();
    group.bench_function("zero_no_keyvals", |b| {
        b.iter(|| zero.info(black_box("message"), vec![]));
    });

    let standard = Logger::standard(vec![]).set_output(WriterAppender::new(io::sink()));
    group.bench_function("standard_no_keyvals", |b| {
        b.iter(|| standard.info(black_box("message"), vec![]));
    });

    for pairs in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::new("keyvals", pairs), &pairs, |b, &pairs| {
            b.iter(|| {
                let kv = (0..pairs)
                    .flat_map(|i| [Value::from(format!("k{}", i)), Value::from(i)])
                    .collect();
                zero.info(black_box("message"), kv);
            });
        });
    }

    group.finish();
}

fn bench_json_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_logging");
    group.throughput(Throughput::Elements(1));

    let log = sink().set_log_format(OutputFormat::Json);
    group.bench_function("four_keyvals", |b| {
        b.iter(|| {
            log.info(
                black_box("message"),
                keyvals!["user", "bob", "id", 42, "ok", true, "ratio", 0.5],
            )
        });
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let log = sink().set_log_level(LogLevel::Error);
    group.bench_function("debug_filtered", |b| {
        b.iter(|| log.debug(black_box("dropped"), vec![]));
    });

    group.bench_function("is_debug_check", |b| {
        b.iter(|| {
            if log.is_debug() {
                log.debug(black_box("dropped"), vec![]);
            }
        });
    });

    group.finish();
}

// ============================================================================
// Error Keyvals Benchmarks
// ============================================================================

fn bench_error_keyvals(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_keyvals");
    group.throughput(Throughput::Elements(1));

    let log = sink();
    let mut err = WrappedError::new(io::Error::new(io::ErrorKind::Other, "base"), keyvals!["layer", 0]);
    for layer in 1..8 {
        err = WrappedError::new(err, keyvals!["layer", layer]);
    }
    let err = Value::from(err);

    group.bench_function("eight_layers", |b| {
        b.iter(|| log.print_err(black_box("failed"), vec![Value::from("err"), err.clone()]));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_text_logging,
    bench_json_logging,
    bench_filtered,
    bench_error_keyvals,
);
criterion_main!(benches);
