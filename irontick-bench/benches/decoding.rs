//! Decoder benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use irontick_bench::frames::{full_depth_frame, ltp_frame, mixed_frame, quote_frame};
use irontick_core::{PriceDivisors, decode_frame};
use std::hint::black_box;

fn benchmark_ltp_frames(c: &mut Criterion) {
    let divisors = PriceDivisors::default();
    let frame = ltp_frame(64);

    c.bench_function("decode_ltp_x64", |b| {
        b.iter(|| decode_frame(black_box(&frame), &divisors))
    });
}

fn benchmark_quote_frames(c: &mut Criterion) {
    let divisors = PriceDivisors::default();
    let frame = quote_frame(64);

    c.bench_function("decode_quote_x64", |b| {
        b.iter(|| decode_frame(black_box(&frame), &divisors))
    });
}

fn benchmark_full_depth_frames(c: &mut Criterion) {
    let divisors = PriceDivisors::default();
    let frame = full_depth_frame(64);

    c.bench_function("decode_full_depth_x64", |b| {
        b.iter(|| decode_frame(black_box(&frame), &divisors))
    });
}

fn benchmark_mixed_frames(c: &mut Criterion) {
    let divisors = PriceDivisors::default();
    let frame = mixed_frame(64);

    c.bench_function("decode_mixed_x64", |b| {
        b.iter(|| decode_frame(black_box(&frame), &divisors))
    });
}

criterion_group!(
    benches,
    benchmark_ltp_frames,
    benchmark_quote_frames,
    benchmark_full_depth_frames,
    benchmark_mixed_frames,
);
criterion_main!(benches);
