//! Criterion benchmarks for the indicator kernels.
//!
//! Input series are seeded random walks, so every run sees the same data.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ta_engine::batch::BatchProcessor;
use ta_engine::indicators::{ad, atr, bbands, ma, macd, macd_ext, obv, rsi, MaType};

const SEED: u64 = 42;

// Standard sizes for benchmarking
const SIZES: &[usize] = &[100, 1_000, 10_000, 100_000];

fn generate_series(n: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut price = 100.0_f64;
    (0..n)
        .map(|_| {
            price = (price * (1.0 + rng.gen_range(-0.02..0.02))).max(1.0);
            price
        })
        .collect()
}

fn generate_ohlcv(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    let close = generate_series(n);
    let mut rng = ChaCha8Rng::seed_from_u64(SEED + 1);
    let mut high = Vec::with_capacity(n);
    let mut low = Vec::with_capacity(n);
    let mut volume = Vec::with_capacity(n);
    for &c in &close {
        high.push(c * (1.0 + rng.gen_range(0.0..0.01)));
        low.push(c * (1.0 - rng.gen_range(0.0..0.01)));
        volume.push(rng.gen_range(1_000.0..100_000.0));
    }
    (high, low, close, volume)
}

fn bench_moving_averages(c: &mut Criterion) {
    for kind in MaType::ALL.into_iter().filter(|k| k.is_implemented()) {
        let mut group = c.benchmark_group(format!("ma_{}", kind.name().to_lowercase()));
        for &size in SIZES {
            let data = generate_series(size);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
                b.iter(|| ma(black_box(data), black_box(20), kind));
            });
        }
        group.finish();
    }
}

fn bench_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsi");
    for &size in SIZES {
        let data = generate_series(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| rsi(black_box(data), black_box(14)));
        });
    }
    group.finish();
}

fn bench_macd(c: &mut Criterion) {
    let mut group = c.benchmark_group("macd");
    for &size in SIZES {
        let data = generate_series(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("ema", size), &data, |b, data| {
            b.iter(|| macd(black_box(data), black_box(12), black_box(26), black_box(9)));
        });
        group.bench_with_input(BenchmarkId::new("tema_wma_sma", size), &data, |b, data| {
            b.iter(|| {
                macd_ext(
                    black_box(data),
                    12,
                    MaType::Tema,
                    26,
                    MaType::Wma,
                    9,
                    MaType::Sma,
                )
            });
        });
    }
    group.finish();
}

fn bench_bbands(c: &mut Criterion) {
    let mut group = c.benchmark_group("bbands");
    for &size in SIZES {
        let data = generate_series(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| bbands(black_box(data), black_box(20), 2.0, 2.0, MaType::Sma));
        });
    }
    group.finish();
}

fn bench_atr(c: &mut Criterion) {
    let mut group = c.benchmark_group("atr");
    for &size in SIZES {
        let (high, low, close, _) = generate_ohlcv(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(high, low, close),
            |b, (h, l, c)| b.iter(|| atr(black_box(h), black_box(l), black_box(c), black_box(14))),
        );
    }
    group.finish();
}

fn bench_volume(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume");
    for &size in SIZES {
        let (high, low, close, volume) = generate_ohlcv(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("obv", size),
            &(close.clone(), volume.clone()),
            |b, (c, v)| b.iter(|| obv(black_box(c), black_box(v))),
        );
        group.bench_with_input(
            BenchmarkId::new("ad", size),
            &(high, low, close, volume),
            |b, (h, l, c, v)| b.iter(|| ad(black_box(h), black_box(l), black_box(c), black_box(v))),
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_sma");
    let series: Vec<Vec<f64>> = (0..2_000).map(|_| generate_series(1_000)).collect();
    group.throughput(Throughput::Elements(2_000 * 1_000));
    for threshold in [usize::MAX, 1] {
        let processor = BatchProcessor::new().min_parallel_threshold(threshold);
        let label = if processor.runs_parallel(series.len()) {
            "parallel"
        } else {
            "sequential"
        };
        group.bench_function(BenchmarkId::new(label, threshold), |b| {
            b.iter(|| processor.process(black_box(&series), |s| ma(s, 20, MaType::Sma)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_moving_averages,
    bench_rsi,
    bench_macd,
    bench_bbands,
    bench_atr,
    bench_volume,
    bench_batch,
);
criterion_main!(benches);
