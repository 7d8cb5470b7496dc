//! Benchmarks for indicator implementations.

use bourse_core::traits::Indicator;
use bourse_core::types::{PriceRecord, PriceSeries, Symbol};
use bourse_indicators::{Ema, IndicatorEngine, Kama, Rsi, Sma, StochRsi};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    let records = generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, close)| {
            let close = Decimal::try_from(close).unwrap().round_dp(2);
            PriceRecord::new(
                start + Duration::days(i as i64),
                close,
                close + Decimal::ONE,
                close - Decimal::ONE,
            )
        })
        .collect();
    PriceSeries::from_records(Symbol::new("BENCH").unwrap(), records)
}

fn benchmark_moving_averages(c: &mut Criterion) {
    let mut group = c.benchmark_group("MovingAverage");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sma", size), &data, |b, data| {
            let sma = Sma::new(20);
            b.iter(|| sma.series(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("ema", size), &data, |b, data| {
            let ema = Ema::new(20);
            b.iter(|| ema.series(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("kama", size), &data, |b, data| {
            let kama = Kama::new();
            b.iter(|| kama.series(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_oscillators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Oscillator");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("rsi", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.series(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("stoch_rsi", size), &data, |b, data| {
            let stoch = StochRsi::default();
            b.iter(|| stoch.series(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");
    let engine = IndicatorEngine::new();

    // Roughly one, five and twenty years of trading days
    for size in [250, 1250, 5000].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("calc_all", size), &series, |b, series| {
            b.iter(|| engine.calc_all(black_box(series)))
        });

        group.bench_with_input(BenchmarkId::new("rsi_gated", size), &series, |b, series| {
            let rsi = Rsi::default();
            b.iter(|| rsi.calculate(black_box(series)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_moving_averages, benchmark_oscillators, benchmark_engine);
criterion_main!(benches);
