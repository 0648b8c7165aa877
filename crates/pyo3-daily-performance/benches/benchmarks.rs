use criterion::{criterion_group, criterion_main, Criterion};
use daily_performance_pyo3::{
    daily_performance, rolling_daily_performance, BreakEvenMethod, PerformanceConfig,
};
use std::hint::black_box;

// 确定性的伪随机日收益，约十年日线
fn synthetic_returns(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            0.0004 + 0.012 * (x * 0.37).sin() * (x * 0.011).cos()
        })
        .collect()
}

fn bench_daily_performance(c: &mut Criterion) {
    let returns = synthetic_returns(2520);
    c.bench_function("daily_performance 2520", |b| {
        b.iter(|| daily_performance(black_box(&returns), Some(252)))
    });
}

fn bench_rolling(c: &mut Criterion) {
    let returns = synthetic_returns(2520);
    let sequential = PerformanceConfig::default();
    let parallel = PerformanceConfig::default().with_n_jobs(8);
    let sorted = PerformanceConfig::default().with_break_even(BreakEvenMethod::SortedCumsum);

    let mut group = c.benchmark_group("rolling 252");
    group.bench_function("sequential", |b| {
        b.iter(|| rolling_daily_performance(black_box(&returns), 252, &sequential))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| rolling_daily_performance(black_box(&returns), 252, &parallel))
    });
    group.bench_function("sorted_cumsum", |b| {
        b.iter(|| rolling_daily_performance(black_box(&returns), 252, &sorted))
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(50);     // 样本数量（默认100）
    targets = bench_daily_performance, bench_rolling);
criterion_main!(benches);
