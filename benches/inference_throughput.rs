//! Inference throughput benchmark
//!
//! Measures the cost of one closed-form test or interval, dominated by the
//! CDF and quantile evaluations, plus summarizing raw observations.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench inference_throughput
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dsstats::inference::{
    p_value, Alternative, CategoryCounts, ConditionObserver, ConditionWarning, DfMethod,
    Distribution, GroupSummaries, Inference, InferenceConfig, SummaryStatistics,
};

/// Drops warnings so small-sample groups don't accumulate state across iterations
struct Discard;

impl ConditionObserver for Discard {
    fn condition_not_met(&self, _warning: &ConditionWarning) {}
}

fn engine() -> Inference<Discard> {
    Inference::with_observer(InferenceConfig::default(), Discard).unwrap()
}

fn bench_p_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("p_value");
    for (name, distribution) in [
        ("normal", Distribution::Normal),
        ("student_t_9", Distribution::StudentT { df: 9.0 }),
        ("student_t_120", Distribution::StudentT { df: 120.0 }),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &distribution, |b, &dist| {
            b.iter(|| p_value(black_box(1.7), dist, Alternative::TwoSided).unwrap())
        });
    }
    group.finish();
}

fn bench_single_mean_test(c: &mut Criterion) {
    let engine = engine();
    let summary = SummaryStatistics::new(40, 50.5, 5.0).unwrap();

    c.bench_function("single_mean_test", |b| {
        b.iter(|| {
            engine
                .single_mean_test(black_box(&summary), black_box(50.0), Alternative::TwoSided)
                .unwrap()
        })
    });
}

fn bench_two_mean_test(c: &mut Criterion) {
    let engine = engine();
    let mut summaries = GroupSummaries::new();
    summaries.insert("Tea", SummaryStatistics::new(11, 34.8, 21.08).unwrap());
    summaries.insert("Coffee", SummaryStatistics::new(10, 17.7, 16.5).unwrap());

    let mut group = c.benchmark_group("two_mean_test");
    for (name, method) in [
        ("pooled_minimum", DfMethod::PooledMinimum),
        ("satterthwaite", DfMethod::Satterthwaite),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &method, |b, &method| {
            b.iter(|| {
                engine
                    .two_mean_test(
                        black_box(&summaries),
                        ("Tea", "Coffee"),
                        Alternative::Greater,
                        method,
                    )
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_two_proportions_test(c: &mut Criterion) {
    let engine = engine();
    let counts = CategoryCounts::from_pairs([("Lithium", 18), ("Placebo", 14), ("Other", 8)]);

    c.bench_function("two_proportions_test", |b| {
        b.iter(|| {
            engine
                .two_proportions_test(
                    black_box(&counts),
                    ("Lithium", "Placebo"),
                    Alternative::TwoSided,
                )
                .unwrap()
        })
    });
}

fn bench_mean_interval_from_observations(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("single_mean_interval_from_observations");

    for size in [100usize, 10_000, 1_000_000] {
        let values: Vec<f64> = (0..size).map(|i| (i % 97) as f64 * 0.5).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |b, values| {
            b.iter(|| {
                engine
                    .single_mean_interval_from_observations(black_box(values), 0.95)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_p_value,
    bench_single_mean_test,
    bench_two_mean_test,
    bench_two_proportions_test,
    bench_mean_interval_from_observations
);
criterion_main!(benches);
