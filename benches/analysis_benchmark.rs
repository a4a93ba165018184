/// Benchmark module for testing performance of sales aggregation and ranking.
/// Measures time bucketing, Pareto ranking, full report building and caching.
use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use salestats::analysis::{aggregate, aggregate_dense, count_for_threshold, rank};
use salestats::app::{build_report, build_report_async};
use salestats::utils::{by_customer, by_product};
use salestats::{DashboardConfig, DashboardState, Granularity, Transaction};
use std::sync::Arc;
use tokio::runtime::Runtime;

const SUBGROUPS: [&str; 6] = [
    "Construccion",
    "Acabados",
    "Ferreteria",
    "Electricos",
    "Plomeria",
    "Herramientas",
];
const DEPARTMENTS: [&str; 4] = ["Antioquia", "Cundinamarca", "Valle", "Atlantico"];

/// Generate a synthetic sales dataset spanning three years
///
/// # Arguments
/// * `rows` - Number of transactions to generate
fn generate_dataset(rows: usize) -> Vec<Transaction> {
    let mut rng = StdRng::seed_from_u64(42);
    let origin = NaiveDate::from_ymd_opt(2014, 1, 10).unwrap();

    (0..rows)
        .map(|i| {
            let customer = rng.gen_range(0..500);
            let product = rng.gen_range(0..2000);
            let department = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];
            let value: f64 = rng.gen_range(1_000.0..2_000_000.0);
            Transaction {
                date: origin + Days::new(rng.gen_range(0..1116)),
                value,
                value_usd: value / 3_000.0,
                customer_id: format!("C{}", customer),
                customer_name: format!("Cliente {}", customer),
                product_id: format!("P{}", product),
                product_description: format!("Producto {}", product),
                subgroup: SUBGROUPS[product % SUBGROUPS.len()].to_string(),
                department: department.to_string(),
                city: format!("{} {}", department, customer % 3),
                document_id: format!("F-{}", i / 3),
            }
        })
        .collect()
}

/// Benchmark time bucketing at every granularity
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal_aggregation");
    let records = generate_dataset(50_000);

    for granularity in Granularity::ALL {
        group.bench_with_input(
            BenchmarkId::new("sparse", granularity),
            &granularity,
            |b, &g| b.iter(|| aggregate(&records, g).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("dense", granularity),
            &granularity,
            |b, &g| b.iter(|| aggregate_dense(&records, g).unwrap()),
        );
    }

    group.finish();
}

/// Benchmark grouping and Pareto ranking
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("pareto_ranking");
    let records = generate_dataset(50_000);

    group.bench_function("rank_products", |b| {
        b.iter(|| {
            let ranked = rank(by_product(&records)).unwrap();
            count_for_threshold(&ranked, 80.0)
        })
    });

    group.bench_function("rank_customers", |b| {
        b.iter(|| {
            let ranked = rank(by_customer(&records)).unwrap();
            count_for_threshold(&ranked, 30.0)
        })
    });

    group.finish();
}

/// Benchmark full report building, sequential and concurrent
fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_report");
    let rt = Runtime::new().unwrap();
    let records = generate_dataset(50_000);
    let shared: Arc<[Transaction]> = records.clone().into();
    let config = DashboardConfig::default();

    group.bench_function("build_report", |b| {
        b.iter(|| build_report(&records, &config).unwrap())
    });

    group.bench_function("build_report_async", |b| {
        b.iter(|| {
            rt.block_on(build_report_async(Arc::clone(&shared), config.clone()))
                .unwrap()
        })
    });

    group.finish();
}

/// Benchmark cached report retrieval
fn bench_caching(c: &mut Criterion) {
    let mut group = c.benchmark_group("caching");
    let mut state = DashboardState::new(generate_dataset(10_000), DashboardConfig::default()).unwrap();
    let selection = state.default_selection().unwrap();

    // Pre-populate cache
    state.report_for(&selection).unwrap();

    group.bench_function("cache_lookup", |b| {
        b.iter(|| state.report_for(&selection).unwrap())
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_aggregation, bench_ranking, bench_report, bench_caching
);
criterion_main!(benches);
