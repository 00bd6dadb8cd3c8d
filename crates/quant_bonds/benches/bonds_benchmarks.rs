//! Criterion benchmarks for quant_bonds.
//!
//! Covers the discounting primitive against schedule length and the
//! yield-to-maturity search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quant_bonds::{
    build_bond_cashflows, dirty_coupon_price_from_years, price_from_yield, YieldSolver,
};

/// Benchmark discounting as the number of coupon periods grows.
fn bench_price_from_yield(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_from_yield");

    for (years, m) in [(2, 2), (10, 2), (30, 2), (30, 12)] {
        let flows = build_bond_cashflows(100.0, 0.05, years, m).unwrap();
        group.bench_with_input(
            BenchmarkId::new("periods", flows.len()),
            &flows,
            |b, flows| b.iter(|| price_from_yield(black_box(flows), black_box(0.045), m).unwrap()),
        );
    }

    group.finish();
}

/// Benchmark the yield solver from a near and a distant seed.
fn bench_yield_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("yield_solver");
    let solver = YieldSolver::default();
    let flows = build_bond_cashflows(1000.0, 0.06, 30, 2).unwrap();
    let price = price_from_yield(&flows, 0.0525, 2).unwrap();

    for seed in [0.05, 1.5] {
        group.bench_with_input(BenchmarkId::new("seed", seed), &seed, |b, &seed| {
            b.iter(|| solver.solve(black_box(&flows), black_box(price), 2, seed).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the years-to-maturity dirty price adapter.
fn bench_dirty_price(c: &mut Criterion) {
    c.bench_function("dirty_coupon_price_from_years", |b| {
        b.iter(|| {
            dirty_coupon_price_from_years(1000.0, 0.06, black_box(0.05), black_box(7.3), 2).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_price_from_yield,
    bench_yield_solver,
    bench_dirty_price
);
criterion_main!(benches);
