//! Criterion benchmarks for Greeks surfaces.
//!
//! Compares the vectorized and parallel evaluation strategies across grid
//! sizes, alongside the single-point evaluator they both build on.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use greeks_models::analytical::{evaluate, MarketParams, OptionType};
use greeks_models::surface::{Axis, AxisParameter, EvaluationMode, SurfaceGrid};

fn base() -> MarketParams {
    MarketParams::new(34.03, 40.0, 0.0412, 30.0 / 365.0, 0.35)
}

/// Square spot × volatility grid with `n` points per axis.
fn generate_grid(n: usize) -> SurfaceGrid {
    let spots = Axis::linspace(AxisParameter::Spot, 20.0, 60.0, n).unwrap();
    let vols = Axis::linspace(AxisParameter::Volatility, 0.05, 1.0, n).unwrap();
    SurfaceGrid::spot_volatility(spots, vols, base()).unwrap()
}

/// Benchmark one scalar evaluation per option side.
fn bench_point_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_evaluation");
    let params = base();

    for option_type in OptionType::ALL {
        group.bench_with_input(
            BenchmarkId::new("evaluate", option_type),
            &option_type,
            |b, &option_type| {
                b.iter(|| evaluate(black_box(&params), option_type));
            },
        );
    }

    group.finish();
}

/// Benchmark full-surface evaluation per strategy.
fn bench_surface_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_evaluation");

    for size in [50, 200, 500] {
        let grid = generate_grid(size);
        let label = format!("{}x{}", size, size);

        for mode in [EvaluationMode::Vectorized, EvaluationMode::Parallel] {
            group.bench_with_input(BenchmarkId::new(mode.to_string(), &label), &grid, |b, grid| {
                b.iter(|| grid.evaluate(OptionType::Call, black_box(mode)));
            });
        }

        // Mesh construction alone
        group.bench_with_input(BenchmarkId::new("mesh", &label), &grid, |b, grid| {
            b.iter(|| black_box(grid).mesh());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_point_evaluation, bench_surface_evaluation);
criterion_main!(benches);
