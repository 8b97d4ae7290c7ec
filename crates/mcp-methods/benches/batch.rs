use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mcp_math::low_discrepancy;
use mcp_methods::{BarrierSide, BatchDriver, KnockOut, NeverCancel, PathGenerator};
use mcp_processes::{black_scholes_process, StochasticProcess1D};
use mcp_termstructures::{BlackConstantVol, FlatForward};
use mcp_time::{Actual365Fixed, Date};
use ndarray::Array2;
use std::hint::black_box;
use std::sync::Arc;

// Batch path generation throughput.
// Goals:
// - bridge overhead should stay small next to the process steps
// - knock-out rows should be cheaper than full rows

fn process() -> Arc<dyn StochasticProcess1D> {
    let today = Date::from_ymd(2020, 2, 24).expect("valid date");
    Arc::new(black_scholes_process(
        1.0,
        Arc::new(FlatForward::new(today, 0.03, Arc::new(Actual365Fixed))),
        Arc::new(BlackConstantVol::new(today, 0.2, Arc::new(Actual365Fixed))),
    ))
}

fn run(paths: usize, steps: usize, bridge: bool, knock_out: &KnockOut, out: &mut Array2<f64>) {
    let source = low_discrepancy(steps, 42).expect("sobol source");
    let mut gen = PathGenerator::new(process(), 1.0, steps, source, bridge).expect("generator");
    let outcome = BatchDriver::default()
        .generate_batch(&mut gen, knock_out, out.view_mut(), paths, &NeverCancel)
        .expect("batch should succeed");
    black_box(outcome);
}

fn bench_paths(c: &mut Criterion) {
    let steps = 252;
    let mut group = c.benchmark_group("batch_paths");
    for paths in [1_000, 10_000].iter() {
        let mut out = Array2::zeros((*paths, steps + 1));
        group.bench_with_input(BenchmarkId::new("bridge", paths), paths, |b, &n| {
            b.iter(|| run(n, steps, true, &KnockOut::none(), &mut out))
        });
        group.bench_with_input(BenchmarkId::new("plain", paths), paths, |b, &n| {
            b.iter(|| run(n, steps, false, &KnockOut::none(), &mut out))
        });
    }
    group.finish();
}

fn bench_knock_out(c: &mut Criterion) {
    let steps = 252;
    let paths = 10_000;
    let mut out = Array2::zeros((paths, steps + 1));
    let dual = KnockOut::new(
        BarrierSide::constant(1.2, vec![true; steps + 1]),
        BarrierSide::constant(0.85, vec![true; steps + 1]),
    );
    c.bench_function("batch_dual_out", |b| {
        b.iter(|| run(paths, steps, true, black_box(&dual), &mut out))
    });
}

criterion_group!(benches, bench_paths, bench_knock_out);
criterion_main!(benches);
