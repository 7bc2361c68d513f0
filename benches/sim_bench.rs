use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nbody2d::{BoxedSimulation, Simulation};
use ultraviolet::Vec2;

/// Body counts matching the demo's strategy-comparison presets.
const PRESETS: &[usize] = &[10, 100, 200, 400, 800, 1600, 2400];
const DT: f32 = 0.02;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("nbody_step");
    group.sample_size(20); // Reduce sample size for a faster sweep across presets

    for &count in PRESETS {
        group.throughput(Throughput::Elements(count as u64));

        let mut sim = Simulation::new(count).unwrap();
        sim.step(DT, Vec2::zero(), false).unwrap(); // Warmup
        group.bench_function(BenchmarkId::new("contiguous", count), |b| {
            b.iter(|| sim.step(DT, Vec2::zero(), false).unwrap());
        });

        let mut sim = Simulation::new(count).unwrap();
        sim.set_parallel(true);
        sim.step(DT, Vec2::zero(), false).unwrap();
        group.bench_function(BenchmarkId::new("parallel", count), |b| {
            b.iter(|| sim.step(DT, Vec2::zero(), false).unwrap());
        });

        let mut sim = BoxedSimulation::new(count).unwrap();
        sim.step(DT, Vec2::zero(), false).unwrap();
        group.bench_function(BenchmarkId::new("boxed", count), |b| {
            b.iter(|| sim.step(DT, Vec2::zero(), false).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
