//! World-step throughput benchmark

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shoalhunt::core::config::SimulationConfig;
use shoalhunt::metrics::NullMetrics;
use shoalhunt::sim::world::HuntWorld;

fn bench_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for &count in &[50usize, 200, 800] {
        group.bench_function(format!("{}_agents", count), |b| {
            let mut world = HuntWorld::new(SimulationConfig::default()).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            world.spawn_school(count, &mut rng);
            world.add_obstacle(Vec3::new(0.0, 8.0, 12.0), 3.0);
            let mut sink = NullMetrics;

            b.iter(|| world.step(&mut sink));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_world_step);
criterion_main!(benches);
