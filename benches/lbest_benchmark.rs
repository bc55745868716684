use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fastrand::Rng;
use lbpso::prelude::*;
use lbpso::test_functions::{Rastrigin, Rosenbrock, Sphere};

fn options(k: usize) -> [(&'static str, Float); 5] {
    [("c1", 0.5), ("c2", 0.3), ("w", 0.9), ("k", k as Float), ("p", 2.0)]
}

fn lbest_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("local-best pso: sphere");
    for n in [2, 5, 10, 20] {
        group.bench_with_input(BenchmarkId::new("k = 3", n), &n, |b, ndim| {
            b.iter(|| {
                let config = LocalBestConfig::new(30, *ndim, options(3))
                    .with_bounds((vec![-5.0; *ndim], vec![5.0; *ndim]));
                let mut pso = LocalBestPSO::new(config, Rng::with_seed(0)).unwrap();
                pso.optimize(&Sphere, 200, false).unwrap();
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("local-best pso: neighborhood size");
    for k in [2, 5, 10, 29] {
        group.bench_with_input(BenchmarkId::new("rastrigin", k), &k, |b, k| {
            b.iter(|| {
                let config = LocalBestConfig::new(30, 5, options(*k))
                    .with_bounds((vec![-5.12; 5], vec![5.12; 5]));
                let mut pso = LocalBestPSO::new(config, Rng::with_seed(0)).unwrap();
                pso.optimize(&Rastrigin, 200, false).unwrap();
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("local-best pso: rosenbrock");
    for n_particles in [10, 50, 100] {
        group.bench_with_input(
            BenchmarkId::new("n_particles", n_particles),
            &n_particles,
            |b, n_particles| {
                b.iter(|| {
                    let config = LocalBestConfig::new(*n_particles, 2, options(3))
                        .with_velocity_clamp((-1.0, 1.0));
                    let mut pso = LocalBestPSO::new(config, Rng::with_seed(0)).unwrap();
                    pso.optimize(&Rosenbrock, 200, false).unwrap();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, lbest_benchmark);
criterion_main!(benches);
