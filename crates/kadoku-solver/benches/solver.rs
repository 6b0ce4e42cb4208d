//! Benchmarks for the step-engine driver loop.
//!
//! Measures `StepSolver::finish` from an empty grid for block lengths 2 and
//! 3. Fixed seeds keep the runs reproducible while still covering several
//! search trajectories per size.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, time::Duration};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use kadoku_core::Grid;
use kadoku_solver::StepSolver;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

const SEEDS: [u64; 3] = [0x00c0_ffee, 0xdead_beef, 0x1234_5678];

fn bench_finish(c: &mut Criterion) {
    let solver = StepSolver::new();

    for block_len in [2u8, 3] {
        for (i, seed) in SEEDS.into_iter().enumerate() {
            c.bench_with_input(
                BenchmarkId::new(format!("finish_k{block_len}"), format!("seed_{i}")),
                &seed,
                |b, &seed| {
                    b.iter_batched(
                        || {
                            (
                                hint::black_box(Grid::empty(block_len).unwrap()),
                                Pcg64Mcg::seed_from_u64(seed),
                            )
                        },
                        |(grid, mut rng)| solver.finish(grid, &mut rng),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = bench_finish
);
criterion_main!(benches);
