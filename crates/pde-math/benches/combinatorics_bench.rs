// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Combinatorics Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use pde_math::combinatorics::{block_offsets, total_indices};
use pde_math::sampling::{uniform_points, Bounds};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

/// Library sizing for a 2D problem: H=4 → V=15 sub-index values, D=4.
fn bench_library_size_2d(c: &mut Criterion) {
    c.bench_function("total_indices_v15_d4", |b| {
        b.iter(|| total_indices(black_box(15), black_box(4)))
    });
    c.bench_function("block_offsets_v15_d4", |b| {
        b.iter(|| block_offsets(black_box(15), black_box(4)))
    });
}

/// Per-epoch collocation sampling at the default training size.
fn bench_uniform_points(c: &mut Criterion) {
    let bounds = Bounds::new(vec![[0.0, 10.0], [-8.0, 8.0], [-8.0, 8.0]]).unwrap();
    let mut rng = StdRng::seed_from_u64(2026);

    c.bench_function("uniform_points_4000x3", |b| {
        b.iter(|| black_box(uniform_points(&bounds, 4000, &mut rng)))
    });
}

criterion_group!(benches, bench_library_size_2d, bench_uniform_points);
criterion_main!(benches);
