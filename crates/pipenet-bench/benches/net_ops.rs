//! Criterion micro-benchmarks for net discovery, incremental adds,
//! merges and invalidation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use pipenet_bench::{lattice, scattered};
use pipenet_core::{CellPos, SpaceId};
use pipenet_net::NetManager;
use pipenet_test_utils::{Conduit, LineGrid, MockGrid, TEST_NET};

const SPACE: SpaceId = SpaceId(0);

fn lattice_grid(side: i32, height: i32) -> MockGrid {
    let mut grid = MockGrid::new();
    for cell in lattice(side, height) {
        grid.place(SPACE, cell, Conduit::all());
    }
    grid
}

/// Benchmark: discover a 10K-cell line from one end with a cold cache.
fn bench_flood_fill_line_10k(c: &mut Criterion) {
    let mut grid = LineGrid::new(10_000);

    c.bench_function("flood_fill_line_10k", |b| {
        b.iter(|| {
            let mut mgr = NetManager::<()>::new(TEST_NET);
            black_box(mgr.get_net(&mut grid, SPACE, CellPos::ORIGIN));
        });
    });
}

/// Benchmark: discover a 32x4x32 fully connected block (4K cells).
fn bench_flood_fill_lattice_4k(c: &mut Criterion) {
    let mut grid = lattice_grid(32, 4);

    c.bench_function("flood_fill_lattice_4k", |b| {
        b.iter(|| {
            let mut mgr = NetManager::<()>::new(TEST_NET);
            black_box(mgr.get_net(&mut grid, SPACE, CellPos::ORIGIN));
        });
    });
}

/// Benchmark: cached lookups over every cell of an already discovered
/// block.
fn bench_cached_lookup_lattice_4k(c: &mut Criterion) {
    let mut grid = lattice_grid(32, 4);
    let cells = lattice(32, 4);
    let mut mgr = NetManager::<()>::new(TEST_NET);
    mgr.get_net(&mut grid, SPACE, CellPos::ORIGIN);

    c.bench_function("cached_lookup_lattice_4k", |b| {
        b.iter(|| {
            for cell in &cells {
                black_box(mgr.get_net(&mut grid, SPACE, *cell));
            }
        });
    });
}

/// Benchmark: grow a 1K-cell line one placement at a time, each hitting
/// the single-neighbour fast path.
fn bench_fast_path_line_1k(c: &mut Criterion) {
    let cells: Vec<CellPos> = (0..1000).map(|x| CellPos::new(x, 0, 0)).collect();

    c.bench_function("fast_path_line_1k", |b| {
        b.iter_batched(
            || (MockGrid::new(), NetManager::<()>::new(TEST_NET)),
            |(mut grid, mut mgr)| {
                for cell in &cells {
                    grid.place(SPACE, *cell, Conduit::all());
                    black_box(mgr.add_to_net(&mut grid, SPACE, *cell));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: 800 seeded placements in a 16x4x16 box, forcing frequent
/// bridging merges.
fn bench_scattered_merges_800(c: &mut Criterion) {
    let cells = scattered(800, 16, 4, 42);

    c.bench_function("scattered_merges_800", |b| {
        b.iter_batched(
            || (MockGrid::new(), NetManager::<()>::new(TEST_NET)),
            |(mut grid, mut mgr)| {
                for cell in &cells {
                    grid.place(SPACE, *cell, Conduit::all());
                    mgr.add_to_net(&mut grid, SPACE, *cell);
                }
                black_box(mgr.live_nets());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: invalidate a 16x4x16 block and rediscover it.
fn bench_invalidate_rebuild_1k(c: &mut Criterion) {
    let mut grid = lattice_grid(16, 4);
    let mut mgr = NetManager::<()>::new(TEST_NET);
    mgr.get_net(&mut grid, SPACE, CellPos::ORIGIN);

    c.bench_function("invalidate_rebuild_1k", |b| {
        b.iter(|| {
            mgr.invalidate_net_at(&mut grid, SPACE, CellPos::ORIGIN);
            black_box(mgr.get_net(&mut grid, SPACE, CellPos::ORIGIN));
        });
    });
}

criterion_group!(
    benches,
    bench_flood_fill_line_10k,
    bench_flood_fill_lattice_4k,
    bench_cached_lookup_lattice_4k,
    bench_fast_path_line_1k,
    bench_scattered_merges_800,
    bench_invalidate_rebuild_1k
);
criterion_main!(benches);
