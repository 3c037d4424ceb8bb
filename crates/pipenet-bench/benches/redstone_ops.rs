//! Criterion micro-benchmarks for redstone power propagation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use pipenet_bench::{pipe_lattice, pipe_line};
use pipenet_core::{CellPos, SpaceId};
use pipenet_redstone::{PipeNetwork, PowerSource, RedstoneGrid, MAX_POWER};

const SPACE: SpaceId = SpaceId(0);
const SOURCE: CellPos = CellPos::new(-1, 0, 0);

/// Benchmark: first update on an unpowered 1K-pipe line discovers the
/// net and broadcasts full power.
fn bench_power_line_1k(c: &mut Criterion) {
    let mut world = RedstoneGrid::new();
    pipe_line(&mut world, SPACE, 1000);

    c.bench_function("power_line_1k", |b| {
        b.iter_batched(
            || (world.clone(), PipeNetwork::new()),
            |(mut world, mut network)| {
                network.neighbor_update(&mut world, SPACE, CellPos::ORIGIN);
                black_box(network.process_updates(&mut world));
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: switch a source off and on next to a 16x4x16 pipe block.
fn bench_toggle_source_lattice_1k(c: &mut Criterion) {
    let mut world = RedstoneGrid::new();
    pipe_lattice(&mut world, SPACE, 16, 4);
    let mut network = PipeNetwork::new();
    let source = PowerSource { power: MAX_POWER };
    let _ = network.place(&mut world, SPACE, SOURCE, source.into());
    network.process_updates(&mut world);

    c.bench_function("toggle_source_lattice_1k", |b| {
        b.iter(|| {
            network.remove(&mut world, SPACE, SOURCE);
            black_box(network.process_updates(&mut world));
            let _ = network.place(&mut world, SPACE, SOURCE, source.into());
            black_box(network.process_updates(&mut world));
        });
    });
}

/// Benchmark: cut and restore the middle of a powered 1K-pipe line.
fn bench_split_rejoin_line_1k(c: &mut Criterion) {
    let mut world = RedstoneGrid::new();
    let cells = pipe_line(&mut world, SPACE, 1000);
    let mut network = PipeNetwork::new();
    network.neighbor_update(&mut world, SPACE, CellPos::ORIGIN);
    network.process_updates(&mut world);
    let middle = cells[cells.len() / 2];

    c.bench_function("split_rejoin_line_1k", |b| {
        b.iter(|| {
            let Some(pipe) = network.remove(&mut world, SPACE, middle) else {
                return;
            };
            network.process_updates(&mut world);
            let _ = network.place(&mut world, SPACE, middle, pipe);
            black_box(network.process_updates(&mut world));
        });
    });
}

criterion_group!(
    benches,
    bench_power_line_1k,
    bench_toggle_source_lattice_1k,
    bench_split_rejoin_line_1k
);
criterion_main!(benches);
