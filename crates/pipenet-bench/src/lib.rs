//! Benchmark layouts for the pipenet net manager.
//!
//! Builds deterministic cell layouts and pre-populated redstone worlds:
//!
//! - [`lattice`]: every cell of a box
//! - [`scattered`]: seeded unique cells inside a box
//! - [`pipe_line`]: a straight pipe line fed by a source
//! - [`pipe_lattice`]: a solid block of fully connected pipes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use pipenet_core::{CellPos, Direction, DirectionSet, SpaceId};
use pipenet_redstone::{PowerSource, RedstoneGrid, RedstonePipe, MAX_POWER};

/// Every cell of the `side` x `height` x `side` box at the origin, in
/// x-fastest order.
pub fn lattice(side: i32, height: i32) -> Vec<CellPos> {
    let mut cells = Vec::with_capacity((side * side * height).max(0) as usize);
    for y in 0..height {
        for z in 0..side {
            for x in 0..side {
                cells.push(CellPos::new(x, y, z));
            }
        }
    }
    cells
}

/// `count` distinct cells inside the `side` x `height` x `side` box,
/// picked deterministically from `seed`.
///
/// # Panics
///
/// If the box holds fewer than `count` cells.
pub fn scattered(count: usize, side: i32, height: i32, seed: u64) -> Vec<CellPos> {
    let volume = (side as u64) * (side as u64) * (height as u64);
    assert!(count as u64 <= volume, "{count} cells do not fit in the box");
    let mut seen = HashSet::with_capacity(count);
    let mut cells = Vec::with_capacity(count);
    let mut state = seed;
    while cells.len() < count {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let mut index = (state >> 16) % volume;
        while seen.contains(&index) {
            index = (index + 1) % volume;
        }
        seen.insert(index);
        let index = index as i32;
        cells.push(CellPos::new(
            index % side,
            index / (side * side),
            (index / side) % side,
        ));
    }
    cells
}

/// A full-power source at x = -1 and `len` east-west pipes along x,
/// inserted without neighbour updates. Returns the pipe cells.
pub fn pipe_line(world: &mut RedstoneGrid, space: SpaceId, len: i32) -> Vec<CellPos> {
    let source = PowerSource { power: MAX_POWER };
    let _ = world.insert(space, CellPos::new(-1, 0, 0), source.into());
    (0..len)
        .map(|x| {
            let cell = CellPos::new(x, 0, 0);
            let pipe = RedstonePipe::new([Direction::West, Direction::East]);
            let _ = world.insert(space, cell, pipe.into());
            cell
        })
        .collect()
}

/// Fill the box of [`lattice`] with pipes connected on every side.
/// Returns the pipe cells.
pub fn pipe_lattice(world: &mut RedstoneGrid, space: SpaceId, side: i32, height: i32) -> Vec<CellPos> {
    let cells = lattice(side, height);
    for cell in &cells {
        let pipe = RedstonePipe::new(DirectionSet::all().iter());
        let _ = world.insert(space, *cell, pipe.into());
    }
    cells
}
