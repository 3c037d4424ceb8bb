//! The host seam for redstone power, and an in-memory reference world.

use std::collections::VecDeque;

use pipenet_core::{CellPos, Direction, DirectionSet, GridError, SpaceId};
use pipenet_grid::{Grid, Occupant, SparseGrid};
use tracing::trace;

use crate::block::{Block, MAX_POWER};
use crate::guard::BroadcastGuard;

/// A world the redstone layer can read and change.
///
/// Implementors provide block storage, neighbour notifications and the
/// broadcast guard; the power queries are provided on top.
pub trait PowerWorld: Grid {
    /// The block at `cell`, if any.
    fn block(&self, space: SpaceId, cell: CellPos) -> Option<&Block>;

    /// Mutable access to the block at `cell`. Changes made through it do
    /// not notify neighbours.
    fn block_mut(&mut self, space: SpaceId, cell: CellPos) -> Option<&mut Block>;

    /// Put `block` at `cell` and notify its neighbours.
    fn place_block(
        &mut self,
        space: SpaceId,
        cell: CellPos,
        block: Block,
    ) -> Result<Option<Block>, GridError>;

    /// Take the block at `cell` and notify its neighbours.
    fn remove_block(&mut self, space: SpaceId, cell: CellPos) -> Option<Block>;

    /// Tell the six neighbours of `cell` that it changed.
    fn notify_neighbors(&mut self, space: SpaceId, cell: CellPos);

    /// The next pending neighbour update, if any.
    fn next_update(&mut self) -> Option<(SpaceId, CellPos)>;

    /// Number of pending neighbour updates.
    fn pending_updates(&self) -> usize;

    /// Spaces with a power broadcast in progress.
    fn broadcasts(&self) -> &BroadcastGuard;

    /// Mutable broadcast guard.
    fn broadcasts_mut(&mut self) -> &mut BroadcastGuard;

    /// Power stored in the pipe at `cell`; `None` if it is not a pipe.
    fn pipe_power(&self, space: SpaceId, cell: CellPos) -> Option<u8> {
        self.block(space, cell)
            .and_then(Block::as_pipe)
            .map(|pipe| pipe.power)
    }

    /// Set the power of the pipe at `cell`, clamped to [`MAX_POWER`],
    /// notifying neighbours if it changed. Returns whether it changed.
    fn set_pipe_power(&mut self, space: SpaceId, cell: CellPos, power: u8) -> bool {
        let power = power.min(MAX_POWER);
        let changed = match self.block_mut(space, cell) {
            Some(Block::Pipe(pipe)) if pipe.power != power => {
                pipe.power = power;
                true
            }
            _ => false,
        };
        if changed {
            self.notify_neighbors(space, cell);
        }
        changed
    }

    /// Sides the pipe at `cell` is connected on; empty if it is not a
    /// pipe.
    fn pipe_connections(&self, space: SpaceId, cell: CellPos) -> DirectionSet {
        self.block(space, cell)
            .and_then(Block::as_pipe)
            .map_or(DirectionSet::empty(), |pipe| pipe.connections)
    }

    /// Power the block at `cell` emits out of its `side`.
    fn emitted_power(&self, space: SpaceId, cell: CellPos, side: Direction) -> u8 {
        self.block(space, cell)
            .map_or(0, |block| block.emitted_power(side))
    }

    /// Power reaching `cell` from its neighbour in `direction`.
    fn incoming_power(&self, space: SpaceId, cell: CellPos, direction: Direction) -> u8 {
        self.emitted_power(space, cell.offset(direction), direction.opposite())
    }

    /// Strongest power reaching the pipe at `cell` through its connected
    /// sides from neighbours that are not pipes.
    fn outside_power(&self, space: SpaceId, cell: CellPos) -> u8 {
        self.pipe_connections(space, cell)
            .iter()
            .filter(|d| {
                !self
                    .block(space, cell.offset(*d))
                    .is_some_and(Block::is_pipe)
            })
            .map(|d| self.incoming_power(space, cell, d))
            .max()
            .unwrap_or(0)
    }
}

/// Reference [`PowerWorld`]: a sparse grid of [`Block`]s with a FIFO
/// neighbour-update queue.
///
/// Updates aimed at pipes in a broadcasting space are dropped at enqueue
/// time and counted; the broadcast already sets those pipes.
#[derive(Clone, Debug, Default)]
pub struct RedstoneGrid {
    blocks: SparseGrid<Block>,
    broadcasts: BroadcastGuard,
    updates: VecDeque<(SpaceId, CellPos)>,
    suppressed: u64,
}

impl RedstoneGrid {
    /// An empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `block` at `cell` without notifying anything. For building
    /// fixtures.
    pub fn insert(
        &mut self,
        space: SpaceId,
        cell: CellPos,
        block: Block,
    ) -> Result<Option<Block>, GridError> {
        self.blocks.insert(space, cell, block)
    }

    /// The underlying block storage.
    pub fn blocks(&self) -> &SparseGrid<Block> {
        &self.blocks
    }

    /// Updates dropped because their target pipe was broadcasting.
    pub fn suppressed_updates(&self) -> u64 {
        self.suppressed
    }

    /// Drop every pending update.
    pub fn clear_updates(&mut self) {
        self.updates.clear();
    }
}

impl Grid for RedstoneGrid {
    fn occupant(&self, space: SpaceId, cell: CellPos) -> Option<&dyn Occupant> {
        self.blocks.occupant(space, cell)
    }
}

impl PowerWorld for RedstoneGrid {
    fn block(&self, space: SpaceId, cell: CellPos) -> Option<&Block> {
        self.blocks.get(space, cell)
    }

    fn block_mut(&mut self, space: SpaceId, cell: CellPos) -> Option<&mut Block> {
        self.blocks.get_mut(space, cell)
    }

    fn place_block(
        &mut self,
        space: SpaceId,
        cell: CellPos,
        block: Block,
    ) -> Result<Option<Block>, GridError> {
        let previous = self.blocks.insert(space, cell, block)?;
        self.notify_neighbors(space, cell);
        Ok(previous)
    }

    fn remove_block(&mut self, space: SpaceId, cell: CellPos) -> Option<Block> {
        let removed = self.blocks.remove(space, cell)?;
        self.notify_neighbors(space, cell);
        Some(removed)
    }

    fn notify_neighbors(&mut self, space: SpaceId, cell: CellPos) {
        let broadcasting = self.broadcasts.is_active(space);
        for direction in Direction::ALL {
            let neighbor = cell.offset(direction);
            if !neighbor.is_packable() {
                continue;
            }
            if broadcasting && self.blocks.get(space, neighbor).is_some_and(Block::is_pipe) {
                self.suppressed += 1;
                trace!(%space, %neighbor, source = %cell, "suppressed pipe update during broadcast");
                continue;
            }
            self.updates.push_back((space, neighbor));
        }
    }

    fn next_update(&mut self) -> Option<(SpaceId, CellPos)> {
        self.updates.pop_front()
    }

    fn pending_updates(&self) -> usize {
        self.updates.len()
    }

    fn broadcasts(&self) -> &BroadcastGuard {
        &self.broadcasts
    }

    fn broadcasts_mut(&mut self) -> &mut BroadcastGuard {
        &mut self.broadcasts
    }
}
