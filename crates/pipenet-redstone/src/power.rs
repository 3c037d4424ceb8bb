//! Per-net power state of redstone pipe nets.

use std::cmp::Ordering;

use pipenet_core::{CellPos, SpaceId};
use pipenet_net::{Members, Net, NetState};
use tracing::trace;

use crate::block::MAX_POWER;
use crate::guard::with_broadcast;
use crate::world::PowerWorld;

/// The power level shared by every pipe of a net.
///
/// After any hook runs, every member pipe carries `level`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipePower {
    level: u8,
}

impl PipePower {
    /// The net's power level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set the level and push it to every member pipe under the
    /// broadcast guard. Returns how many pipes changed.
    pub fn set_power<W: PowerWorld + ?Sized>(
        &mut self,
        members: &Members,
        world: &mut W,
        level: u8,
    ) -> usize {
        let level = level.min(MAX_POWER);
        self.level = level;
        let changed = with_broadcast(world, members.spaces(), |world| {
            members
                .iter()
                .filter(|(space, cell)| world.set_pipe_power(*space, *cell, level))
                .count()
        });
        trace!(level, changed, members = members.len(), "broadcast pipe power");
        changed
    }

    /// Strongest outside power reaching any member pipe.
    pub fn max_outside_power<W: PowerWorld + ?Sized>(members: &Members, world: &W) -> u8 {
        members
            .iter()
            .map(|(space, cell)| world.outside_power(space, cell))
            .max()
            .unwrap_or(0)
    }
}

impl<W: PowerWorld + ?Sized> NetState<W> for PipePower {
    fn on_member_added(&mut self, members: &Members, world: &mut W, space: SpaceId, cell: CellPos) {
        let Some(stored) = world.pipe_power(space, cell) else {
            return;
        };
        let outside = world.outside_power(space, cell);
        match outside.cmp(&self.level) {
            Ordering::Greater => {
                self.set_power(members, world, outside);
            }
            _ if stored != self.level => {
                let level = self.level;
                with_broadcast(world, [space], |world| world.set_pipe_power(space, cell, level));
            }
            _ => {}
        }
    }

    fn on_net_merged(&mut self, members: &Members, world: &mut W, other: &Net<Self>) {
        let other_level = other.state().level;
        if other_level != self.level {
            let level = self.level.max(other_level);
            self.set_power(members, world, level);
        }
    }
}
