//! Re-entrancy guard for power broadcasts.
//!
//! Pushing a net's power to every member pipe changes those pipes, which
//! would notify their neighbours, which would recompute power and push
//! it again. While a space is broadcasting, pipes in it ignore neighbour
//! updates; the broadcast itself is what brings them up to date.

use indexmap::IndexSet;
use pipenet_core::SpaceId;
use smallvec::SmallVec;

use crate::world::PowerWorld;

/// The set of spaces with a broadcast in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BroadcastGuard {
    active: IndexSet<SpaceId>,
}

impl BroadcastGuard {
    /// No broadcasts in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `space` is broadcasting.
    pub fn is_active(&self, space: SpaceId) -> bool {
        self.active.contains(&space)
    }

    /// Whether any space is broadcasting.
    pub fn any_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Mark `space` as broadcasting. Returns `false` if it already was.
    pub fn enter(&mut self, space: SpaceId) -> bool {
        self.active.insert(space)
    }

    /// Clear the mark on `space`. Returns `false` if it was not set.
    pub fn exit(&mut self, space: SpaceId) -> bool {
        self.active.shift_remove(&space)
    }

    /// Spaces currently broadcasting.
    pub fn active_spaces(&self) -> impl Iterator<Item = SpaceId> + '_ {
        self.active.iter().copied()
    }
}

/// Run `f` with every space in `spaces` marked as broadcasting.
///
/// Spaces already active stay active afterwards; exactly the spaces this
/// call entered are exited once `f` returns.
pub fn with_broadcast<W, R>(
    world: &mut W,
    spaces: impl IntoIterator<Item = SpaceId>,
    f: impl FnOnce(&mut W) -> R,
) -> R
where
    W: PowerWorld + ?Sized,
{
    let mut entered: SmallVec<[SpaceId; 2]> = SmallVec::new();
    for space in spaces {
        if world.broadcasts_mut().enter(space) {
            entered.push(space);
        }
    }
    let result = f(world);
    for space in entered {
        world.broadcasts_mut().exit(space);
    }
    result
}
