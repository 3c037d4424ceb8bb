//! Redstone ports: which faces of a block read or write signals.
//!
//! Pipes auto-connect to neighbours through ports. A port is *active*
//! when the face is in use right now and *potential* when it would be
//! used once something connects to it. Where one side of a face is
//! active and the other potential and the two are compatible, the
//! potential side connects ([`connect_half_connections`]).
//!
//! Port lookup goes through a [`PortRegistry`] first, so hosts can
//! describe blocks they do not control and override built-in answers;
//! then the block's own [`RedstoneConnection`]; then the plain gate rule
//! for repeaters; otherwise the face has no port.

use std::fmt;

use indexmap::IndexMap;
use pipenet_core::{CellPos, Direction, SpaceId};
use pipenet_grid::Occupant;
use smallvec::SmallVec;

use crate::block::Block;
use crate::world::PowerWorld;

/// What a block face does with redstone signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// No connection.
    #[default]
    None,
    /// Writes, does not read.
    Out,
    /// Reads, does not write.
    In,
    /// Reads and writes.
    InOut,
    /// Would write if connected.
    PotentialOut,
    /// Would read if connected.
    PotentialIn,
    /// Would read and write if connected.
    PotentialInOut,
}

impl PortDirection {
    /// Whether the port reads signals (now or potentially).
    pub fn is_input(self) -> bool {
        matches!(self, Self::In | Self::InOut | Self::PotentialIn | Self::PotentialInOut)
    }

    /// Whether the port writes signals (now or potentially).
    pub fn is_output(self) -> bool {
        matches!(self, Self::Out | Self::InOut | Self::PotentialOut | Self::PotentialInOut)
    }

    /// Whether the port is in use right now.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Out | Self::In | Self::InOut)
    }

    /// Whether a signal can flow between this port and `other`.
    ///
    /// `None` connects to nothing; otherwise one side must be able to
    /// write what the other reads.
    pub fn can_connect_to(self, other: PortDirection) -> bool {
        if self == Self::None || other == Self::None {
            return false;
        }
        (self.is_input() && other.is_output()) || (self.is_output() && other.is_input())
    }
}

/// Port capability of a block that knows its own faces.
pub trait RedstoneConnection {
    /// The port on `side`.
    fn port(&self, side: Direction) -> PortDirection;

    /// Start using `direction` if possible. Returns whether anything
    /// changed.
    fn connect_towards(&mut self, direction: Direction) -> bool;
}

/// Port capability supplied from outside a block, registered per
/// [`Occupant::kind`](pipenet_grid::Occupant::kind).
pub trait PortExposer: Send + Sync {
    /// The port `block` has on `side`.
    fn port(&self, block: &Block, side: Direction) -> PortDirection;

    /// Start using `direction` if possible. Returns whether `block`
    /// changed. Fixed-function blocks keep the default.
    fn connect_towards(&self, block: &mut Block, direction: Direction) -> bool {
        let _ = (block, direction);
        false
    }
}

/// Observers output on their back face only.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObserverPorts;

impl PortExposer for ObserverPorts {
    fn port(&self, block: &Block, side: Direction) -> PortDirection {
        match block {
            Block::Observer(observer) if side == observer.back() => PortDirection::Out,
            _ => PortDirection::None,
        }
    }
}

/// Registry of [`PortExposer`]s keyed by block kind.
#[derive(Default)]
pub struct PortRegistry {
    exposers: IndexMap<String, Box<dyn PortExposer>>,
}

impl PortRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in exposers: observers output on their
    /// back.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("observer", ObserverPorts);
        registry
    }

    /// Register `exposer` for blocks of `kind`, returning the one it
    /// replaced.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        exposer: impl PortExposer + 'static,
    ) -> Option<Box<dyn PortExposer>> {
        self.exposers.insert(kind.into(), Box::new(exposer))
    }

    /// Remove the exposer for `kind`.
    pub fn unregister(&mut self, kind: &str) -> Option<Box<dyn PortExposer>> {
        self.exposers.shift_remove(kind)
    }

    /// Number of registered exposers.
    pub fn len(&self) -> usize {
        self.exposers.len()
    }

    /// Returns `true` if no exposers are registered.
    pub fn is_empty(&self) -> bool {
        self.exposers.is_empty()
    }

    /// The port `block` has on `side`.
    pub fn port_direction(&self, block: &Block, side: Direction) -> PortDirection {
        if let Some(exposer) = self.exposers.get(block.kind()) {
            return exposer.port(block, side);
        }
        if let Some(connection) = block.connection() {
            return connection.port(side);
        }
        match block {
            Block::Repeater(repeater) if side == repeater.facing => PortDirection::Out,
            Block::Repeater(repeater) if side == repeater.facing.opposite() => PortDirection::In,
            _ => PortDirection::None,
        }
    }

    /// Ask `block` to start using `direction`. Returns whether it
    /// changed.
    pub fn connect_towards(&self, block: &mut Block, direction: Direction) -> bool {
        if let Some(exposer) = self.exposers.get(block.kind()) {
            return exposer.connect_towards(block, direction);
        }
        block
            .connection_mut()
            .is_some_and(|connection| connection.connect_towards(direction))
    }

    /// The port of whatever occupies `cell` on `side`. Empty cells have
    /// none.
    pub fn port_at<W: PowerWorld + ?Sized>(
        &self,
        world: &W,
        space: SpaceId,
        cell: CellPos,
        side: Direction,
    ) -> PortDirection {
        world
            .block(space, cell)
            .map_or(PortDirection::None, |block| self.port_direction(block, side))
    }

    /// [`connect_towards`](Self::connect_towards) on the block at `cell`,
    /// in place and without neighbour notifications.
    pub fn connect_at<W: PowerWorld + ?Sized>(
        &self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
        direction: Direction,
    ) -> bool {
        world
            .block_mut(space, cell)
            .is_some_and(|block| self.connect_towards(block, direction))
    }
}

impl fmt::Debug for PortRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortRegistry")
            .field("kinds", &self.exposers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Complete half connections around `cell`.
///
/// For every face where one side's port is active, the other's is
/// potential, and the two are compatible, the potential side is asked to
/// connect. Returns the cells that gained a connection (`cell` itself
/// and/or neighbours), each once; empty when nothing changed.
///
/// Blocks are changed in place without neighbour notifications; the
/// caller decides what to notify.
pub fn connect_half_connections<W: PowerWorld + ?Sized>(
    world: &mut W,
    registry: &PortRegistry,
    space: SpaceId,
    cell: CellPos,
) -> SmallVec<[CellPos; 6]> {
    let mut changed: SmallVec<[CellPos; 6]> = SmallVec::new();
    for direction in Direction::ALL {
        let towards = registry.port_at(&*world, space, cell, direction);
        if towards == PortDirection::None {
            continue;
        }
        let neighbor = cell.offset(direction);
        let from = registry.port_at(&*world, space, neighbor, direction.opposite());
        if from == PortDirection::None
            || from.is_active() == towards.is_active()
            || !towards.can_connect_to(from)
        {
            continue;
        }
        let (target, side) = if towards.is_active() {
            (neighbor, direction.opposite())
        } else {
            (cell, direction)
        };
        if registry.connect_at(world, space, target, side) && !changed.contains(&target) {
            changed.push(target);
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Observer, PowerSource, RedstoneGateBlock, RedstonePipe, Repeater};
    use crate::world::RedstoneGrid;
    use pipenet_core::DirectionSet;
    use Direction::*;

    const SPACE: SpaceId = SpaceId(0);

    #[test]
    fn port_flags() {
        use PortDirection as P;
        let table = [
            (P::None, false, false, false),
            (P::Out, false, true, true),
            (P::In, true, false, true),
            (P::InOut, true, true, true),
            (P::PotentialOut, false, true, false),
            (P::PotentialIn, true, false, false),
            (P::PotentialInOut, true, true, false),
        ];
        for (port, input, output, active) in table {
            assert_eq!(port.is_input(), input, "{port:?}");
            assert_eq!(port.is_output(), output, "{port:?}");
            assert_eq!(port.is_active(), active, "{port:?}");
        }
    }

    #[test]
    fn compatibility() {
        use PortDirection as P;
        assert!(P::Out.can_connect_to(P::In));
        assert!(P::In.can_connect_to(P::Out));
        assert!(P::In.can_connect_to(P::PotentialInOut));
        assert!(P::PotentialOut.can_connect_to(P::PotentialIn));
        assert!(!P::In.can_connect_to(P::In));
        assert!(!P::Out.can_connect_to(P::PotentialOut));
        assert!(!P::None.can_connect_to(P::InOut));
        assert!(!P::InOut.can_connect_to(P::None));
    }

    #[test]
    fn lookup_order() {
        let mut registry = PortRegistry::with_defaults();
        let observer = Block::Observer(Observer { facing: Up, power: 0 });
        assert_eq!(registry.port_direction(&observer, Down), PortDirection::Out);
        assert_eq!(registry.port_direction(&observer, Up), PortDirection::None);

        let repeater = Block::Repeater(Repeater { facing: East, powered: false });
        assert_eq!(registry.port_direction(&repeater, East), PortDirection::Out);
        assert_eq!(registry.port_direction(&repeater, West), PortDirection::In);
        assert_eq!(registry.port_direction(&repeater, Up), PortDirection::None);

        let source = Block::Source(PowerSource { power: 15 });
        assert_eq!(registry.port_direction(&source, Up), PortDirection::None);

        // A registered exposer overrides the block's own ports.
        struct Deaf;
        impl PortExposer for Deaf {
            fn port(&self, _: &Block, _: Direction) -> PortDirection {
                PortDirection::None
            }
        }
        let pipe = Block::Pipe(RedstonePipe::new([Up]));
        assert_eq!(registry.port_direction(&pipe, Up), PortDirection::InOut);
        registry.register("redstone_pipe", Deaf);
        assert_eq!(registry.port_direction(&pipe, Up), PortDirection::None);
        assert!(registry.unregister("redstone_pipe").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registered_exposer_blocks_connection() {
        let registry = PortRegistry::with_defaults();
        let mut observer = Block::Observer(Observer { facing: Up, power: 0 });
        assert!(!registry.connect_towards(&mut observer, Down));
    }

    #[test]
    fn pipe_connects_to_active_gate_output() {
        let mut world = RedstoneGrid::new();
        let registry = PortRegistry::with_defaults();
        let pipe = CellPos::new(0, 0, 0);
        world.insert(SPACE, pipe, RedstonePipe::new([Up]).into()).unwrap();
        world.insert(SPACE, CellPos::new(1, 0, 0), RedstoneGateBlock::new(West).into()).unwrap();

        let changed = connect_half_connections(&mut world, &registry, SPACE, pipe);
        assert_eq!(changed.as_slice(), &[pipe]);
        assert_eq!(world.pipe_connections(SPACE, pipe), DirectionSet::from_iter([Up, East]));
        assert!(connect_half_connections(&mut world, &registry, SPACE, pipe).is_empty());
    }

    #[test]
    fn gate_gains_input_from_connected_pipe() {
        let mut world = RedstoneGrid::new();
        let registry = PortRegistry::with_defaults();
        let gate = CellPos::new(0, 0, 0);
        world.insert(SPACE, gate, RedstoneGateBlock::new(North).into()).unwrap();
        world.insert(SPACE, CellPos::new(0, 0, 1), RedstonePipe::new([North]).into()).unwrap();

        let changed = connect_half_connections(&mut world, &registry, SPACE, gate);
        assert_eq!(changed.as_slice(), &[gate]);
        match world.block(SPACE, gate) {
            Some(Block::Gate(g)) => assert!(g.inputs.contains(South)),
            other => panic!("expected gate, found {other:?}"),
        }
    }

    #[test]
    fn neighbour_is_asked_to_connect_when_it_is_potential() {
        let mut world = RedstoneGrid::new();
        let registry = PortRegistry::with_defaults();
        let observer = CellPos::new(0, 0, 0);
        // Observer facing up outputs down, into an unconnected pipe.
        world.insert(SPACE, observer, Observer { facing: Up, power: 0 }.into()).unwrap();
        let pipe = CellPos::new(0, -1, 0);
        world.insert(SPACE, pipe, RedstonePipe::default().into()).unwrap();

        let changed = connect_half_connections(&mut world, &registry, SPACE, observer);
        assert_eq!(changed.as_slice(), &[pipe]);
        assert!(world.pipe_connections(SPACE, pipe).contains(Up));
    }

    #[test]
    fn two_potential_sides_do_not_connect() {
        let mut world = RedstoneGrid::new();
        let registry = PortRegistry::with_defaults();
        world.insert(SPACE, CellPos::new(0, 0, 0), RedstonePipe::default().into()).unwrap();
        world.insert(SPACE, CellPos::new(1, 0, 0), RedstonePipe::default().into()).unwrap();
        assert!(connect_half_connections(&mut world, &registry, SPACE, CellPos::ORIGIN).is_empty());
    }
}
