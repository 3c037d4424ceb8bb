//! Blocks of the redstone reference world.
//!
//! Power flows out of a block's faces: [`Block::emitted_power`] answers
//! how much power leaves through one side. A cell's neighbour in
//! direction `d` powers it with whatever that neighbour emits out of its
//! side `d.opposite()`.

use pipenet_core::{CellPos, Direction, DirectionSet, NetType};
use pipenet_grid::{Connector, Occupant};

use crate::gate::GateLogic;
use crate::port::{PortDirection, RedstoneConnection};

/// Strongest redstone signal.
pub const MAX_POWER: u8 = 15;

/// Net type of redstone pipe nets.
pub const REDSTONE_PIPE_NET: NetType = NetType("pipenet:redstone_pipe");

/// A pipe carrying one power level across its whole net.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedstonePipe {
    /// Current power, `0..=MAX_POWER`.
    pub power: u8,
    /// Sides the pipe is connected on.
    pub connections: DirectionSet,
}

impl RedstonePipe {
    /// An unpowered pipe connected on `connections`.
    pub fn new(connections: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            power: 0,
            connections: connections.into_iter().collect(),
        }
    }

    /// Power leaving through `side`: the pipe's power on connected sides.
    pub fn emitted_power(&self, side: Direction) -> u8 {
        if self.connections.contains(side) {
            self.power
        } else {
            0
        }
    }
}

impl Connector for RedstonePipe {
    fn is_connected_towards(&self, _: CellPos, direction: Direction, net_type: NetType) -> bool {
        net_type == REDSTONE_PIPE_NET && self.connections.contains(direction)
    }
}

impl RedstoneConnection for RedstonePipe {
    fn port(&self, side: Direction) -> PortDirection {
        if self.connections.contains(side) {
            PortDirection::InOut
        } else {
            PortDirection::PotentialInOut
        }
    }

    fn connect_towards(&mut self, direction: Direction) -> bool {
        self.connections.insert(direction)
    }
}

/// A configurable logic gate with one output face and any number of
/// input faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedstoneGateBlock {
    /// The output side.
    pub facing: Direction,
    /// How inputs combine.
    pub logic: GateLogic,
    /// Invert the combined result.
    pub invert: bool,
    /// Sides read as inputs. Never contains `facing`.
    pub inputs: DirectionSet,
    /// Whether the output is currently on.
    pub powered: bool,
}

impl RedstoneGateBlock {
    /// An unpowered `Or` gate outputting towards `facing` with no inputs.
    pub fn new(facing: Direction) -> Self {
        Self {
            facing,
            logic: GateLogic::Or,
            invert: false,
            inputs: DirectionSet::empty(),
            powered: false,
        }
    }

    /// Add input sides. The facing side is skipped.
    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = Direction>) -> Self {
        for side in inputs {
            if side != self.facing {
                self.inputs.insert(side);
            }
        }
        self
    }

    /// Set the logic.
    pub fn with_logic(mut self, logic: GateLogic) -> Self {
        self.logic = logic;
        self
    }

    /// Set output inversion.
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// The output for `active` of the configured inputs powered.
    pub fn output(&self, active: u32) -> bool {
        self.logic.evaluate(active, self.inputs.len() as u32) != self.invert
    }

    /// Full power out of the facing side while powered.
    pub fn emitted_power(&self, side: Direction) -> u8 {
        if self.powered && side == self.facing {
            MAX_POWER
        } else {
            0
        }
    }
}

impl RedstoneConnection for RedstoneGateBlock {
    fn port(&self, side: Direction) -> PortDirection {
        if side == self.facing {
            PortDirection::Out
        } else if self.inputs.contains(side) {
            PortDirection::In
        } else {
            PortDirection::PotentialIn
        }
    }

    fn connect_towards(&mut self, direction: Direction) -> bool {
        direction != self.facing && self.inputs.insert(direction)
    }
}

/// A block emitting constant power on every side, like a block of
/// redstone. Exposes no ports, so pipes never auto-connect to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerSource {
    /// Emitted power.
    pub power: u8,
}

/// Emits `power` out of its back, the side opposite `facing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observer {
    /// The side it watches.
    pub facing: Direction,
    /// Emitted power.
    pub power: u8,
}

impl Observer {
    /// The output side.
    pub fn back(&self) -> Direction {
        self.facing.opposite()
    }
}

/// A plain one-input gate: reads its back, outputs full power forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Repeater {
    /// The output side.
    pub facing: Direction,
    /// Whether the output is currently on.
    pub powered: bool,
}

/// Anything that can occupy a cell of a redstone world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    /// See [`RedstonePipe`].
    Pipe(RedstonePipe),
    /// See [`RedstoneGateBlock`].
    Gate(RedstoneGateBlock),
    /// See [`PowerSource`].
    Source(PowerSource),
    /// See [`Observer`].
    Observer(Observer),
    /// See [`Repeater`].
    Repeater(Repeater),
    /// Inert.
    Solid,
}

impl Block {
    /// Power leaving through `side`.
    pub fn emitted_power(&self, side: Direction) -> u8 {
        match self {
            Self::Pipe(pipe) => pipe.emitted_power(side),
            Self::Gate(gate) => gate.emitted_power(side),
            Self::Source(source) => source.power,
            Self::Observer(observer) if side == observer.back() => observer.power,
            Self::Repeater(repeater) if repeater.powered && side == repeater.facing => MAX_POWER,
            _ => 0,
        }
    }

    /// The pipe, if this is one.
    pub fn as_pipe(&self) -> Option<&RedstonePipe> {
        match self {
            Self::Pipe(pipe) => Some(pipe),
            _ => None,
        }
    }

    /// Whether this is a pipe.
    pub fn is_pipe(&self) -> bool {
        matches!(self, Self::Pipe(_))
    }

    /// The block's own port capability, if it has one.
    pub fn connection(&self) -> Option<&dyn RedstoneConnection> {
        match self {
            Self::Pipe(pipe) => Some(pipe),
            Self::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    /// Mutable port capability.
    pub fn connection_mut(&mut self) -> Option<&mut dyn RedstoneConnection> {
        match self {
            Self::Pipe(pipe) => Some(pipe),
            Self::Gate(gate) => Some(gate),
            _ => None,
        }
    }
}

impl From<RedstonePipe> for Block {
    fn from(pipe: RedstonePipe) -> Self {
        Self::Pipe(pipe)
    }
}

impl From<RedstoneGateBlock> for Block {
    fn from(gate: RedstoneGateBlock) -> Self {
        Self::Gate(gate)
    }
}

impl From<PowerSource> for Block {
    fn from(source: PowerSource) -> Self {
        Self::Source(source)
    }
}

impl From<Observer> for Block {
    fn from(observer: Observer) -> Self {
        Self::Observer(observer)
    }
}

impl From<Repeater> for Block {
    fn from(repeater: Repeater) -> Self {
        Self::Repeater(repeater)
    }
}

impl Occupant for Block {
    fn kind(&self) -> &str {
        match self {
            Self::Pipe(_) => "redstone_pipe",
            Self::Gate(_) => "redstone_gate",
            Self::Source(_) => "power_source",
            Self::Observer(_) => "observer",
            Self::Repeater(_) => "repeater",
            Self::Solid => "solid",
        }
    }

    fn connector(&self) -> Option<&dyn Connector> {
        match self {
            Self::Pipe(pipe) => Some(pipe),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn pipe_connects_only_on_flagged_sides_for_its_net_type() {
        let pipe = RedstonePipe::new([East, Up]);
        assert!(pipe.is_connected_towards(CellPos::ORIGIN, East, REDSTONE_PIPE_NET));
        assert!(!pipe.is_connected_towards(CellPos::ORIGIN, West, REDSTONE_PIPE_NET));
        assert!(!pipe.is_connected_towards(CellPos::ORIGIN, East, NetType("other")));
    }

    #[test]
    fn pipe_ports_and_emission() {
        let mut pipe = RedstonePipe::new([East]);
        pipe.power = 9;
        assert_eq!(pipe.port(East), PortDirection::InOut);
        assert_eq!(pipe.port(West), PortDirection::PotentialInOut);
        assert_eq!(pipe.emitted_power(East), 9);
        assert_eq!(pipe.emitted_power(West), 0);
        assert!(pipe.connect_towards(West));
        assert!(!pipe.connect_towards(West));
        assert_eq!(pipe.emitted_power(West), 9);
    }

    #[test]
    fn gate_ports() {
        let gate = RedstoneGateBlock::new(North).with_inputs([South, North, Up]);
        assert_eq!(gate.port(North), PortDirection::Out);
        assert_eq!(gate.port(South), PortDirection::In);
        assert_eq!(gate.port(Up), PortDirection::In);
        assert_eq!(gate.port(Down), PortDirection::PotentialIn);
        assert_eq!(gate.inputs.len(), 2);
    }

    #[test]
    fn gate_never_takes_input_from_its_output_side() {
        let mut gate = RedstoneGateBlock::new(North);
        assert!(!gate.connect_towards(North));
        assert!(gate.connect_towards(East));
        assert!(!gate.connect_towards(East));
    }

    #[test]
    fn gate_output_respects_invert() {
        let gate = RedstoneGateBlock::new(North)
            .with_inputs([South, East])
            .with_logic(GateLogic::And);
        assert!(!gate.output(1));
        assert!(gate.output(2));
        let inverted = gate.inverted(true);
        assert!(inverted.output(1));
        assert!(!inverted.output(2));
    }

    #[test]
    fn emission_by_block() {
        let mut gate = RedstoneGateBlock::new(Up);
        gate.powered = true;
        assert_eq!(Block::Gate(gate).emitted_power(Up), MAX_POWER);
        assert_eq!(Block::Gate(gate).emitted_power(Down), 0);

        let observer = Block::Observer(Observer { facing: North, power: 15 });
        assert_eq!(observer.emitted_power(South), 15);
        assert_eq!(observer.emitted_power(North), 0);

        let source = Block::Source(PowerSource { power: 7 });
        assert!(Direction::ALL.iter().all(|d| source.emitted_power(*d) == 7));

        let repeater = Block::Repeater(Repeater { facing: East, powered: true });
        assert_eq!(repeater.emitted_power(East), MAX_POWER);
        assert_eq!(repeater.emitted_power(West), 0);

        assert_eq!(Block::Solid.emitted_power(Up), 0);
    }

    #[test]
    fn only_pipes_are_connectors() {
        let pipe: Block = RedstonePipe::new([Up]).into();
        assert!(pipe.connector().is_some());
        assert!(Block::Solid.connector().is_none());
        assert_eq!(pipe.kind(), "redstone_pipe");
        let occupant: &dyn Occupant = &pipe;
        assert_eq!(occupant.downcast_ref::<Block>().and_then(Block::as_pipe).map(|p| p.connections.len()), Some(1));
    }
}
