//! Event-level facade: what happens when redstone blocks are placed,
//! removed, or told a neighbour changed.

use pipenet_core::{CellPos, ConfigError, Direction, GridError, NetId, SpaceId};
use pipenet_net::{NetManager, NetManagerConfig};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::block::{Block, REDSTONE_PIPE_NET};
use crate::gate::GateLogic;
use crate::port::{connect_half_connections, PortRegistry};
use crate::power::PipePower;
use crate::world::PowerWorld;

// ── PipeNetworkConfig ──────────────────────────────────────────────

/// Configuration for a [`PipeNetwork`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipeNetworkConfig {
    /// Pipe net manager settings. Default: the redstone pipe net type.
    pub manager: NetManagerConfig,
    /// Upper bound on update passes per [`PipeNetwork::process_updates`]
    /// call. Default: 64.
    pub max_update_passes: usize,
}

impl Default for PipeNetworkConfig {
    fn default() -> Self {
        Self {
            manager: NetManagerConfig::new(REDSTONE_PIPE_NET),
            max_update_passes: Self::DEFAULT_MAX_UPDATE_PASSES,
        }
    }
}

impl PipeNetworkConfig {
    /// Default pass limit.
    pub const DEFAULT_MAX_UPDATE_PASSES: usize = 64;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.manager.validate()?;
        if self.max_update_passes == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "max_update_passes",
            });
        }
        Ok(())
    }
}

/// What a [`PipeNetwork::process_updates`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Passes run. Each pass handles the updates pending at its start.
    pub passes: usize,
    /// Neighbour updates handled.
    pub processed: usize,
    /// Updates still queued when the pass limit was hit.
    pub remaining: usize,
}

impl UpdateSummary {
    /// Whether the queue drained.
    pub fn settled(&self) -> bool {
        self.remaining == 0
    }
}

// ── PipeNetwork ────────────────────────────────────────────────────

/// Owns the pipe net manager and port registry and reacts to world
/// events.
#[derive(Debug)]
pub struct PipeNetwork {
    manager: NetManager<PipePower>,
    ports: PortRegistry,
    max_update_passes: usize,
}

impl Default for PipeNetwork {
    fn default() -> Self {
        Self {
            manager: NetManager::new(REDSTONE_PIPE_NET),
            ports: PortRegistry::with_defaults(),
            max_update_passes: PipeNetworkConfig::DEFAULT_MAX_UPDATE_PASSES,
        }
    }
}

impl PipeNetwork {
    /// Default configuration and the built-in port exposers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A network with a validated configuration.
    pub fn with_config(config: PipeNetworkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            manager: NetManager::with_config(config.manager)?,
            ports: PortRegistry::with_defaults(),
            max_update_passes: config.max_update_passes,
        })
    }

    /// Replace the port registry.
    pub fn with_ports(mut self, ports: PortRegistry) -> Self {
        self.ports = ports;
        self
    }

    /// The pipe net manager.
    pub fn manager(&self) -> &NetManager<PipePower> {
        &self.manager
    }

    /// Mutable pipe net manager.
    pub fn manager_mut(&mut self) -> &mut NetManager<PipePower> {
        &mut self.manager
    }

    /// The port registry.
    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    /// Mutable port registry.
    pub fn ports_mut(&mut self) -> &mut PortRegistry {
        &mut self.ports
    }

    /// Pass limit for [`process_updates`](Self::process_updates).
    pub fn max_update_passes(&self) -> usize {
        self.max_update_passes
    }

    /// Power stored in the pipe at `cell`.
    pub fn power_at<W: PowerWorld + ?Sized>(
        &self,
        world: &W,
        space: SpaceId,
        cell: CellPos,
    ) -> Option<u8> {
        world.pipe_power(space, cell)
    }

    /// Level of the net owning the pipe at `cell`, discovering the net if
    /// needed. `None` if `cell` holds no pipe.
    pub fn net_power<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) -> Option<u8> {
        world.pipe_power(space, cell)?;
        Some(self.manager.net_at(world, space, cell).state().level())
    }

    /// Place `block` at `cell`.
    ///
    /// A pipe starts at the outside power it sees, joins its
    /// neighbouring nets, and then completes half connections; gates
    /// complete half connections and compute their output. Neighbour
    /// updates queued by the placement run on the next
    /// [`process_updates`](Self::process_updates).
    pub fn place<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
        block: Block,
    ) -> Result<(), GridError> {
        if let Some(previous) = world.place_block(space, cell, block)? {
            if previous.is_pipe() {
                self.manager.invalidate_net_at(world, space, cell);
            }
        }
        match block {
            Block::Pipe(_) => {
                let outside = world.outside_power(space, cell);
                if let Some(Block::Pipe(pipe)) = world.block_mut(space, cell) {
                    pipe.power = outside;
                }
                let net = self.manager.add_to_net(world, space, cell);
                debug!(%space, %cell, net = %net, "placed redstone pipe");
                self.update_pipe(world, space, cell);
            }
            Block::Gate(_) => self.update_gate(world, space, cell),
            Block::Repeater(_) => self.update_repeater(world, space, cell),
            _ => {}
        }
        Ok(())
    }

    /// Remove whatever is at `cell`. A removed pipe discards its net.
    pub fn remove<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) -> Option<Block> {
        let removed = world.remove_block(space, cell)?;
        if removed.is_pipe() {
            self.manager.invalidate_net_at(world, space, cell);
            debug!(%space, %cell, "removed redstone pipe");
        }
        Some(removed)
    }

    /// React to a change next to `cell`.
    ///
    /// Pipes ignore updates while their space is broadcasting.
    pub fn neighbor_update<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) {
        match world.block(space, cell).copied() {
            Some(Block::Pipe(_)) if world.broadcasts().is_active(space) => {}
            Some(Block::Pipe(_)) => self.update_pipe(world, space, cell),
            Some(Block::Gate(_)) => self.update_gate(world, space, cell),
            Some(Block::Repeater(_)) => self.update_repeater(world, space, cell),
            _ => {}
        }
    }

    /// Drain the world's neighbour-update queue.
    ///
    /// Runs at most the configured number of passes; anything still
    /// queued after that is left for the next call, and a warning is
    /// logged, since it usually means a clock or feedback loop.
    pub fn process_updates<W: PowerWorld + ?Sized>(&mut self, world: &mut W) -> UpdateSummary {
        let mut summary = UpdateSummary::default();
        while summary.passes < self.max_update_passes && world.pending_updates() > 0 {
            summary.passes += 1;
            for _ in 0..world.pending_updates() {
                let Some((space, cell)) = world.next_update() else {
                    break;
                };
                self.neighbor_update(world, space, cell);
                summary.processed += 1;
            }
        }
        summary.remaining = world.pending_updates();
        if summary.remaining > 0 {
            warn!(
                passes = summary.passes,
                processed = summary.processed,
                remaining = summary.remaining,
                "neighbour updates did not settle within the pass limit"
            );
        }
        summary
    }

    /// Advance the gate at `cell` to its next logic. Returns the new
    /// logic, or `None` if `cell` holds no gate.
    pub fn cycle_gate_logic<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) -> Option<GateLogic> {
        let logic = match world.block_mut(space, cell) {
            Some(Block::Gate(gate)) => {
                gate.logic = gate.logic.next();
                gate.logic
            }
            _ => return None,
        };
        self.update_gate(world, space, cell);
        Some(logic)
    }

    /// Toggle output inversion of the gate at `cell`. Returns the new
    /// setting, or `None` if `cell` holds no gate.
    pub fn toggle_gate_invert<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) -> Option<bool> {
        let invert = match world.block_mut(space, cell) {
            Some(Block::Gate(gate)) => {
                gate.invert = !gate.invert;
                gate.invert
            }
            _ => return None,
        };
        self.update_gate(world, space, cell);
        Some(invert)
    }

    /// Complete half connections around `cell` and account for every
    /// block that gained one.
    fn connect<W: PowerWorld + ?Sized>(&mut self, world: &mut W, space: SpaceId, cell: CellPos) {
        let changed = connect_half_connections(world, &self.ports, space, cell);
        for target in changed {
            if world.block(space, target).is_some_and(Block::is_pipe) {
                self.join_connected_nets(world, space, target);
            }
            let is_gate = matches!(world.block(space, target), Some(Block::Gate(_)));
            if is_gate && target != cell {
                self.refresh_gate_output(world, space, target);
            }
            world.notify_neighbors(space, target);
        }
    }

    /// Merge the net of the pipe at `cell` with the nets it now connects
    /// to.
    fn join_connected_nets<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) {
        let own = self.manager.get_net(world, space, cell);
        let mut nets: SmallVec<[NetId; 7]> = SmallVec::new();
        nets.push(own);
        for direction in Direction::ALL {
            if self
                .manager
                .has_connection_to_neighbor(&*world, space, cell, direction)
            {
                let id = self.manager.get_net(world, space, cell.offset(direction));
                if !nets.contains(&id) {
                    nets.push(id);
                }
            }
        }
        if nets.len() == 1 {
            return;
        }
        // Neighbour builds may already have merged some of these away.
        let live: SmallVec<[NetId; 7]> = nets
            .iter()
            .filter(|id| self.manager.net(**id).is_some())
            .copied()
            .collect();
        let survivor = self.manager.merge_nets(world, live);
        debug!(%space, %cell, net = %survivor, "pipe connection joined nets");
    }

    /// Pipe reaction to a neighbour change: complete half connections,
    /// then recompute power from outside sources.
    fn update_pipe<W: PowerWorld + ?Sized>(&mut self, world: &mut W, space: SpaceId, cell: CellPos) {
        self.connect(world, space, cell);
        let Some(previous) = world.pipe_power(space, cell) else {
            return;
        };
        let outside = world.outside_power(space, cell);
        if outside == previous {
            return;
        }
        let net = self.manager.net_at(world, space, cell);
        let (members, state) = net.parts_mut();
        if outside > previous {
            state.set_power(members, world, outside);
        } else {
            let max = PipePower::max_outside_power(members, world);
            if max != previous {
                state.set_power(members, world, max);
            }
        }
    }

    /// Gate reaction to a neighbour change.
    fn update_gate<W: PowerWorld + ?Sized>(&mut self, world: &mut W, space: SpaceId, cell: CellPos) {
        self.connect(world, space, cell);
        self.refresh_gate_output(world, space, cell);
    }

    /// Recompute a gate's output from its inputs; notify on change.
    fn refresh_gate_output<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) {
        let Some(Block::Gate(gate)) = world.block(space, cell).copied() else {
            return;
        };
        let active = gate
            .inputs
            .iter()
            .filter(|side| world.incoming_power(space, cell, *side) > 0)
            .count() as u32;
        let powered = gate.output(active);
        if powered != gate.powered {
            if let Some(Block::Gate(gate)) = world.block_mut(space, cell) {
                gate.powered = powered;
            }
            world.notify_neighbors(space, cell);
        }
    }

    /// Repeater reaction: output follows the back input.
    fn update_repeater<W: PowerWorld + ?Sized>(
        &mut self,
        world: &mut W,
        space: SpaceId,
        cell: CellPos,
    ) {
        let Some(Block::Repeater(repeater)) = world.block(space, cell).copied() else {
            return;
        };
        let powered = world.incoming_power(space, cell, repeater.facing.opposite()) > 0;
        if powered != repeater.powered {
            if let Some(Block::Repeater(repeater)) = world.block_mut(space, cell) {
                repeater.powered = powered;
            }
            world.notify_neighbors(space, cell);
        }
    }
}
