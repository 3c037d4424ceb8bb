//! Redstone pipes on top of pipenet nets.
//!
//! Every pipe net carries one power level ([`PipePower`]) that is pushed
//! to all of its pipes whenever it changes. Pipes pick up power from the
//! non-pipe blocks they connect to, and auto-connect to neighbours
//! through the port model in [`port`]. [`PipeNetwork`] ties it together
//! at the level of world events: placements, removals and neighbour
//! updates.
//!
//! The host world is reached through the [`PowerWorld`] trait;
//! [`RedstoneGrid`] is an in-memory implementation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod gate;
pub mod guard;
pub mod network;
pub mod port;
pub mod power;
pub mod world;

pub use block::{
    Block, Observer, PowerSource, RedstoneGateBlock, RedstonePipe, Repeater, MAX_POWER,
    REDSTONE_PIPE_NET,
};
pub use gate::GateLogic;
pub use guard::{with_broadcast, BroadcastGuard};
pub use network::{PipeNetwork, PipeNetworkConfig, UpdateSummary};
pub use port::{
    connect_half_connections, ObserverPorts, PortDirection, PortExposer, PortRegistry,
    RedstoneConnection,
};
pub use power::PipePower;
pub use world::{PowerWorld, RedstoneGrid};
