//! Pipenet: incremental connectivity nets for voxel grids.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! pipenet sub-crates. For most users, adding `pipenet` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pipenet::prelude::*;
//!
//! let space = SpaceId(0);
//! let mut world = RedstoneGrid::new();
//! let mut network = PipeNetwork::new();
//!
//! // A source feeding three east-west pipes.
//! let source = PowerSource { power: 15 };
//! network.place(&mut world, space, CellPos::new(-1, 0, 0), source.into()).unwrap();
//! for x in 0..3 {
//!     let pipe = RedstonePipe::new([Direction::West, Direction::East]);
//!     network.place(&mut world, space, CellPos::new(x, 0, 0), pipe.into()).unwrap();
//! }
//! assert!(network.process_updates(&mut world).settled());
//!
//! assert_eq!(world.pipe_power(space, CellPos::new(2, 0, 0)), Some(15));
//! assert_eq!(network.manager().live_nets(), 1);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pipenet-core` | Cell positions, directions, IDs, errors |
//! | [`grid`] | `pipenet-grid` | Grid access, connectors, the connector registry |
//! | [`net`] | `pipenet-net` | Nets, the net manager, hooks |
//! | [`redstone`] | `pipenet-redstone` | Power nets, ports, gates, the update loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types (`pipenet-core`).
///
/// [`types::CellPos`] and its packed [`types::CellKey`], the six
/// [`types::Direction`]s, and the [`types::NetId`] / [`types::NetType`] /
/// [`types::SpaceId`] identifiers.
pub use pipenet_core as types;

/// Grid access and connectivity (`pipenet-grid`).
///
/// The [`grid::Grid`] trait is the host seam; occupants expose a
/// [`grid::Connector`] directly or through a [`grid::ConnectorRegistry`].
pub use pipenet_grid as grid;

/// Connected-component nets (`pipenet-net`).
///
/// [`net::NetManager`] discovers, grows, merges and invalidates nets;
/// [`net::NetState`] carries per-net data and hooks.
pub use pipenet_net as net;

/// Redstone power over pipe nets (`pipenet-redstone`).
///
/// [`redstone::PipeNetwork`] reacts to world edits, and
/// [`redstone::RedstoneGrid`] is an in-memory world to drive it.
pub use pipenet_redstone as redstone;

/// Common imports for typical pipenet usage.
///
/// ```rust
/// use pipenet::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pipenet_core::{
        CellKey, CellPos, ConfigError, Direction, DirectionSet, GridError, NetId, NetType,
        SpaceId,
    };

    // Grid
    pub use pipenet_grid::{Connector, ConnectorRegistry, Grid, Occupant, SparseGrid};

    // Nets
    pub use pipenet_net::{Members, Net, NetManager, NetManagerConfig, NetState, TieBreak};

    // Redstone
    pub use pipenet_redstone::{
        Block, GateLogic, PipeNetwork, PipeNetworkConfig, PipePower, PowerSource, PowerWorld,
        RedstoneGateBlock, RedstoneGrid, RedstonePipe,
    };
}
