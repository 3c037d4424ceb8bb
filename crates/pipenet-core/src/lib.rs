//! Core types for the pipenet workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers, cell coordinates, packed cell keys and directions
//! shared by the grid, net and redstone crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod direction;
pub mod error;
pub mod id;

pub use cell::{CellKey, CellPos};
pub use direction::{Direction, DirectionSet};
pub use error::{ConfigError, GridError};
pub use id::{NetId, NetType, SpaceId};
