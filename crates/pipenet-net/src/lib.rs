//! Incremental connected-component nets over sparse voxel grids.
//!
//! A [`Net`] is a set of mutually connected cells sharing some domain
//! state. A [`NetManager`] answers "which net is this cell part of" from
//! a cache, discovers nets lazily by flood fill, extends them cheaply as
//! cells are placed, merges them when cells join two nets, and discards
//! a whole net when one of its cells is removed so it can be rediscovered
//! piecewise on the next query.
//!
//! Domain behaviour rides on structural events through the [`NetState`]
//! hooks; the manager itself knows nothing about what a net carries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod manager;
pub mod net;
pub mod stats;

pub use config::{NetManagerConfig, TieBreak};
pub use manager::NetManager;
pub use net::{Members, Net, NetState};
pub use stats::NetStats;
