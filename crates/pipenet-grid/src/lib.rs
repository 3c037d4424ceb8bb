//! Grid occupancy and connection capabilities for pipenet.
//!
//! This crate is the seam between the net manager and the host world.
//! The world exposes cells through the [`Grid`] trait; whatever sits in a
//! cell is an [`Occupant`] that may offer a [`Connector`] capability
//! saying in which directions it links up for a given net type.
//!
//! # Connectivity
//!
//! Two adjacent cells are connected only when both agree: see
//! [`connectivity::has_connection_to_neighbor`]. Occupants that do not
//! implement [`Connector`] themselves can still be given one through a
//! [`ConnectorRegistry`] provider keyed by occupant kind.
//!
//! # Reference grid
//!
//! [`SparseGrid`] is an in-memory hash-backed grid used by tests,
//! benchmarks and the redstone reference world.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod grid;
pub mod occupant;
pub mod registry;
pub mod sparse;

pub use grid::Grid;
pub use occupant::{Connector, Occupant};
pub use registry::{ConnectorProvider, ConnectorRegistry};
pub use sparse::SparseGrid;
