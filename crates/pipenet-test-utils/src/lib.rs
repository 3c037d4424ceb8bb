//! Test utilities and mock grids for pipenet development.
//!
//! Provides a connectable [`Conduit`] occupant, grids that count their
//! occupant lookups ([`MockGrid`], [`LineGrid`]), and in [`fixtures`] a
//! hook-recording net state and cache invariant checkers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;

use pipenet_core::{CellPos, Direction, DirectionSet, NetType, SpaceId};
use pipenet_grid::{Connector, Grid, Occupant, SparseGrid};

pub use fixtures::{assert_cache_consistent, reference_components, HookEvent, RecordingState};

/// Net type answered by [`Conduit`] unless configured otherwise.
pub const TEST_NET: NetType = NetType("test:conduit");

/// Install a `tracing` subscriber writing to the test harness.
///
/// Filtered by `RUST_LOG`. Safe to call from every test; only the first
/// call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A pipe-like occupant connecting on a fixed set of sides for one net
/// type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conduit {
    pub sides: DirectionSet,
    pub net_type: NetType,
}

impl Conduit {
    /// Connects on every side for [`TEST_NET`].
    pub fn all() -> Self {
        Self {
            sides: DirectionSet::all(),
            net_type: TEST_NET,
        }
    }

    /// Connects on the given sides for [`TEST_NET`].
    pub fn sides(sides: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            sides: sides.into_iter().collect(),
            net_type: TEST_NET,
        }
    }

    pub fn of_type(mut self, net_type: NetType) -> Self {
        self.net_type = net_type;
        self
    }
}

impl Connector for Conduit {
    fn is_connected_towards(&self, _: CellPos, direction: Direction, net_type: NetType) -> bool {
        net_type == self.net_type && self.sides.contains(direction)
    }
}

impl Occupant for Conduit {
    fn kind(&self) -> &str {
        "conduit"
    }

    fn connector(&self) -> Option<&dyn Connector> {
        Some(self)
    }
}

/// A sparse grid of [`Conduit`]s that counts occupant lookups.
///
/// Panics on positions outside the packable range; tests should never
/// produce them by accident.
#[derive(Debug, Default)]
pub struct MockGrid {
    cells: SparseGrid<Conduit>,
    lookups: Cell<u64>,
}

impl MockGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, space: SpaceId, cell: CellPos, conduit: Conduit) -> Option<Conduit> {
        self.cells
            .insert(space, cell, conduit)
            .unwrap_or_else(|e| panic!("MockGrid::place: {e}"))
    }

    pub fn remove(&mut self, space: SpaceId, cell: CellPos) -> Option<Conduit> {
        self.cells.remove(space, cell)
    }

    pub fn contains(&self, space: SpaceId, cell: CellPos) -> bool {
        self.cells.contains(space, cell)
    }

    /// Place `len` fully connected conduits starting at `start` and
    /// stepping in `direction`. Returns their positions in order.
    pub fn line(
        &mut self,
        space: SpaceId,
        start: CellPos,
        direction: Direction,
        len: usize,
    ) -> Vec<CellPos> {
        let mut cells = Vec::with_capacity(len);
        let mut cell = start;
        for _ in 0..len {
            self.place(space, cell, Conduit::all());
            cells.push(cell);
            cell = cell.offset(direction);
        }
        cells
    }

    /// Every occupied cell in `space`.
    pub fn cells(&self, space: SpaceId) -> Vec<CellPos> {
        self.cells.cells(space).map(|(cell, _)| cell).collect()
    }

    /// Occupant lookups since creation or the last reset.
    pub fn lookups(&self) -> u64 {
        self.lookups.get()
    }

    pub fn reset_lookups(&self) {
        self.lookups.set(0);
    }
}

impl Grid for MockGrid {
    fn occupant(&self, space: SpaceId, cell: CellPos) -> Option<&dyn Occupant> {
        self.lookups.set(self.lookups.get() + 1);
        self.cells.occupant(space, cell)
    }
}

/// A storage-free grid holding one straight run of conduits along the
/// x axis at `y = 0, z = 0`, from `x = 0` to `x = len - 1`, in every
/// space.
///
/// Used for large nets in benchmarks where building a sparse grid would
/// dominate the measurement.
#[derive(Debug)]
pub struct LineGrid {
    len: i32,
    conduit: Conduit,
    lookups: Cell<u64>,
}

impl LineGrid {
    pub fn new(len: i32) -> Self {
        Self {
            len,
            conduit: Conduit::sides([Direction::West, Direction::East]),
            lookups: Cell::new(0),
        }
    }

    pub fn len(&self) -> i32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len <= 0
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.get()
    }

    pub fn reset_lookups(&self) {
        self.lookups.set(0);
    }
}

impl Grid for LineGrid {
    fn occupant(&self, _: SpaceId, cell: CellPos) -> Option<&dyn Occupant> {
        self.lookups.set(self.lookups.get() + 1);
        let on_line = cell.y == 0 && cell.z == 0 && (0..self.len).contains(&cell.x);
        on_line.then_some(&self.conduit as &dyn Occupant)
    }
}
