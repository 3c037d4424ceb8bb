//! The [`Grid`] trait: the world as seen by net managers.

use crate::occupant::Occupant;
use pipenet_core::{CellPos, SpaceId};

/// Read access to the occupants of a multi-space voxel world.
///
/// Implementations must return `None` for empty cells and for positions
/// that cannot exist in the world. A `None` is never an error; the cell
/// simply does not connect to anything.
pub trait Grid {
    /// The occupant at `cell` in `space`, if any.
    fn occupant(&self, space: SpaceId, cell: CellPos) -> Option<&dyn Occupant>;
}
