//! What sits in a cell, and its optional connection capability.

use pipenet_core::{CellPos, Direction, NetType};
use std::any::Any;

/// Connection capability of a cell occupant.
///
/// The blocks on both sides of a face must answer `true` for there to
/// be a connection between them.
pub trait Connector {
    /// Whether the occupant at `cell` links towards `direction` for nets
    /// of `net_type`.
    fn is_connected_towards(&self, cell: CellPos, direction: Direction, net_type: NetType)
        -> bool;
}

/// Anything that can occupy a grid cell.
///
/// # Object Safety
///
/// Grids hand out occupants as `&dyn Occupant`. Use `downcast_ref` on
/// the trait object to recover a concrete type when a provider needs
/// its fields.
pub trait Occupant: Any {
    /// Registry key for this kind of occupant, e.g. `"redstone_pipe"`.
    fn kind(&self) -> &str;

    /// The occupant's own connection capability, if it has one.
    fn connector(&self) -> Option<&dyn Connector> {
        None
    }
}

impl dyn Occupant {
    /// Attempt to downcast to a concrete occupant type.
    pub fn downcast_ref<T: Occupant>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
