//! Connection predicates over a [`Grid`].
//!
//! These are pure functions of the current grid state. Nothing is
//! cached; callers that need speed cache the nets built from them.

use crate::grid::Grid;
use crate::registry::ConnectorRegistry;
use pipenet_core::{CellPos, Direction, DirectionSet, NetType, SpaceId};

/// Whether the occupant at `cell` offers a connection towards
/// `direction` for `net_type`. An empty cell is never connected.
pub fn is_connected_towards<G: Grid + ?Sized>(
    grid: &G,
    registry: &ConnectorRegistry,
    space: SpaceId,
    cell: CellPos,
    direction: Direction,
    net_type: NetType,
) -> bool {
    grid.occupant(space, cell)
        .is_some_and(|o| registry.is_connected_towards(o, cell, direction, net_type))
}

/// Whether `cell` and its neighbour in `direction` are mutually
/// connected: both sides must offer the connection towards each other.
///
/// Asymmetric connectors (an output-only face next to anything) never
/// connect. A neighbour outside the packable range never connects.
pub fn has_connection_to_neighbor<G: Grid + ?Sized>(
    grid: &G,
    registry: &ConnectorRegistry,
    space: SpaceId,
    cell: CellPos,
    direction: Direction,
    net_type: NetType,
) -> bool {
    let neighbor = cell.offset(direction);
    neighbor.is_packable()
        && is_connected_towards(grid, registry, space, cell, direction, net_type)
        && is_connected_towards(grid, registry, space, neighbor, direction.opposite(), net_type)
}

/// All directions in which `cell` has a mutual connection.
pub fn connected_directions<G: Grid + ?Sized>(
    grid: &G,
    registry: &ConnectorRegistry,
    space: SpaceId,
    cell: CellPos,
    net_type: NetType,
) -> DirectionSet {
    Direction::ALL
        .into_iter()
        .filter(|d| has_connection_to_neighbor(grid, registry, space, cell, *d, net_type))
        .collect()
}
