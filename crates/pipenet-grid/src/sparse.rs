//! Hash-backed sparse grid.

use crate::grid::Grid;
use crate::occupant::Occupant;
use indexmap::IndexMap;
use pipenet_core::{CellKey, CellPos, GridError, SpaceId};
use std::collections::HashMap;

/// A sparse multi-space grid storing one occupant per cell.
///
/// Cells are keyed by their packed [`CellKey`], so only positions in the
/// packable range can be occupied. Lookups of unpackable positions
/// return `None` rather than aliasing onto another cell.
#[derive(Clone, Debug)]
pub struct SparseGrid<O> {
    spaces: IndexMap<SpaceId, HashMap<CellKey, O>>,
}

impl<O> SparseGrid<O> {
    /// An empty grid.
    pub fn new() -> Self {
        Self {
            spaces: IndexMap::new(),
        }
    }

    /// Place `occupant` at `cell`, returning the previous occupant.
    pub fn insert(
        &mut self,
        space: SpaceId,
        cell: CellPos,
        occupant: O,
    ) -> Result<Option<O>, GridError> {
        let key = cell.try_key()?;
        Ok(self.spaces.entry(space).or_default().insert(key, occupant))
    }

    /// Clear `cell`, returning its occupant.
    pub fn remove(&mut self, space: SpaceId, cell: CellPos) -> Option<O> {
        if !cell.is_packable() {
            return None;
        }
        self.spaces.get_mut(&space)?.remove(&cell.key())
    }

    /// The occupant at `cell`.
    pub fn get(&self, space: SpaceId, cell: CellPos) -> Option<&O> {
        if !cell.is_packable() {
            return None;
        }
        self.spaces.get(&space)?.get(&cell.key())
    }

    /// Mutable access to the occupant at `cell`.
    pub fn get_mut(&mut self, space: SpaceId, cell: CellPos) -> Option<&mut O> {
        if !cell.is_packable() {
            return None;
        }
        self.spaces.get_mut(&space)?.get_mut(&cell.key())
    }

    /// Whether `cell` is occupied.
    pub fn contains(&self, space: SpaceId, cell: CellPos) -> bool {
        self.get(space, cell).is_some()
    }

    /// Total number of occupied cells across all spaces.
    pub fn len(&self) -> usize {
        self.spaces.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spaces that have ever held an occupant, in first-use order.
    pub fn spaces(&self) -> impl Iterator<Item = SpaceId> + '_ {
        self.spaces.keys().copied()
    }

    /// Occupied cells of one space, in unspecified order.
    pub fn cells(&self, space: SpaceId) -> impl Iterator<Item = (CellPos, &O)> + '_ {
        self.spaces
            .get(&space)
            .into_iter()
            .flat_map(|cells| cells.iter().map(|(k, o)| (k.unpack(), o)))
    }
}

impl<O> Default for SparseGrid<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Occupant> Grid for SparseGrid<O> {
    fn occupant(&self, space: SpaceId, cell: CellPos) -> Option<&dyn Occupant> {
        self.get(space, cell).map(|o| o as &dyn Occupant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u8);

    impl Occupant for Marker {
        fn kind(&self) -> &str {
            "marker"
        }
    }

    const S: SpaceId = SpaceId(0);

    #[test]
    fn insert_get_remove() {
        let mut g = SparseGrid::new();
        let p = CellPos::new(3, -4, 5);
        assert_eq!(g.insert(S, p, Marker(1)).unwrap(), None);
        assert_eq!(g.insert(S, p, Marker(2)).unwrap(), Some(Marker(1)));
        assert_eq!(g.get(S, p), Some(&Marker(2)));
        assert_eq!(g.len(), 1);
        assert_eq!(g.remove(S, p), Some(Marker(2)));
        assert!(g.is_empty());
        assert_eq!(g.remove(S, p), None);
    }

    #[test]
    fn spaces_are_independent() {
        let mut g = SparseGrid::new();
        let p = CellPos::ORIGIN;
        g.insert(S, p, Marker(1)).unwrap();
        g.insert(SpaceId(9), p, Marker(2)).unwrap();
        assert_eq!(g.get(S, p), Some(&Marker(1)));
        assert_eq!(g.get(SpaceId(9), p), Some(&Marker(2)));
        assert_eq!(g.spaces().collect::<Vec<_>>(), vec![S, SpaceId(9)]);
        assert_eq!(g.cells(SpaceId(9)).count(), 1);
        assert_eq!(g.cells(SpaceId(4)).count(), 0);
    }

    #[test]
    fn unpackable_cells_rejected_and_never_alias() {
        let mut g = SparseGrid::new();
        let wrapped = CellPos::new(CellPos::MIN_XZ, 0, 0);
        g.insert(S, wrapped, Marker(1)).unwrap();

        let outside = CellPos::new(CellPos::MAX_XZ + 1, 0, 0);
        assert_eq!(outside.key(), wrapped.key());
        assert!(g.get(S, outside).is_none());
        assert!(g.insert(S, outside, Marker(2)).is_err());
        assert!(g.remove(S, outside).is_none());
    }

    #[test]
    fn grid_trait_exposes_occupants() {
        let mut g = SparseGrid::new();
        g.insert(S, CellPos::ORIGIN, Marker(7)).unwrap();
        let o = g.occupant(S, CellPos::ORIGIN).unwrap();
        assert_eq!(o.kind(), "marker");
        assert_eq!(o.downcast_ref::<Marker>(), Some(&Marker(7)));
        assert!(g.occupant(S, CellPos::new(1, 0, 0)).is_none());
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut g = SparseGrid::new();
        g.insert(S, CellPos::ORIGIN, Marker(1)).unwrap();
        g.get_mut(S, CellPos::ORIGIN).unwrap().0 = 4;
        assert_eq!(g.get(S, CellPos::ORIGIN), Some(&Marker(4)));
    }
}
