//! The six face directions of a voxel and the [`DirectionSet`] bitset.

use std::fmt;

/// One of the six faces of a cell.
///
/// Declaration order is the canonical iteration order used everywhere a
/// cell's neighbours are visited, so fills and broadcasts are
/// deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Negative y.
    Down,
    /// Positive y.
    Up,
    /// Negative z.
    North,
    /// Positive z.
    South,
    /// Negative x.
    West,
    /// Positive x.
    East,
}

impl Direction {
    /// All six directions in canonical order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Unit offset `(dx, dy, dz)` of this direction.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name, e.g. `"north"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
            Self::North => "north",
            Self::South => "south",
            Self::West => "west",
            Self::East => "east",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`Direction`]s packed into one byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet {
    bits: u8,
}

impl DirectionSet {
    const MASK: u8 = 0b11_1111;

    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set of all six directions.
    pub const fn all() -> Self {
        Self { bits: Self::MASK }
    }

    /// A set holding exactly `direction`.
    pub fn only(direction: Direction) -> Self {
        Self {
            bits: 1 << direction.index(),
        }
    }

    /// Add a direction. Returns `true` if it was not present before.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let bit = 1 << direction.index();
        let added = self.bits & bit == 0;
        self.bits |= bit;
        added
    }

    /// Remove a direction. Returns `true` if it was present.
    pub fn remove(&mut self, direction: Direction) -> bool {
        let bit = 1 << direction.index();
        let present = self.bits & bit != 0;
        self.bits &= !bit;
        present
    }

    /// Whether `direction` is in the set.
    pub fn contains(&self, direction: Direction) -> bool {
        self.bits & (1 << direction.index()) != 0
    }

    /// Builder-style insert.
    pub fn with(mut self, direction: Direction) -> Self {
        self.insert(direction);
        self
    }

    /// Number of directions in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate the contained directions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::empty();
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }

    #[test]
    fn opposite_offsets_cancel() {
        for d in Direction::ALL {
            let (ax, ay, az) = d.offset();
            let (bx, by, bz) = d.opposite().offset();
            assert_eq!((ax + bx, ay + by, az + bz), (0, 0, 0));
        }
    }

    #[test]
    fn index_matches_canonical_order() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn set_insert_remove() {
        let mut s = DirectionSet::empty();
        assert!(s.is_empty());
        assert!(s.insert(Direction::East));
        assert!(!s.insert(Direction::East));
        assert!(s.insert(Direction::Up));
        assert_eq!(s.len(), 2);
        assert!(s.contains(Direction::East));
        assert!(!s.contains(Direction::West));
        assert!(s.remove(Direction::East));
        assert!(!s.remove(Direction::East));
        assert_eq!(s, DirectionSet::only(Direction::Up));
    }

    #[test]
    fn set_iterates_in_canonical_order() {
        let s: DirectionSet = [Direction::East, Direction::Down, Direction::North]
            .into_iter()
            .collect();
        let v: Vec<_> = s.iter().collect();
        assert_eq!(v, vec![Direction::Down, Direction::North, Direction::East]);
        assert_eq!(DirectionSet::all().len(), 6);
    }
}
