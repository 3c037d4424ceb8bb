//! Cell coordinates and their packed [`CellKey`] form.
//!
//! A [`CellPos`] packs into a single `u64` so member sets and caches can
//! store one integer per cell. Layout, most significant first:
//!
//! | bits   | field | range               |
//! |--------|-------|---------------------|
//! | 38..64 | x     | `[-2^25, 2^25)`     |
//! | 12..38 | z     | `[-2^25, 2^25)`     |
//! | 0..12  | y     | `[-2^11, 2^11)`     |
//!
//! Each field is stored in two's complement and sign-extended on unpack.

use crate::direction::Direction;
use crate::error::GridError;
use std::fmt;

const X_BITS: u32 = 26;
const Z_BITS: u32 = 26;
const Y_BITS: u32 = 12;
const Z_SHIFT: u32 = Y_BITS;
const X_SHIFT: u32 = Y_BITS + Z_BITS;
const MASK_X: u64 = (1 << X_BITS) - 1;
const MASK_Z: u64 = (1 << Z_BITS) - 1;
const MASK_Y: u64 = (1 << Y_BITS) - 1;

/// A cell position in a voxel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl CellPos {
    /// Smallest packable x and z.
    pub const MIN_XZ: i32 = -(1 << (X_BITS - 1));
    /// Largest packable x and z.
    pub const MAX_XZ: i32 = (1 << (X_BITS - 1)) - 1;
    /// Smallest packable y.
    pub const MIN_Y: i32 = -(1 << (Y_BITS - 1));
    /// Largest packable y.
    pub const MAX_Y: i32 = (1 << (Y_BITS - 1)) - 1;

    /// The origin cell.
    pub const ORIGIN: CellPos = CellPos::new(0, 0, 0);

    /// Create a position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The adjacent cell in `direction`.
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z.wrapping_add(dz),
        }
    }

    /// Whether this position fits the [`CellKey`] layout.
    pub fn is_packable(&self) -> bool {
        (Self::MIN_XZ..=Self::MAX_XZ).contains(&self.x)
            && (Self::MIN_XZ..=Self::MAX_XZ).contains(&self.z)
            && (Self::MIN_Y..=Self::MAX_Y).contains(&self.y)
    }

    /// Pack into a key, truncating out-of-range axes.
    ///
    /// Only packable positions round-trip; check with
    /// [`is_packable`](Self::is_packable) or use
    /// [`try_key`](Self::try_key) when the position is untrusted.
    pub fn key(&self) -> CellKey {
        CellKey(
            ((self.x as u64) & MASK_X) << X_SHIFT
                | ((self.z as u64) & MASK_Z) << Z_SHIFT
                | ((self.y as u64) & MASK_Y),
        )
    }

    /// Pack into a key, rejecting positions outside the packable range.
    pub fn try_key(&self) -> Result<CellKey, GridError> {
        if self.is_packable() {
            Ok(self.key())
        } else {
            Err(GridError::OutOfRange { pos: *self })
        }
    }
}

impl From<(i32, i32, i32)> for CellPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A [`CellPos`] packed into one integer, used as set and map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(pub u64);

impl CellKey {
    /// Unpack into a position.
    pub fn unpack(self) -> CellPos {
        let raw = self.0 as i64;
        CellPos {
            x: (raw >> X_SHIFT) as i32,
            y: ((raw << (64 - Y_BITS)) >> (64 - Y_BITS)) as i32,
            z: ((raw << (64 - X_SHIFT)) >> (64 - Z_BITS)) as i32,
        }
    }
}

impl From<CellPos> for CellKey {
    fn from(pos: CellPos) -> Self {
        pos.key()
    }
}

impl From<CellKey> for CellPos {
    fn from(key: CellKey) -> Self {
        key.unpack()
    }
}
