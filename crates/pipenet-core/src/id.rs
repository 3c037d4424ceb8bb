//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one independent grid (a world or dimension).
///
/// Cells in different spaces are never adjacent and never share a net.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(pub u32);

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SpaceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a net within one net manager.
///
/// Allocated from a per-manager monotonic counter starting at 1, so a
/// lower id always belongs to an older net. Ids are never reused by the
/// manager that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(pub u64);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of net a manager maintains, e.g. `"pipenet:redstone_pipe"`.
///
/// Connectors answer connection queries per net type, so a single
/// occupant can take part in several unrelated kinds of nets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetType(pub &'static str);

impl NetType {
    /// The type name.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for NetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
