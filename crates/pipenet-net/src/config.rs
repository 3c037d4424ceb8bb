//! Net manager configuration.

use pipenet_core::{ConfigError, NetType};

// ── TieBreak ───────────────────────────────────────────────────────

/// Which net survives a merge between nets of equal size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The net with the lowest [`NetId`](pipenet_core::NetId) survives.
    #[default]
    OldestNet,
    /// The net with the highest [`NetId`](pipenet_core::NetId) survives.
    NewestNet,
}

// ── NetManagerConfig ───────────────────────────────────────────────

/// Configuration for a [`NetManager`](crate::NetManager).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetManagerConfig {
    /// The kind of net the manager maintains. Passed to every connector
    /// query.
    pub net_type: NetType,
    /// Survivor selection for equal-size merges. Default: `OldestNet`.
    pub tie_break: TieBreak,
    /// Initial capacity of the flood-fill frontier buffers. Default: 64.
    pub scratch_capacity: usize,
}

impl NetManagerConfig {
    /// Default frontier buffer capacity.
    pub const DEFAULT_SCRATCH_CAPACITY: usize = 64;

    /// Defaults for `net_type`.
    pub fn new(net_type: NetType) -> Self {
        Self {
            net_type,
            tie_break: TieBreak::default(),
            scratch_capacity: Self::DEFAULT_SCRATCH_CAPACITY,
        }
    }

    /// Set the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.net_type.name().is_empty() {
            return Err(ConfigError::EmptyNetType);
        }
        Ok(())
    }
}
