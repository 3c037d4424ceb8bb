//! Logic functions for the configurable gate block.

use std::fmt;

/// How a gate combines its inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GateLogic {
    /// At least one input active.
    #[default]
    Or,
    /// At least two inputs active.
    Two,
    /// At least one input, and every input, active.
    And,
    /// An odd number of inputs active.
    Xor,
}

impl GateLogic {
    /// Every logic in cycling order.
    pub const ALL: [GateLogic; 4] = [GateLogic::Or, GateLogic::Two, GateLogic::And, GateLogic::Xor];

    /// Whether the gate fires with `active` of `total` inputs powered.
    pub fn evaluate(self, active: u32, total: u32) -> bool {
        match self {
            Self::Or => active >= 1,
            Self::Two => active >= 2,
            Self::And => active >= 1 && active == total,
            Self::Xor => active % 2 == 1,
        }
    }

    /// The next logic in [`ALL`](Self::ALL), wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Stable identifier, e.g. `"xor"`.
    pub fn id(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::Two => "two",
            Self::And => "and",
            Self::Xor => "xor",
        }
    }

    /// Parse an [`id`](Self::id). Unknown ids fall back to `Or`.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|l| l.id() == id)
            .unwrap_or_default()
    }
}

impl fmt::Display for GateLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
