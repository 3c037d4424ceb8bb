//! Error types shared across the workspace.
//!
//! Only recoverable failures live here. Broken internal invariants (an
//! empty merge, an inconsistent net cache) panic instead.

use crate::cell::CellPos;
use std::error::Error;
use std::fmt;

/// Errors from grid construction and mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The position does not fit the packed cell key layout.
    OutOfRange {
        /// The offending position.
        pos: CellPos,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { pos } => {
                write!(
                    f,
                    "cell {pos} outside packable range (x/z in [{}, {}], y in [{}, {}])",
                    CellPos::MIN_XZ,
                    CellPos::MAX_XZ,
                    CellPos::MIN_Y,
                    CellPos::MAX_Y
                )
            }
        }
    }
}

impl Error for GridError {}

/// Errors detected while validating a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The net type name is empty.
    EmptyNetType,
    /// A pass or iteration limit was configured as zero.
    ZeroLimit {
        /// Name of the offending setting.
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNetType => write!(f, "net type name must not be empty"),
            Self::ZeroLimit { name } => write!(f, "{name} must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
