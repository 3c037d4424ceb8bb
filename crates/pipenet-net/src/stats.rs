//! Operation counters for a [`NetManager`](crate::NetManager).

/// Cumulative counts of the structural work a manager has done.
///
/// Cheap to maintain; used by tests to prove which path an operation
/// took and by benchmarks to normalise timings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetStats {
    /// Nets created, including ones later merged away.
    pub nets_created: u64,
    /// Flood fills started by `build_net`.
    pub flood_fills: u64,
    /// Cells claimed by flood fills.
    pub cells_visited: u64,
    /// Cells added through the single-neighbour fast path.
    pub fast_path_adds: u64,
    /// Nets absorbed into a survivor.
    pub merges: u64,
    /// Nets discarded by invalidation.
    pub invalidations: u64,
}
