//! Net state and invariant fixtures.
//!
//! - [`RecordingState`] logs every hook call it receives.
//! - [`assert_cache_consistent`] checks that the cache and the live nets
//!   agree in both directions.
//! - [`reference_components`] computes connected components by a plain
//!   search, to compare managers against.

use std::collections::{BTreeSet, HashSet, VecDeque};

use pipenet_core::{CellPos, Direction, NetId, NetType, SpaceId};
use pipenet_grid::{connectivity, ConnectorRegistry, Grid};
use pipenet_net::{Members, Net, NetManager, NetState};

/// One hook call seen by a [`RecordingState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HookEvent {
    MemberAdded {
        space: SpaceId,
        cell: CellPos,
        size: usize,
    },
    MergeStarting {
        other: NetId,
        size: usize,
        other_size: usize,
    },
    Merged {
        other: NetId,
        size: usize,
    },
    Invalidated {
        space: SpaceId,
        cell: CellPos,
        size: usize,
    },
}

/// Net state that records every hook call with the net size at the time.
#[derive(Clone, Debug, Default)]
pub struct RecordingState {
    pub events: Vec<HookEvent>,
}

impl RecordingState {
    /// Cells reported by `on_member_added`, in call order.
    pub fn added(&self) -> Vec<CellPos> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HookEvent::MemberAdded { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect()
    }
}

impl<W: ?Sized> NetState<W> for RecordingState {
    fn on_member_added(&mut self, members: &Members, _: &mut W, space: SpaceId, cell: CellPos) {
        self.events.push(HookEvent::MemberAdded {
            space,
            cell,
            size: members.len(),
        });
    }

    fn on_net_merge_starting(&mut self, members: &Members, _: &mut W, other: &Net<Self>) {
        self.events.push(HookEvent::MergeStarting {
            other: other.id(),
            size: members.len(),
            other_size: other.size(),
        });
    }

    fn on_net_merged(&mut self, members: &Members, _: &mut W, other: &Net<Self>) {
        self.events.push(HookEvent::Merged {
            other: other.id(),
            size: members.len(),
        });
    }

    fn on_net_invalidated(&mut self, members: &Members, _: &mut W, space: SpaceId, cell: CellPos) {
        self.events.push(HookEvent::Invalidated {
            space,
            cell,
            size: members.len(),
        });
    }
}

/// Panic unless every cache entry names a live net containing the cell,
/// and every member of every live net is cached to that net.
pub fn assert_cache_consistent<S>(manager: &NetManager<S>) {
    for (space, cell, id) in manager.cache_entries() {
        let net = manager
            .net(id)
            .unwrap_or_else(|| panic!("cache entry {cell} in {space} names dead net {id}"));
        assert!(
            net.contains(space, cell),
            "cache entry {cell} in {space} names net {id}, which does not contain it"
        );
    }
    let mut members = 0;
    for net in manager.nets() {
        for (space, cell) in net.iter_members() {
            assert_eq!(
                manager.cached_net(space, cell),
                Some(net.id()),
                "member {cell} in {space} of net {} is not cached to it",
                net.id()
            );
            members += 1;
        }
    }
    assert_eq!(members, manager.cached_cells(), "cache holds cells no net owns");
}

/// Connected components of `cells` under mutual connection, each sorted,
/// the list sorted by first cell.
///
/// Only cells in `cells` are explored; pass every occupied cell.
pub fn reference_components<G: Grid + ?Sized>(
    grid: &G,
    registry: &ConnectorRegistry,
    net_type: NetType,
    space: SpaceId,
    cells: impl IntoIterator<Item = CellPos>,
) -> Vec<BTreeSet<CellPos>> {
    let cells: Vec<CellPos> = cells.into_iter().collect();
    let mut seen = HashSet::new();
    let mut components = Vec::new();
    for start in cells {
        if !seen.insert(start) {
            continue;
        }
        let mut component = BTreeSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            component.insert(cell);
            for d in Direction::ALL {
                if connectivity::has_connection_to_neighbor(grid, registry, space, cell, d, net_type)
                {
                    let next = cell.offset(d);
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        components.push(component);
    }
    components.sort();
    components
}
