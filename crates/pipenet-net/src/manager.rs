//! The net manager: lazy discovery, incremental extension, merge and
//! invalidation of nets.
//!
//! The manager owns every live net and a cache from cells to the net
//! that owns them. A cache miss triggers a breadth-first flood fill over
//! mutual connections; a placed cell touching a single net joins it
//! without a fill; a placed cell bridging several nets merges them; a
//! removed cell discards its whole net, to be rediscovered piecewise by
//! later queries.
//!
//! Two invariants hold between operations:
//!
//! - every cache entry `(space, cell) -> id` names a live net that
//!   contains the cell;
//! - every member of every live net is cached to that net.
//!
//! Operations that find either broken panic: that can only follow from
//! a bug, never from world contents.

use std::collections::HashMap;
use std::mem;

use indexmap::{IndexMap, IndexSet};
use pipenet_core::{CellKey, CellPos, ConfigError, Direction, NetId, NetType, SpaceId};
use pipenet_grid::{connectivity, ConnectorRegistry, Grid};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::{NetManagerConfig, TieBreak};
use crate::net::{Net, NetState};
use crate::stats::NetStats;

/// Buffers reused across flood fills.
#[derive(Debug, Default)]
struct FillScratch {
    frontier: IndexSet<CellKey>,
    next: IndexSet<CellKey>,
    to_merge: IndexSet<NetId>,
}

impl FillScratch {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            frontier: IndexSet::with_capacity(capacity),
            next: IndexSet::with_capacity(capacity),
            to_merge: IndexSet::new(),
        }
    }
}

/// Tracks the nets of one [`NetType`] across any number of spaces.
///
/// `S` is the per-net domain state. Operations that may create a net
/// require `S: Default` (the factory) and `S: NetState<W>` for the world
/// type `W` the hooks receive.
pub struct NetManager<S> {
    config: NetManagerConfig,
    registry: ConnectorRegistry,
    nets: IndexMap<NetId, Net<S>>,
    cache: HashMap<SpaceId, HashMap<CellKey, NetId>>,
    next_id: u64,
    scratch: FillScratch,
    stats: NetStats,
}

impl<S> NetManager<S> {
    /// A manager for `net_type` with default configuration and an empty
    /// connector registry.
    pub fn new(net_type: NetType) -> Self {
        Self::from_config(NetManagerConfig::new(net_type))
    }

    /// A manager with a validated configuration.
    pub fn with_config(config: NetManagerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: NetManagerConfig) -> Self {
        let scratch = FillScratch::with_capacity(config.scratch_capacity);
        Self {
            config,
            registry: ConnectorRegistry::new(),
            nets: IndexMap::new(),
            cache: HashMap::new(),
            next_id: 1,
            scratch,
            stats: NetStats::default(),
        }
    }

    /// Install default connector providers.
    pub fn with_registry(mut self, registry: ConnectorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The connector registry consulted before occupants' own connectors.
    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    /// Mutable access to the connector registry.
    ///
    /// Changing providers does not touch cached nets; invalidate the
    /// affected cells if connectivity changed.
    pub fn registry_mut(&mut self) -> &mut ConnectorRegistry {
        &mut self.registry
    }

    /// The kind of net this manager maintains.
    pub fn net_type(&self) -> NetType {
        self.config.net_type
    }

    /// The active configuration.
    pub fn config(&self) -> &NetManagerConfig {
        &self.config
    }

    /// Cumulative operation counters.
    pub fn stats(&self) -> &NetStats {
        &self.stats
    }

    /// Zero the operation counters.
    pub fn reset_stats(&mut self) {
        self.stats = NetStats::default();
    }

    /// A live net by id.
    pub fn net(&self, id: NetId) -> Option<&Net<S>> {
        self.nets.get(&id)
    }

    /// A live net by id, mutably.
    pub fn net_mut(&mut self, id: NetId) -> Option<&mut Net<S>> {
        self.nets.get_mut(&id)
    }

    /// All live nets, in no particular order.
    pub fn nets(&self) -> impl Iterator<Item = &Net<S>> + '_ {
        self.nets.values()
    }

    /// Number of live nets.
    pub fn live_nets(&self) -> usize {
        self.nets.len()
    }

    /// Number of cached cells across all spaces.
    pub fn cached_cells(&self) -> usize {
        self.cache.values().map(HashMap::len).sum()
    }

    /// Every cache entry as `(space, cell, net)`. For diagnostics.
    pub fn cache_entries(&self) -> impl Iterator<Item = (SpaceId, CellPos, NetId)> + '_ {
        self.cache.iter().flat_map(|(space, cells)| {
            cells
                .iter()
                .map(move |(key, id)| (*space, key.unpack(), *id))
        })
    }

    /// The net cached at `cell`, without building one.
    pub fn cached_net(&self, space: SpaceId, cell: CellPos) -> Option<NetId> {
        if !cell.is_packable() {
            return None;
        }
        self.cached_key(space, cell.key())
    }

    fn cached_key(&self, space: SpaceId, key: CellKey) -> Option<NetId> {
        self.cache.get(&space)?.get(&key).copied()
    }

    /// Whether the occupant at `cell` offers a connection towards
    /// `direction` for this manager's net type.
    ///
    /// A provider registered for the occupant's kind wins over the
    /// occupant's own connector. An empty cell is never connected.
    pub fn is_connected_towards<W: Grid + ?Sized>(
        &self,
        world: &W,
        space: SpaceId,
        cell: CellPos,
        direction: Direction,
    ) -> bool {
        connectivity::is_connected_towards(
            world,
            &self.registry,
            space,
            cell,
            direction,
            self.config.net_type,
        )
    }

    /// Whether `cell` and its neighbour in `direction` connect to each
    /// other.
    pub fn has_connection_to_neighbor<W: Grid + ?Sized>(
        &self,
        world: &W,
        space: SpaceId,
        cell: CellPos,
        direction: Direction,
    ) -> bool {
        connectivity::has_connection_to_neighbor(
            world,
            &self.registry,
            space,
            cell,
            direction,
            self.config.net_type,
        )
    }

    /// Register a new empty net and return its id.
    pub fn create_net(&mut self) -> NetId
    where
        S: Default,
    {
        let id = NetId(self.next_id);
        self.next_id += 1;
        self.nets.insert(id, Net::new(id, S::default()));
        self.stats.nets_created += 1;
        id
    }

    fn live_mut(&mut self, id: NetId) -> &mut Net<S> {
        match self.nets.get_mut(&id) {
            Some(net) => net,
            None => panic!("net {id} is referenced but not live"),
        }
    }

    fn size_of(&self, id: NetId) -> usize {
        match self.nets.get(&id) {
            Some(net) => net.size(),
            None => panic!("cannot merge net {id}: not live"),
        }
    }
}

impl<S> NetManager<S> {
    /// The net owning `cell`, discovering it by flood fill on a cache
    /// miss.
    ///
    /// Never fails: a cell with no connections (or no occupant at all)
    /// yields a singleton net.
    ///
    /// # Panics
    ///
    /// If `cell` is outside the packable range and not already cached.
    pub fn get_net<W>(&mut self, world: &mut W, space: SpaceId, cell: CellPos) -> NetId
    where
        W: Grid + ?Sized,
        S: NetState<W> + Default,
    {
        match self.cached_net(space, cell) {
            Some(id) => id,
            None => self.build_net(world, space, cell),
        }
    }

    /// [`get_net`](Self::get_net), then borrow the net.
    pub fn net_at<W>(&mut self, world: &mut W, space: SpaceId, cell: CellPos) -> &mut Net<S>
    where
        W: Grid + ?Sized,
        S: NetState<W> + Default,
    {
        let id = self.get_net(world, space, cell);
        self.live_mut(id)
    }

    /// Flood-fill a new net outward from `start`.
    ///
    /// Cells already cached to other nets are not revisited; their nets
    /// are merged with the new one once the fill completes. Returns the
    /// id of the net that owns `start` afterwards.
    ///
    /// # Panics
    ///
    /// If `start` is outside the packable range.
    pub fn build_net<W>(&mut self, world: &mut W, space: SpaceId, start: CellPos) -> NetId
    where
        W: Grid + ?Sized,
        S: NetState<W> + Default,
    {
        assert!(
            start.is_packable(),
            "cannot build a net from {start}: outside the packable range"
        );
        let net_id = self.create_net();
        self.stats.flood_fills += 1;

        let mut frontier = mem::take(&mut self.scratch.frontier);
        let mut next = mem::take(&mut self.scratch.next);
        let mut to_merge = mem::take(&mut self.scratch.to_merge);
        frontier.clear();
        next.clear();
        to_merge.clear();

        frontier.insert(start.key());
        let mut claimed = 0u64;
        while !frontier.is_empty() {
            for &key in &frontier {
                match self.cached_key(space, key) {
                    Some(existing) if existing == net_id => {}
                    Some(existing) => {
                        to_merge.insert(existing);
                    }
                    None => {
                        claimed += 1;
                        let cell = key.unpack();
                        self.cache.entry(space).or_default().insert(key, net_id);
                        self.live_mut(net_id).add_member(world, space, cell);
                        for direction in Direction::ALL {
                            if self.has_connection_to_neighbor(&*world, space, cell, direction) {
                                let neighbor = cell.offset(direction).key();
                                if self.cached_key(space, neighbor) != Some(net_id) {
                                    next.insert(neighbor);
                                }
                            }
                        }
                    }
                }
            }
            mem::swap(&mut frontier, &mut next);
            next.clear();
        }
        self.stats.cells_visited += claimed;
        self.scratch.frontier = frontier;
        self.scratch.next = next;

        debug!(
            net_type = %self.config.net_type,
            net = %net_id,
            %space,
            %start,
            size = claimed,
            touching = to_merge.len(),
            "built net"
        );

        let owner = if to_merge.is_empty() {
            net_id
        } else {
            to_merge.insert(net_id);
            self.merge_set(world, &to_merge)
        };
        to_merge.clear();
        self.scratch.to_merge = to_merge;
        owner
    }

    /// Account for a newly placed connectable `cell`.
    ///
    /// If its mutual connections all lead into one net, the cell joins
    /// that net directly. Otherwise (no neighbouring net, or several)
    /// this falls back to [`get_net`](Self::get_net), which floods and
    /// merges as needed.
    ///
    /// # Panics
    ///
    /// If `cell` is outside the packable range.
    pub fn add_to_net<W>(&mut self, world: &mut W, space: SpaceId, cell: CellPos) -> NetId
    where
        W: Grid + ?Sized,
        S: NetState<W> + Default,
    {
        assert!(
            cell.is_packable(),
            "cannot add {cell} to a net: outside the packable range"
        );
        let mut neighbor_nets: SmallVec<[NetId; 6]> = SmallVec::new();
        for direction in Direction::ALL {
            if self.has_connection_to_neighbor(&*world, space, cell, direction) {
                let id = self.get_net(world, space, cell.offset(direction));
                if !neighbor_nets.contains(&id) {
                    neighbor_nets.push(id);
                }
            }
        }

        if let [single] = neighbor_nets.as_slice() {
            let single = *single;
            return match self.cached_net(space, cell) {
                // A neighbour's build already reached this cell.
                Some(existing) if existing == single => single,
                Some(existing) => self.merge_nets(world, [existing, single]),
                None => {
                    self.cache
                        .entry(space)
                        .or_default()
                        .insert(cell.key(), single);
                    self.live_mut(single).add_member(world, space, cell);
                    self.stats.fast_path_adds += 1;
                    trace!(net = %single, %space, %cell, "added cell to neighbouring net");
                    single
                }
            };
        }
        // Ids collected above may have been merged away by later
        // neighbour builds; get_net only ever returns live ones.
        self.get_net(world, space, cell)
    }

    /// Merge `nets` into the largest of them and return its id.
    ///
    /// Duplicates are ignored. Equal sizes are resolved by the
    /// configured [`TieBreak`]. Every other net, in input order, goes
    /// through `on_net_merge_starting`, has its cache entries repointed,
    /// is absorbed, goes through `on_net_merged`, and is dropped.
    ///
    /// # Panics
    ///
    /// If `nets` is empty or names a net that is not live.
    pub fn merge_nets<W>(
        &mut self,
        world: &mut W,
        nets: impl IntoIterator<Item = NetId>,
    ) -> NetId
    where
        W: Grid + ?Sized,
        S: NetState<W>,
    {
        let ids: IndexSet<NetId> = nets.into_iter().collect();
        self.merge_set(world, &ids)
    }

    fn merge_set<W>(&mut self, world: &mut W, ids: &IndexSet<NetId>) -> NetId
    where
        W: Grid + ?Sized,
        S: NetState<W>,
    {
        let tie_break = self.config.tie_break;
        let survivor = ids
            .iter()
            .copied()
            .max_by(|a, b| {
                self.size_of(*a)
                    .cmp(&self.size_of(*b))
                    .then_with(|| match tie_break {
                        TieBreak::OldestNet => b.cmp(a),
                        TieBreak::NewestNet => a.cmp(b),
                    })
            })
            .unwrap_or_else(|| panic!("merge_nets called with no nets"));

        for &id in ids {
            if id == survivor {
                continue;
            }
            let other = match self.nets.swap_remove(&id) {
                Some(net) => net,
                None => panic!("cannot merge net {id}: not live"),
            };
            let target = match self.nets.get_mut(&survivor) {
                Some(net) => net,
                None => panic!("merge survivor {survivor} is not live"),
            };
            target
                .state
                .on_net_merge_starting(&target.members, world, &other);
            for (space, key) in other.members.keys() {
                self.cache.entry(space).or_default().insert(key, survivor);
            }
            target.absorb(&other);
            target.state.on_net_merged(&target.members, world, &other);
            self.stats.merges += 1;
            debug!(
                net_type = %self.config.net_type,
                survivor = %survivor,
                absorbed = %id,
                absorbed_size = other.size(),
                size = target.size(),
                "merged nets"
            );
        }
        survivor
    }

    /// Discard the net cached at `cell`, if any, because `cell` stopped
    /// participating.
    ///
    /// `on_net_invalidated` runs first, while the net is still intact.
    /// Every member then leaves the cache and the net is dropped; the
    /// remaining cells are rediscovered by later queries. Returns whether
    /// a net was discarded.
    ///
    /// # Panics
    ///
    /// If a member's cache entry does not point back to the net.
    pub fn invalidate_net_at<W>(&mut self, world: &mut W, space: SpaceId, cell: CellPos) -> bool
    where
        W: ?Sized,
        S: NetState<W>,
    {
        let Some(id) = self.cached_net(space, cell) else {
            return false;
        };
        let mut net = match self.nets.swap_remove(&id) {
            Some(net) => net,
            None => panic!("cache at {cell} in space {space} names net {id}, which is not live"),
        };
        net.state
            .on_net_invalidated(&net.members, world, space, cell);

        for (member_space, key) in net.members.keys() {
            let removed = self
                .cache
                .get_mut(&member_space)
                .and_then(|cells| cells.remove(&key));
            if removed != Some(id) {
                panic!(
                    "member {} in space {member_space} of net {id} was cached to {removed:?}",
                    key.unpack()
                );
            }
        }
        let size = net.size();
        net.clear();
        self.stats.invalidations += 1;
        debug!(
            net_type = %self.config.net_type,
            net = %id,
            %space,
            %cell,
            size,
            "invalidated net"
        );
        true
    }
}

impl<S> std::fmt::Debug for NetManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetManager")
            .field("net_type", &self.config.net_type)
            .field("live_nets", &self.nets.len())
            .field("cached_cells", &self.cached_cells())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipenet_test_utils::{Conduit, MockGrid, TEST_NET};

    const OVERWORLD: SpaceId = SpaceId(0);
    const NETHER: SpaceId = SpaceId(1);

    fn p(x: i32, y: i32, z: i32) -> CellPos {
        CellPos::new(x, y, z)
    }

    fn manager() -> NetManager<()> {
        NetManager::new(TEST_NET)
    }

    #[test]
    fn empty_cell_yields_singleton_net() {
        let mut grid = MockGrid::new();
        let mut mgr = manager();
        let id = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        assert_eq!(mgr.net(id).map(Net::size), Some(1));
        assert_eq!(mgr.live_nets(), 1);
        assert_eq!(mgr.cached_cells(), 1);
    }

    #[test]
    fn get_net_is_idempotent() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 4);
        let mut mgr = manager();
        let a = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        let b = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        let c = mgr.get_net(&mut grid, OVERWORLD, p(3, 0, 0));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(mgr.stats().flood_fills, 1);
        assert_eq!(mgr.net(a).map(Net::size), Some(4));
    }

    #[test]
    fn cached_net_never_builds() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 2);
        let mut mgr = manager();
        assert_eq!(mgr.cached_net(OVERWORLD, p(0, 0, 0)), None);
        assert_eq!(mgr.live_nets(), 0);
        let id = mgr.get_net(&mut grid, OVERWORLD, p(1, 0, 0));
        assert_eq!(mgr.cached_net(OVERWORLD, p(0, 0, 0)), Some(id));
        assert_eq!(mgr.cached_net(OVERWORLD, p(0, CellPos::MAX_Y + 1, 0)), None);
    }

    #[test]
    fn spaces_never_share_nets() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 3);
        grid.line(NETHER, p(0, 0, 0), Direction::East, 3);
        let mut mgr = manager();
        let a = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        let b = mgr.get_net(&mut grid, NETHER, p(0, 0, 0));
        assert_ne!(a, b);
        assert_eq!(mgr.net(a).map(Net::size), Some(3));
        assert_eq!(mgr.net(b).map(Net::size), Some(3));
    }

    #[test]
    fn one_sided_connection_does_not_join() {
        let mut grid = MockGrid::new();
        grid.place(OVERWORLD, p(0, 0, 0), Conduit::sides([Direction::East]));
        grid.place(OVERWORLD, p(1, 0, 0), Conduit::sides([Direction::Up]));
        let mut mgr = manager();
        let a = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        let b = mgr.get_net(&mut grid, OVERWORLD, p(1, 0, 0));
        assert_ne!(a, b);
    }

    #[test]
    fn other_net_types_are_ignored() {
        let mut grid = MockGrid::new();
        grid.place(OVERWORLD, p(0, 0, 0), Conduit::all());
        grid.place(OVERWORLD, p(1, 0, 0), Conduit::all().of_type(NetType("test:other")));
        let mut mgr = manager();
        let a = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        assert_eq!(mgr.net(a).map(Net::size), Some(1));
        assert!(!mgr.is_connected_towards(&grid, OVERWORLD, p(1, 0, 0), Direction::West));
    }

    #[test]
    fn registry_provider_overrides_occupant() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 3);
        let mut registry = ConnectorRegistry::new();
        registry.register(
            "conduit",
            |_: &dyn pipenet_grid::Occupant, _: CellPos, _: Direction, _: NetType| false,
        );
        let mut mgr = manager().with_registry(registry);
        let id = mgr.get_net(&mut grid, OVERWORLD, p(1, 0, 0));
        assert_eq!(mgr.net(id).map(Net::size), Some(1));
    }

    #[test]
    fn fast_path_joins_single_neighbour_net() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 3);
        let mut mgr = manager();
        let id = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        mgr.reset_stats();

        grid.place(OVERWORLD, p(3, 0, 0), Conduit::all());
        let joined = mgr.add_to_net(&mut grid, OVERWORLD, p(3, 0, 0));
        assert_eq!(joined, id);
        assert_eq!(mgr.stats().flood_fills, 0);
        assert_eq!(mgr.stats().fast_path_adds, 1);
        assert_eq!(mgr.net(id).map(Net::size), Some(4));
    }

    #[test]
    fn add_to_net_without_neighbours_builds_singleton() {
        let mut grid = MockGrid::new();
        grid.place(OVERWORLD, p(5, 5, 5), Conduit::all());
        let mut mgr = manager();
        let id = mgr.add_to_net(&mut grid, OVERWORLD, p(5, 5, 5));
        assert_eq!(mgr.net(id).map(Net::size), Some(1));
        assert_eq!(mgr.stats().flood_fills, 1);
        assert_eq!(mgr.stats().fast_path_adds, 0);
    }

    #[test]
    fn add_to_net_after_lazy_build_reached_cell() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 3);
        let mut mgr = manager();
        // Nothing cached yet: the neighbour's build claims the new cell too.
        let id = mgr.add_to_net(&mut grid, OVERWORLD, p(2, 0, 0));
        assert_eq!(mgr.net(id).map(Net::size), Some(3));
        assert_eq!(mgr.stats().flood_fills, 1);
        assert_eq!(mgr.stats().fast_path_adds, 0);
    }

    #[test]
    fn bridging_cell_merges_nets() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 2);
        grid.line(OVERWORLD, p(3, 0, 0), Direction::East, 3);
        let mut mgr = manager();
        let left = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        let right = mgr.get_net(&mut grid, OVERWORLD, p(3, 0, 0));
        assert_ne!(left, right);

        grid.place(OVERWORLD, p(2, 0, 0), Conduit::all());
        let merged = mgr.add_to_net(&mut grid, OVERWORLD, p(2, 0, 0));
        assert_eq!(merged, right, "larger net survives");
        assert_eq!(mgr.net(merged).map(Net::size), Some(6));
        assert_eq!(mgr.live_nets(), 1);
        assert!(mgr.net(left).is_none());
        for x in 0..6 {
            assert_eq!(mgr.cached_net(OVERWORLD, p(x, 0, 0)), Some(merged));
        }
    }

    #[test]
    fn equal_size_merge_respects_tie_break() {
        for (tie_break, expect_oldest) in [(TieBreak::OldestNet, true), (TieBreak::NewestNet, false)] {
            let mut grid = MockGrid::new();
            grid.place(OVERWORLD, p(0, 0, 0), Conduit::all());
            grid.place(OVERWORLD, p(2, 0, 0), Conduit::all());
            let config = NetManagerConfig::new(TEST_NET).with_tie_break(tie_break);
            let mut mgr: NetManager<()> = NetManager::with_config(config).unwrap();
            let a = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
            let b = mgr.get_net(&mut grid, OVERWORLD, p(2, 0, 0));
            let survivor = mgr.merge_nets(&mut grid, [b, a]);
            assert_eq!(survivor, if expect_oldest { a } else { b });
            assert_eq!(mgr.net(survivor).map(Net::size), Some(2));
        }
    }

    #[test]
    fn merge_ignores_duplicates() {
        let mut grid = MockGrid::new();
        let mut mgr = manager();
        let a = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        assert_eq!(mgr.merge_nets(&mut grid, [a, a]), a);
        assert_eq!(mgr.stats().merges, 0);
    }

    #[test]
    #[should_panic(expected = "no nets")]
    fn empty_merge_panics() {
        let mut grid = MockGrid::new();
        let mut mgr = manager();
        mgr.merge_nets(&mut grid, []);
    }

    #[test]
    #[should_panic(expected = "not live")]
    fn merging_dead_net_panics() {
        let mut grid = MockGrid::new();
        let mut mgr = manager();
        let a = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        mgr.merge_nets(&mut grid, [a, NetId(999)]);
    }

    #[test]
    fn invalidation_clears_whole_net() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 5);
        let mut mgr = manager();
        let id = mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        assert!(mgr.invalidate_net_at(&mut grid, OVERWORLD, p(2, 0, 0)));
        assert!(mgr.net(id).is_none());
        assert_eq!(mgr.cached_cells(), 0);
        assert_eq!(mgr.live_nets(), 0);
        assert!(!mgr.invalidate_net_at(&mut grid, OVERWORLD, p(2, 0, 0)));
        assert_eq!(mgr.stats().invalidations, 1);
    }

    #[test]
    fn ids_are_monotonic() {
        let mut mgr = manager();
        let a = mgr.create_net();
        let b = mgr.create_net();
        assert!(a < b);
        assert_eq!(a, NetId(1));
    }

    #[test]
    fn config_is_validated() {
        let err = NetManager::<()>::with_config(NetManagerConfig::new(NetType(""))).unwrap_err();
        assert_eq!(err, ConfigError::EmptyNetType);
    }

    #[test]
    fn cached_hit_does_no_grid_lookups() {
        let mut grid = MockGrid::new();
        grid.line(OVERWORLD, p(0, 0, 0), Direction::East, 8);
        let mut mgr = manager();
        mgr.get_net(&mut grid, OVERWORLD, p(0, 0, 0));
        assert!(grid.lookups() > 0);
        grid.reset_lookups();
        mgr.get_net(&mut grid, OVERWORLD, p(7, 0, 0));
        assert_eq!(grid.lookups(), 0);
    }
}
