//! Nets, their member sets, and the [`NetState`] hooks.

use indexmap::{IndexMap, IndexSet};
use pipenet_core::{CellKey, CellPos, NetId, SpaceId};

/// The cells of a net, grouped by space.
///
/// Iteration follows insertion order, so traversals (and therefore
/// broadcasts) are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Members {
    spaces: IndexMap<SpaceId, IndexSet<CellKey>>,
}

impl Members {
    /// An empty member set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `cell` in `space` is a member.
    pub fn contains(&self, space: SpaceId, cell: CellPos) -> bool {
        cell.is_packable() && self.contains_key(space, cell.key())
    }

    /// Whether the packed `key` in `space` is a member.
    pub fn contains_key(&self, space: SpaceId, key: CellKey) -> bool {
        self.spaces.get(&space).is_some_and(|set| set.contains(&key))
    }

    /// Total member count across all spaces.
    pub fn len(&self) -> usize {
        self.spaces.values().map(IndexSet::len).sum()
    }

    /// Returns `true` if there are no members.
    pub fn is_empty(&self) -> bool {
        self.spaces.values().all(IndexSet::is_empty)
    }

    /// Number of members in one space.
    pub fn space_len(&self, space: SpaceId) -> usize {
        self.spaces.get(&space).map_or(0, IndexSet::len)
    }

    /// Spaces with at least one member.
    pub fn spaces(&self) -> impl Iterator<Item = SpaceId> + '_ {
        self.spaces
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(space, _)| *space)
    }

    /// Insert a member. Returns `true` if it was not present.
    pub fn insert(&mut self, space: SpaceId, key: CellKey) -> bool {
        self.spaces.entry(space).or_default().insert(key)
    }

    /// Per-space union with `other`.
    pub fn extend_from(&mut self, other: &Members) {
        for (space, keys) in &other.spaces {
            self.spaces
                .entry(*space)
                .or_default()
                .extend(keys.iter().copied());
        }
    }

    /// Remove every member.
    pub fn clear(&mut self) {
        self.spaces.clear();
    }

    /// Lazily traverse all members as `(space, position)` values.
    ///
    /// Each call starts a fresh traversal.
    pub fn iter(&self) -> impl Iterator<Item = (SpaceId, CellPos)> + '_ {
        self.keys().map(|(space, key)| (space, key.unpack()))
    }

    /// Lazily traverse all members as `(space, packed key)` values.
    pub fn keys(&self) -> impl Iterator<Item = (SpaceId, CellKey)> + '_ {
        self.spaces
            .iter()
            .flat_map(|(space, keys)| keys.iter().map(move |key| (*space, *key)))
    }
}

/// Domain state carried by a net, reacting to structural events.
///
/// Every hook defaults to a no-op. Hooks receive the net's member set as
/// it stands when the event fires, and the host world `W` mutably so
/// state can be pushed out to member cells.
///
/// New nets start from `Default::default()`; managers require
/// `S: Default` wherever they may create a net.
pub trait NetState<W: ?Sized>: Sized {
    /// A cell was added to the net. `members` already contains it.
    fn on_member_added(&mut self, members: &Members, world: &mut W, space: SpaceId, cell: CellPos) {
        let _ = (members, world, space, cell);
    }

    /// `other` is about to be merged into this net. `members` does not
    /// contain `other`'s cells yet.
    fn on_net_merge_starting(&mut self, members: &Members, world: &mut W, other: &Net<Self>) {
        let _ = (members, world, other);
    }

    /// `other` has been merged into this net. `members` now contains
    /// `other`'s cells; `other` still lists them too.
    fn on_net_merged(&mut self, members: &Members, world: &mut W, other: &Net<Self>) {
        let _ = (members, world, other);
    }

    /// The net is about to be discarded because `removed` stopped
    /// participating. Runs before any member leaves the cache.
    fn on_net_invalidated(&mut self, members: &Members, world: &mut W, space: SpaceId, removed: CellPos) {
        let _ = (members, world, space, removed);
    }
}

/// Stateless nets: pure connectivity tracking.
impl<W: ?Sized> NetState<W> for () {}

/// A set of connected cells plus their shared domain state.
#[derive(Clone, Debug)]
pub struct Net<S> {
    pub(crate) id: NetId,
    pub(crate) members: Members,
    pub(crate) state: S,
}

impl<S> Net<S> {
    /// An empty net.
    pub fn new(id: NetId, state: S) -> Self {
        Self {
            id,
            members: Members::new(),
            state,
        }
    }

    /// This net's identifier within its manager.
    pub fn id(&self) -> NetId {
        self.id
    }

    /// The member set.
    pub fn members(&self) -> &Members {
        &self.members
    }

    /// The domain state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Mutable domain state.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Split borrow of members and state, for state methods that walk
    /// the members.
    pub fn parts_mut(&mut self) -> (&Members, &mut S) {
        (&self.members, &mut self.state)
    }

    /// Whether `cell` in `space` is a member.
    pub fn contains(&self, space: SpaceId, cell: CellPos) -> bool {
        self.members.contains(space, cell)
    }

    /// Total member count across all spaces.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the net has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Lazily traverse all members.
    pub fn iter_members(&self) -> impl Iterator<Item = (SpaceId, CellPos)> + '_ {
        self.members.iter()
    }

    /// Call `visitor` for every member.
    pub fn for_each_member(&self, mut visitor: impl FnMut(SpaceId, CellPos)) {
        for (space, cell) in self.members.iter() {
            visitor(space, cell);
        }
    }

    /// Add a member, then run [`NetState::on_member_added`].
    ///
    /// Adding an existing member leaves the set unchanged but still
    /// fires the hook.
    pub fn add_member<W: ?Sized>(&mut self, world: &mut W, space: SpaceId, cell: CellPos)
    where
        S: NetState<W>,
    {
        self.members.insert(space, cell.key());
        self.state.on_member_added(&self.members, world, space, cell);
    }

    /// Copy every member of `other` into this net.
    ///
    /// `other` is left unchanged and no hooks run; merge ordering is the
    /// manager's job.
    pub fn absorb(&mut self, other: &Net<S>) {
        self.members.extend_from(&other.members);
    }

    /// Remove every member. The state is kept.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}
