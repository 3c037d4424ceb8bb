//! Default connection capabilities registered per occupant kind.
//!
//! Hosts rarely control every block type in their world. A
//! [`ConnectorRegistry`] lets them attach a connection capability to an
//! occupant kind from the outside, for example treating a foreign
//! emitter as a one-way source. Registered providers take precedence
//! over an occupant's own [`Connector`](crate::Connector), so built-in
//! behaviour can be overridden too.

use crate::occupant::Occupant;
use indexmap::IndexMap;
use pipenet_core::{CellPos, Direction, NetType};
use std::fmt;

/// A connection capability supplied from outside the occupant.
pub trait ConnectorProvider: Send + Sync {
    /// Whether `occupant` at `cell` links towards `direction` for
    /// `net_type`.
    fn is_connected_towards(
        &self,
        occupant: &dyn Occupant,
        cell: CellPos,
        direction: Direction,
        net_type: NetType,
    ) -> bool;
}

impl<F> ConnectorProvider for F
where
    F: Fn(&dyn Occupant, CellPos, Direction, NetType) -> bool + Send + Sync,
{
    fn is_connected_towards(
        &self,
        occupant: &dyn Occupant,
        cell: CellPos,
        direction: Direction,
        net_type: NetType,
    ) -> bool {
        self(occupant, cell, direction, net_type)
    }
}

/// Registry of [`ConnectorProvider`]s keyed by [`Occupant::kind`].
#[derive(Default)]
pub struct ConnectorRegistry {
    providers: IndexMap<String, Box<dyn ConnectorProvider>>,
}

impl ConnectorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` for occupants of `kind`, returning the
    /// provider it replaced.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        provider: impl ConnectorProvider + 'static,
    ) -> Option<Box<dyn ConnectorProvider>> {
        self.providers.insert(kind.into(), Box::new(provider))
    }

    /// Remove the provider for `kind`.
    pub fn unregister(&mut self, kind: &str) -> Option<Box<dyn ConnectorProvider>> {
        self.providers.shift_remove(kind)
    }

    /// The provider registered for `kind`.
    pub fn get(&self, kind: &str) -> Option<&dyn ConnectorProvider> {
        self.providers.get(kind).map(|p| p.as_ref())
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve the connection capability of `occupant`.
    ///
    /// Lookup order: a provider registered for the occupant's kind, then
    /// the occupant's own [`Connector`](crate::Connector), else not
    /// connected.
    pub fn is_connected_towards(
        &self,
        occupant: &dyn Occupant,
        cell: CellPos,
        direction: Direction,
        net_type: NetType,
    ) -> bool {
        if let Some(provider) = self.providers.get(occupant.kind()) {
            return provider.is_connected_towards(occupant, cell, direction, net_type);
        }
        occupant
            .connector()
            .is_some_and(|c| c.is_connected_towards(cell, direction, net_type))
    }
}

impl fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorRegistry")
            .field("kinds", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
