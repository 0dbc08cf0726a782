use crate::error::{LineupError, Result};
use crate::pricing;
use crate::report;
use crate::roster::Roster;
use crate::snapshot::{PersistedSnapshot, SnapshotStore};
use player_catalog::{Cost, PlayerCatalog, PlayerId, PlayerRecord};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Resale value of one squad member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerValuation {
    pub id: PlayerId,
    pub name: String,
    pub original_cost: Cost,
    pub current_cost: Cost,
    pub selling_price: Cost,
}

/// Values and renders a roster against a player catalog
///
/// The catalog is bound separately from construction so the same roster
/// can be evaluated against catalogs from different points in time.
pub struct RosterValuator {
    roster: Roster,
    catalog: Option<Arc<dyn PlayerCatalog>>,
}

impl RosterValuator {
    /// Create a valuator with no catalog bound
    pub fn new(roster: Roster) -> Self {
        Self { roster, catalog: None }
    }

    /// Load the roster from a snapshot file
    pub fn from_snapshot<P: AsRef<Path>>(store: &SnapshotStore, path: P) -> Result<Self> {
        Ok(Self::new(store.load(path)?))
    }

    /// Load the roster from the store's latest snapshot
    pub fn from_latest(store: &SnapshotStore) -> Result<Self> {
        Ok(Self::new(store.load_latest()?))
    }

    /// Attach (or replace) the catalog used for prices and display data
    pub fn bind_catalog(&mut self, catalog: Arc<dyn PlayerCatalog>) -> &mut Self {
        debug!("Binding catalog with {} players", catalog.player_count());
        self.catalog = Some(catalog);
        self
    }

    /// Builder form of [`bind_catalog`](Self::bind_catalog)
    pub fn with_catalog(mut self, catalog: Arc<dyn PlayerCatalog>) -> Self {
        self.bind_catalog(catalog);
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    fn catalog(&self) -> Result<&dyn PlayerCatalog> {
        self.catalog.as_deref().ok_or(LineupError::CatalogNotBound)
    }

    pub fn lookup_player(&self, id: PlayerId) -> Result<&PlayerRecord> {
        Ok(self.catalog()?.lookup(id)?)
    }

    /// "<first> <second>"
    pub fn display_name(&self, id: PlayerId) -> Result<String> {
        Ok(self.lookup_player(id)?.full_name())
    }

    pub fn current_cost(&self, id: PlayerId) -> Result<Cost> {
        Ok(self.lookup_player(id)?.now_cost)
    }

    pub fn original_cost_of(&self, id: PlayerId) -> Result<Cost> {
        self.roster.original_cost_of(id)
    }

    /// Amount recovered if `id` were sold now
    pub fn selling_price(&self, id: PlayerId) -> Result<Cost> {
        let current = self.current_cost(id)?;
        let original = self.original_cost_of(id)?;
        Ok(pricing::selling_price(current, original))
    }

    pub fn contains_player(&self, id: PlayerId) -> bool {
        self.roster.contains(id)
    }

    /// Valuation of every squad member, starting lineup first
    pub fn valuations(&self) -> Result<Vec<PlayerValuation>> {
        self.roster
            .squad()
            .map(|id| -> Result<PlayerValuation> {
                let player = self.lookup_player(id)?;
                let original_cost = self.original_cost_of(id)?;
                Ok(PlayerValuation {
                    id,
                    name: player.full_name(),
                    original_cost,
                    current_cost: player.now_cost,
                    selling_price: pricing::selling_price(player.now_cost, original_cost),
                })
            })
            .collect()
    }

    /// Sum of selling prices across the squad
    pub fn squad_value(&self) -> Result<i64> {
        self.roster.squad().map(|id| self.selling_price(id).map(i64::from)).sum()
    }

    /// Starting 11 and bench tables
    pub fn render(&self) -> Result<String> {
        report::render_lineup(self)
    }

    /// Selling-price table with a squad total
    pub fn render_valuations(&self) -> Result<String> {
        report::render_valuations(&self.valuations()?)
    }

    /// Write the roster to the store's history and latest snapshots
    pub fn persist(&self, store: &SnapshotStore) -> Result<PersistedSnapshot> {
        store.persist(&self.roster)
    }
}
