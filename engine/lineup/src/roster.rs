use crate::error::{LineupError, Result};
use crate::snapshot::RosterSnapshot;
use player_catalog::{Cost, PlayerId};
use std::collections::{BTreeMap, HashSet};

/// Number of players in a starting lineup
pub const STARTING_SIZE: usize = 11;

/// An owned squad: starting eleven, bench, captaincy and acquisition prices
///
/// Rosters are immutable once built. Coverage of `original_cost` is not
/// checked here; a missing price surfaces as
/// [`LineupError::UnknownOriginalCost`] when that player is valued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    starting: Vec<PlayerId>,
    bench: Vec<PlayerId>,
    captain: PlayerId,
    vice_captain: PlayerId,
    original_cost: BTreeMap<PlayerId, Cost>,
}

impl Roster {
    /// Build a roster from explicit fields
    pub fn from_spec(
        starting: Vec<PlayerId>,
        bench: Vec<PlayerId>,
        captain: PlayerId,
        vice_captain: PlayerId,
        original_cost: impl IntoIterator<Item = (PlayerId, Cost)>,
    ) -> Result<Self> {
        let roster = Self {
            starting,
            bench,
            captain,
            vice_captain,
            original_cost: original_cost.into_iter().collect(),
        };
        roster.validate()?;
        Ok(roster)
    }

    /// Rebuild a roster from its persisted form
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Result<Self> {
        Self::from_spec(
            snapshot.starting,
            snapshot.bench,
            snapshot.captain,
            snapshot.vice_captain,
            snapshot.prices,
        )
    }

    /// Persisted form of this roster
    pub fn to_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            starting: self.starting.clone(),
            bench: self.bench.clone(),
            captain: self.captain,
            vice_captain: self.vice_captain,
            prices: self.original_cost.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.starting.len() != STARTING_SIZE {
            return Err(LineupError::invalid_roster(format!(
                "starting lineup must have {} players, got {}",
                STARTING_SIZE,
                self.starting.len()
            )));
        }

        let mut seen = HashSet::new();
        for id in &self.starting {
            if !seen.insert(*id) {
                return Err(LineupError::invalid_roster(format!(
                    "player {id} appears twice in the starting lineup"
                )));
            }
        }

        let mut bench_seen = HashSet::new();
        for id in &self.bench {
            if seen.contains(id) {
                return Err(LineupError::invalid_roster(format!(
                    "player {id} is both starting and on the bench"
                )));
            }
            if !bench_seen.insert(*id) {
                return Err(LineupError::invalid_roster(format!(
                    "player {id} appears twice on the bench"
                )));
            }
        }

        if !self.contains(self.captain) {
            return Err(LineupError::invalid_roster(format!(
                "captain {} is not in the squad",
                self.captain
            )));
        }

        if !self.contains(self.vice_captain) {
            return Err(LineupError::invalid_roster(format!(
                "vice-captain {} is not in the squad",
                self.vice_captain
            )));
        }

        if let Some((id, cost)) = self.original_cost.iter().find(|(_, cost)| **cost < 0) {
            return Err(LineupError::invalid_roster(format!(
                "player {id} has negative original cost {cost}"
            )));
        }

        if self.captain == self.vice_captain {
            return Err(LineupError::invalid_roster(format!(
                "player {} cannot be both captain and vice-captain",
                self.captain
            )));
        }

        Ok(())
    }

    pub fn starting(&self) -> &[PlayerId] {
        &self.starting
    }

    pub fn bench(&self) -> &[PlayerId] {
        &self.bench
    }

    pub fn captain(&self) -> PlayerId {
        self.captain
    }

    pub fn vice_captain(&self) -> PlayerId {
        self.vice_captain
    }

    /// Acquisition price of every priced player
    pub fn original_costs(&self) -> &BTreeMap<PlayerId, Cost> {
        &self.original_cost
    }

    /// Price paid when `id` was added to the roster
    pub fn original_cost_of(&self, id: PlayerId) -> Result<Cost> {
        self.original_cost.get(&id).copied().ok_or(LineupError::UnknownOriginalCost(id))
    }

    /// Whether `id` is starting or on the bench
    pub fn contains(&self, id: PlayerId) -> bool {
        self.starting.contains(&id) || self.bench.contains(&id)
    }

    /// Every squad member, starting lineup first
    pub fn squad(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.starting.iter().chain(self.bench.iter()).copied()
    }
}
