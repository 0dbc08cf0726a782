use crate::error::{CatalogError, Result};
use crate::types::{CatalogCache, PlayerId, PlayerRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Keyed lookup of current player attributes
///
/// Roster valuation depends only on this trait, so a live feed pull,
/// a cached file and a test fixture are interchangeable.
pub trait PlayerCatalog: Send + Sync {
    /// Look up a player by id
    fn lookup(&self, id: PlayerId) -> Result<&PlayerRecord>;

    /// Number of players known to the catalog
    fn player_count(&self) -> usize;
}

/// Catalog held entirely in memory, indexed by player id
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    players: HashMap<PlayerId, PlayerRecord>,
}

impl InMemoryCatalog {
    /// Index a list of records by id
    ///
    /// The feed key is expected to be unique; on a duplicate the first
    /// record wins.
    pub fn from_records(records: impl IntoIterator<Item = PlayerRecord>) -> Self {
        let mut players = HashMap::new();

        for record in records {
            if players.contains_key(&record.id) {
                warn!("Duplicate player id {} ({}), keeping first record", record.id, record.full_name());
                continue;
            }
            players.insert(record.id, record);
        }

        Self { players }
    }

    /// Load a catalog from a cache file written by [`save_to_file`](Self::save_to_file)
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        info!("Loading player catalog from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let cache: CatalogCache = serde_json::from_str(&json_content)?;

        info!("Loaded {} players (feed read at {})", cache.players.len(), cache.last_updated);
        Ok(Self::from_records(cache.players))
    }

    /// Write the catalog to a cache file, creating parent directories
    pub async fn save_to_file<P: AsRef<Path>>(&self, file_path: P) -> Result<()> {
        let file_path = file_path.as_ref();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let cache = CatalogCache::new(self.players().into_iter().cloned().collect());
        let json_content = serde_json::to_string_pretty(&cache)?;
        tokio::fs::write(file_path, json_content).await?;

        info!("Saved {} players to {:?}", cache.players.len(), file_path);
        Ok(())
    }

    /// All players sorted by id
    pub fn players(&self) -> Vec<&PlayerRecord> {
        let mut players: Vec<&PlayerRecord> = self.players.values().collect();
        players.sort_by_key(|p| p.id);
        players
    }

    /// Case-insensitive partial name match, sorted by id
    pub fn search(&self, query: &str) -> Vec<&PlayerRecord> {
        let query_lower = query.to_lowercase();
        let mut matches: Vec<&PlayerRecord> = self
            .players
            .values()
            .filter(|p| p.full_name().to_lowercase().contains(&query_lower))
            .collect();
        matches.sort_by_key(|p| p.id);
        matches
    }
}

impl PlayerCatalog for InMemoryCatalog {
    fn lookup(&self, id: PlayerId) -> Result<&PlayerRecord> {
        self.players.get(&id).ok_or(CatalogError::PlayerNotFound(id))
    }

    fn player_count(&self) -> usize {
        self.players.len()
    }
}
