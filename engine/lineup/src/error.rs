//! Error types for roster valuation and persistence

use player_catalog::PlayerId;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lineup operations
pub type Result<T> = std::result::Result<T, LineupError>;

/// Errors that can occur while loading, valuing or persisting a roster
#[derive(Error, Debug)]
pub enum LineupError {
    /// Snapshot is missing required keys or has the wrong shape
    #[error("Malformed lineup snapshot {path:?}: {reason}")]
    MalformedSnapshot { path: PathBuf, reason: String },

    /// Snapshot file could not be read
    #[error("Failed to read lineup snapshot {path:?}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or both snapshot files could not be written
    #[error("Failed to write lineup snapshot: {}", describe_failures(.failures))]
    SnapshotWrite { failures: Vec<SnapshotWriteFailure> },

    /// Price or display data requested before a catalog was bound
    #[error("No player catalog bound")]
    CatalogNotBound,

    /// Player not present in the bound catalog
    #[error("Player {0} not found in catalog")]
    UnknownPlayer(PlayerId),

    /// Roster references a player with no recorded acquisition price
    #[error("No original cost recorded for player {0}")]
    UnknownOriginalCost(PlayerId),

    /// Roster violates a structural rule
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    /// Catalog failure other than a missing player
    #[error("Catalog error: {0}")]
    Catalog(#[source] player_catalog::CatalogError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LineupError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid roster error
    pub fn invalid_roster(msg: impl Into<String>) -> Self {
        Self::InvalidRoster(msg.into())
    }
}

impl From<player_catalog::CatalogError> for LineupError {
    fn from(err: player_catalog::CatalogError) -> Self {
        match err {
            player_catalog::CatalogError::PlayerNotFound(id) => Self::UnknownPlayer(id),
            other => Self::Catalog(other),
        }
    }
}

/// Which of the two snapshot files a write targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// History copy named after the write time
    Timestamped,
    /// Well-known latest copy, overwritten on every persist
    Latest,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotKind::Timestamped => f.write_str("timestamped"),
            SnapshotKind::Latest => f.write_str("latest"),
        }
    }
}

/// A single failed snapshot write
#[derive(Debug)]
pub struct SnapshotWriteFailure {
    pub kind: SnapshotKind,
    pub path: PathBuf,
    pub error: std::io::Error,
}

fn describe_failures(failures: &[SnapshotWriteFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} snapshot {:?} ({})", f.kind, f.path, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}
