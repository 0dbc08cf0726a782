//! Lineup snapshots on disk
//!
//! Every persist writes the roster twice: a history copy named after the
//! local write time and the well-known latest copy. Both writes are
//! attempted even if the first fails.

use crate::config::LineupConfig;
use crate::error::{LineupError, Result, SnapshotKind, SnapshotWriteFailure};
use crate::roster::Roster;
use chrono::{DateTime, Local};
use player_catalog::{Cost, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Persisted roster, one JSON object per file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    /// Starting eleven in lineup order
    pub starting: Vec<PlayerId>,

    pub bench: Vec<PlayerId>,

    pub captain: PlayerId,

    pub vice_captain: PlayerId,

    /// Acquisition price per player; JSON keys are the ids as strings
    pub prices: BTreeMap<PlayerId, Cost>,
}

/// Paths written by a successful persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSnapshot {
    pub timestamped: PathBuf,
    pub latest: PathBuf,
}

/// Reads and writes roster snapshots under a configured directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    config: LineupConfig,
}

impl SnapshotStore {
    /// Create a new snapshot store
    pub fn new(config: LineupConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LineupConfig {
        &self.config
    }

    /// Path of the latest snapshot
    pub fn latest_path(&self) -> PathBuf {
        self.config.latest_path()
    }

    /// Load the latest snapshot
    pub fn load_latest(&self) -> Result<Roster> {
        self.load(self.latest_path())
    }

    /// Load a snapshot from `path`
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Roster> {
        let path = path.as_ref();
        info!("Loading lineup from: {:?}", path);

        let json_content = std::fs::read_to_string(path)
            .map_err(|source| LineupError::SnapshotRead { path: path.to_path_buf(), source })?;

        let malformed = |reason: String| LineupError::MalformedSnapshot { path: path.to_path_buf(), reason };

        let snapshot: RosterSnapshot =
            serde_json::from_str(&json_content).map_err(|e| malformed(e.to_string()))?;

        Roster::from_snapshot(snapshot).map_err(|e| match e {
            LineupError::InvalidRoster(reason) => malformed(reason),
            other => other,
        })
    }

    /// Persist `roster`, stamping the history copy with the current local time
    pub fn persist(&self, roster: &Roster) -> Result<PersistedSnapshot> {
        self.persist_at(roster, Local::now())
    }

    /// Persist `roster`, stamping the history copy with `at`
    pub fn persist_at(&self, roster: &Roster, at: DateTime<Local>) -> Result<PersistedSnapshot> {
        let json_content = serde_json::to_vec(&roster.to_snapshot())?;

        if let Err(e) = std::fs::create_dir_all(&self.config.lineups_dir) {
            // the file writes below will fail and be reported individually
            warn!("Could not create lineups directory {:?}: {}", self.config.lineups_dir, e);
        }

        let targets = [
            (SnapshotKind::Timestamped, self.config.timestamped_path(&at)),
            (SnapshotKind::Latest, self.config.latest_path()),
        ];

        let mut failures = Vec::new();
        for (kind, path) in &targets {
            if let Err(error) = write_file(path, &json_content) {
                warn!("Failed to write {} lineup snapshot {:?}: {}", kind, path, error);
                failures.push(SnapshotWriteFailure { kind: *kind, path: path.clone(), error });
            }
        }

        if !failures.is_empty() {
            return Err(LineupError::SnapshotWrite { failures });
        }

        let [(_, timestamped), (_, latest)] = targets;
        info!("Saved lineup to {:?} and {:?}", timestamped, latest);
        Ok(PersistedSnapshot { timestamped, latest })
    }
}

fn write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_roster() -> Roster {
        let prices: Vec<(PlayerId, Cost)> = (1..=15).map(|id| (id * 100, 45 + id as Cost)).collect();
        Roster::from_spec((1..=11).map(|id| id * 100).collect(), vec![1200, 1300, 1400, 1500], 700, 900, prices)
            .unwrap()
    }

    fn create_store(temp_dir: &TempDir) -> SnapshotStore {
        SnapshotStore::new(LineupConfig::new(temp_dir.path().join("lineups"))).unwrap()
    }

    #[test]
    fn test_snapshot_json_schema() {
        let snapshot = create_test_roster().to_snapshot();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["starting"].as_array().unwrap().len(), 11);
        assert_eq!(value["captain"], 700);
        assert_eq!(value["vice_captain"], 900);
        assert_eq!(value["prices"]["1200"], 57);
    }

    #[test]
    fn test_persist_then_load_latest() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir);
        let roster = create_test_roster();

        let at = Local.with_ymd_and_hms(2024, 8, 16, 19, 30, 0).unwrap();
        let written = store.persist_at(&roster, at).unwrap();

        assert_eq!(written.latest, store.latest_path());
        assert!(written.timestamped.ends_with("16-08-24-19-30-00.json"));
        assert!(written.timestamped.exists());

        assert_eq!(store.load_latest().unwrap(), roster);
        assert_eq!(store.load(&written.timestamped).unwrap(), roster);
    }

    #[test]
    fn test_latest_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir);

        let first = create_test_roster();
        let second = Roster::from_spec(
            first.starting().to_vec(),
            first.bench().to_vec(),
            900,
            700,
            first.original_costs().clone(),
        )
        .unwrap();

        store.persist_at(&first, Local.with_ymd_and_hms(2024, 8, 16, 19, 30, 0).unwrap()).unwrap();
        store.persist_at(&second, Local.with_ymd_and_hms(2024, 8, 17, 19, 30, 0).unwrap()).unwrap();

        assert_eq!(store.load_latest().unwrap().captain(), 900);
        let history = std::fs::read_dir(&store.config().lineups_dir).unwrap().count();
        assert_eq!(history, 3);
    }

    #[test]
    fn test_load_reads_string_price_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latest.json");
        std::fs::write(
            &path,
            r#"{"starting": [1,2,3,4,5,6,7,8,9,10,11], "bench": [12],
                "captain": 7, "vice_captain": 9, "prices": {"7": 45, "12": 40}}"#,
        )
        .unwrap();

        let roster = create_store(&temp_dir).load(&path).unwrap();
        assert_eq!(roster.original_cost_of(7).unwrap(), 45);
        assert_eq!(roster.original_cost_of(12).unwrap(), 40);
    }

    #[test]
    fn test_load_missing_key_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, r#"{"starting": [1,2,3,4,5,6,7,8,9,10,11], "bench": [], "captain": 1}"#)
            .unwrap();

        let result = create_store(&temp_dir).load(&path);
        assert!(matches!(result, Err(LineupError::MalformedSnapshot { .. })));
    }

    #[test]
    fn test_load_wrong_shape_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("short.json");
        std::fs::write(
            &path,
            r#"{"starting": [1,2,3], "bench": [], "captain": 1, "vice_captain": 2, "prices": {}}"#,
        )
        .unwrap();

        let result = create_store(&temp_dir).load(&path);
        assert!(matches!(result, Err(LineupError::MalformedSnapshot { .. })));
    }

    #[test]
    fn test_load_negative_price_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("negative.json");
        std::fs::write(
            &path,
            r#"{"starting": [1,2,3,4,5,6,7,8,9,10,11], "bench": [],
                "captain": 1, "vice_captain": 2, "prices": {"1": 45, "2": -10}}"#,
        )
        .unwrap();

        let result = create_store(&temp_dir).load(&path);
        assert!(matches!(result, Err(LineupError::MalformedSnapshot { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = create_store(&temp_dir).load_latest();
        assert!(matches!(result, Err(LineupError::SnapshotRead { .. })));
    }

    #[test]
    fn test_persist_reports_both_failures() {
        let temp_dir = TempDir::new().unwrap();
        // a regular file where the directory should be
        let blocker = temp_dir.path().join("lineups");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = SnapshotStore::new(LineupConfig::new(&blocker)).unwrap();
        let err = store.persist(&create_test_roster()).unwrap_err();

        match err {
            LineupError::SnapshotWrite { failures } => {
                let kinds: Vec<SnapshotKind> = failures.iter().map(|f| f.kind).collect();
                assert_eq!(kinds, vec![SnapshotKind::Timestamped, SnapshotKind::Latest]);
            }
            other => panic!("expected SnapshotWrite, got {other:?}"),
        }
    }
}
