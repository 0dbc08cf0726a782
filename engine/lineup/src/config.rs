//! Configuration for lineup snapshot storage

use crate::error::{LineupError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;

/// Where lineup snapshots live and how they are named
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupConfig {
    /// Directory holding every snapshot
    pub lineups_dir: PathBuf,

    /// File name of the snapshot overwritten on every persist
    pub latest_file: String,

    /// strftime pattern for history snapshot names
    pub timestamp_format: String,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            lineups_dir: PathBuf::from("lineups"),
            latest_file: "latest.json".to_string(),
            timestamp_format: "%d-%m-%y-%H-%M-%S".to_string(),
        }
    }
}

impl LineupConfig {
    /// Create a new configuration with a custom lineups directory
    pub fn new(lineups_dir: impl Into<PathBuf>) -> Self {
        Self { lineups_dir: lineups_dir.into(), ..Default::default() }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("LINEUP_DIR") {
            config.lineups_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Path of the latest snapshot
    pub fn latest_path(&self) -> PathBuf {
        self.lineups_dir.join(&self.latest_file)
    }

    /// Path of the history snapshot written at `at`
    pub fn timestamped_path<Tz>(&self, at: &DateTime<Tz>) -> PathBuf
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.lineups_dir.join(format!("{}.json", at.format(&self.timestamp_format)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.latest_file.is_empty() || self.latest_file.contains(['/', '\\']) {
            return Err(LineupError::config(format!(
                "latest_file must be a plain file name, got '{}'",
                self.latest_file
            )));
        }

        if self.timestamp_format.is_empty()
            || StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error))
        {
            return Err(LineupError::config(format!(
                "invalid timestamp_format '{}'",
                self.timestamp_format
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_default_paths() {
        let config = LineupConfig::default();
        assert_eq!(config.latest_path(), PathBuf::from("lineups/latest.json"));

        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(config.timestamped_path(&at), PathBuf::from("lineups/09-03-24-14-05-07.json"));
    }

    #[test]
    fn test_custom_dir() {
        let config = LineupConfig::new("/tmp/squads");
        assert_eq!(config.latest_path(), PathBuf::from("/tmp/squads/latest.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = LineupConfig { latest_file: "sub/latest.json".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(LineupError::Config(_))));

        let config = LineupConfig { timestamp_format: "%Q".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(LineupError::Config(_))));
    }
}
