use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Elements endpoint of the Fantasy Premier League API
pub const PLAYERS_URL: &str = "https://fantasy.premierleague.com/drf/elements/";

/// Configuration for the elements feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed endpoint
    pub url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Retry configuration
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    pub max_delay_ms: u64,

    /// Backoff multiplier
    pub backoff_multiplier: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { url: PLAYERS_URL.to_string(), timeout_secs: 30, retry: RetryConfig::default() }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3, initial_delay_ms: 500, max_delay_ms: 5_000, backoff_multiplier: 2.0 }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let delay_ms = (self.initial_delay_ms as f64 * factor).min(self.max_delay_ms as f64);
        Duration::from_millis(delay_ms as u64)
    }
}

impl FeedConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("FPL_PLAYERS_URL") {
            config.url = url;
        }

        if let Ok(timeout) = std::env::var("FPL_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .map_err(|_| CatalogError::config(format!("invalid FPL_TIMEOUT_SECS '{timeout}'")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(CatalogError::config("feed url must not be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(CatalogError::config("timeout_secs must be greater than 0"));
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err(CatalogError::config("backoff_multiplier must be at least 1.0"));
        }

        Ok(())
    }
}
