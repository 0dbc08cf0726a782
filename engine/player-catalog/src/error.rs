//! Error types for the player catalog

use crate::types::PlayerId;
use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or querying the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Player not present in the catalog
    #[error("Player {0} not found in catalog")]
    PlayerNotFound(PlayerId),

    /// Cache file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Feed or cache payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport failure talking to the feed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed answered with a non-success status
    #[error("Feed request failed with status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// Invalid feed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether another attempt against the feed could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Http(_) => true,
            CatalogError::UnexpectedStatus(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
