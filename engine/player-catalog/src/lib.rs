//! Player Catalog - current player attributes keyed by player code
//!
//! This crate defines the lookup contract used for roster valuation and
//! the ways of filling it: the Fantasy Premier League elements feed, a
//! local cache file, or records supplied directly (fixtures).

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod types;

pub use catalog::{InMemoryCatalog, PlayerCatalog};
pub use config::{FeedConfig, RetryConfig, PLAYERS_URL};
pub use error::{CatalogError, Result};
pub use fetcher::FplFetcher;
pub use types::{Cost, PlayerId, PlayerRecord, Position};
