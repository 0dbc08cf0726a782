//! # Lineup
//!
//! Tracks a fantasy roster against a player catalog.
//!
//! - **Roster**: starting eleven, bench, captaincy and acquisition prices
//! - **RosterValuator**: resale value per player under the sell-on fee rule
//! - **SnapshotStore**: history and latest JSON snapshots on disk
//!
//! ## Usage
//!
//! ```rust
//! use lineup::{Roster, RosterValuator};
//! use player_catalog::{InMemoryCatalog, PlayerRecord, Position};
//! use std::sync::Arc;
//!
//! let catalog = InMemoryCatalog::from_records((1..=11).map(|id| PlayerRecord {
//!     id,
//!     first_name: "Player".to_string(),
//!     second_name: format!("{id}"),
//!     position: Position::Defender,
//!     now_cost: 50,
//!     form: 0.0,
//!     points_per_game: 0.0,
//! }));
//!
//! let roster = Roster::from_spec((1..=11).collect(), vec![], 1, 2, (1..=11).map(|id| (id, 45)))?;
//! let valuator = RosterValuator::new(roster).with_catalog(Arc::new(catalog));
//!
//! assert_eq!(valuator.selling_price(1)?, 47);
//! # Ok::<(), lineup::LineupError>(())
//! ```

pub mod config;
pub mod error;
pub mod pricing;
pub mod report;
pub mod roster;
pub mod snapshot;
pub mod valuator;

pub use config::LineupConfig;
pub use error::{LineupError, Result, SnapshotKind, SnapshotWriteFailure};
pub use pricing::{sell_on_fee, selling_price};
pub use roster::{Roster, STARTING_SIZE};
pub use snapshot::{PersistedSnapshot, RosterSnapshot, SnapshotStore};
pub use valuator::{PlayerValuation, RosterValuator};
