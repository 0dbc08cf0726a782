use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable player code used as the catalog key
pub type PlayerId = u32;

/// Price in league currency units (tenths of a million)
pub type Cost = i32;

/// Playing position, encoded in the feed as `element_type` 1..=4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Short label used in reports (e.g. "GK", "MID")
    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = String;

    fn try_from(element_type: u8) -> Result<Self, Self::Error> {
        match element_type {
            1 => Ok(Position::Goalkeeper),
            2 => Ok(Position::Defender),
            3 => Ok(Position::Midfielder),
            4 => Ok(Position::Forward),
            other => Err(format!("unknown element_type {other}")),
        }
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        match position {
            Position::Goalkeeper => 1,
            Position::Defender => 2,
            Position::Midfielder => 3,
            Position::Forward => 4,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A player as published by the elements feed
///
/// Field names follow the feed so the same type decodes live payloads
/// and the local cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Cross-season player code
    #[serde(rename = "code")]
    pub id: PlayerId,

    pub first_name: String,

    pub second_name: String,

    #[serde(rename = "element_type")]
    pub position: Position,

    /// Current price
    pub now_cost: Cost,

    /// Recent form; the feed publishes this as a string
    #[serde(deserialize_with = "decimal_from_str_or_number")]
    pub form: f64,

    #[serde(deserialize_with = "decimal_from_str_or_number")]
    pub points_per_game: f64,
}

impl PlayerRecord {
    /// "<first> <second>"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name)
    }
}

/// On-disk cache of a feed pull
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCache {
    /// When the feed was read
    pub last_updated: DateTime<Utc>,

    pub players: Vec<PlayerRecord>,
}

impl CatalogCache {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self { last_updated: Utc::now(), players }
    }
}

fn decimal_from_str_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Decimal::deserialize(deserializer)? {
        Decimal::Number(value) => Ok(value),
        Decimal::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid decimal '{text}'"))),
    }
}
