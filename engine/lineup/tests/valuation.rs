//! End-to-end: build, persist, reload and value a roster against
//! catalogs from two different gameweeks.

use lineup::{LineupConfig, LineupError, Roster, RosterValuator, SnapshotStore};
use player_catalog::{Cost, InMemoryCatalog, PlayerCatalog, PlayerId, PlayerRecord, Position};
use std::sync::Arc;
use tempfile::TempDir;

const STARTING: [PlayerId; 11] = [20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30];
const BENCH: [PlayerId; 4] = [31, 32, 33, 34];

fn position_for(id: PlayerId) -> Position {
    match id {
        20 | 31 => Position::Goalkeeper,
        21..=25 => Position::Defender,
        26..=28 | 32 => Position::Midfielder,
        _ => Position::Forward,
    }
}

fn gameweek_catalog(price_of: impl Fn(PlayerId) -> Cost) -> Arc<dyn PlayerCatalog> {
    Arc::new(InMemoryCatalog::from_records(STARTING.iter().chain(BENCH.iter()).map(|&id| {
        PlayerRecord {
            id,
            first_name: "Player".to_string(),
            second_name: format!("{id}"),
            position: position_for(id),
            now_cost: price_of(id),
            form: 2.5,
            points_per_game: 3.5,
        }
    })))
}

fn create_roster() -> Roster {
    let prices = STARTING.iter().chain(BENCH.iter()).map(|&id| (id, 45));
    Roster::from_spec(STARTING.to_vec(), BENCH.to_vec(), 26, 30, prices).unwrap()
}

#[test]
fn test_persisted_roster_values_against_swapped_catalogs() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(LineupConfig::new(temp_dir.path())).unwrap();

    let roster = create_roster();
    RosterValuator::new(roster.clone()).persist(&store).unwrap();

    let mut valuator = RosterValuator::from_latest(&store).unwrap();
    assert_eq!(valuator.roster(), &roster);

    // gameweek 1: everyone has risen to 50
    valuator.bind_catalog(gameweek_catalog(|_| 50));
    assert_eq!(valuator.selling_price(26).unwrap(), 47);
    assert_eq!(valuator.squad_value().unwrap(), 15 * 47);

    // gameweek 2: forwards fell to 40, the rest are unchanged at 45
    valuator.bind_catalog(gameweek_catalog(|id| if position_for(id) == Position::Forward { 40 } else { 45 }));
    assert_eq!(valuator.selling_price(30).unwrap(), 40);
    assert_eq!(valuator.selling_price(26).unwrap(), 44);

    let report = valuator.render().unwrap();
    assert!(report.contains("Player 26 (C)"));
    assert!(report.contains("Player 30 (VC)"));
}

#[test]
fn test_membership() {
    let valuator = RosterValuator::new(create_roster());

    for id in STARTING.iter().chain(BENCH.iter()) {
        assert!(valuator.contains_player(*id));
    }
    assert!(!valuator.contains_player(19));
    assert!(!valuator.contains_player(35));
}

#[test]
fn test_persist_round_trip_from_timestamped_copy() {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(LineupConfig::new(temp_dir.path().join("history"))).unwrap();

    let written = store.persist(&create_roster()).unwrap();
    let reloaded = RosterValuator::from_snapshot(&store, &written.timestamped).unwrap();

    assert_eq!(reloaded.roster(), &create_roster());
}

#[test]
fn test_player_missing_from_catalog() {
    let valuator = RosterValuator::new(create_roster()).with_catalog(gameweek_catalog(|_| 50));
    assert!(matches!(valuator.selling_price(99), Err(LineupError::UnknownPlayer(99))));

    let partial: Arc<dyn PlayerCatalog> = Arc::new(InMemoryCatalog::from_records(Vec::new()));
    let valuator = RosterValuator::new(create_roster()).with_catalog(partial);
    assert!(matches!(valuator.render(), Err(LineupError::UnknownPlayer(20))));
}
