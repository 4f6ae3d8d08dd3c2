//! Multi-turn integration tests on the bundled levels.
//!
//! These tests load the fixture levels from `levels/`, advance them for
//! many turns and check the economy and the state invariants along the way.
//!
//! Run with: cargo test level_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use konkr::game::check_invariants;
use konkr::{
    BankruptcyOwnership, Coord, GameConfig, Level, LevelTable, discover_levels, load_level,
    render_ascii,
};

fn level_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("levels")
        .join(relative)
}

fn load(relative: &str, config: GameConfig) -> Level {
    let path = level_path(relative);
    load_level(&path, config, LevelTable::default())
        .unwrap_or_else(|e| panic!("Failed to load {}: {e}", path.display()))
}

fn money_at(level: &Level, coord: Coord) -> i32 {
    level
        .map()
        .get(coord)
        .and_then(|t| t.entity())
        .and_then(|e| e.money())
        .unwrap()
}

#[test]
fn test_all_fixtures_load_cleanly() {
    let levels = discover_levels(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels")).unwrap();
    assert_eq!(levels.len(), 4);

    for info in &levels {
        let level = info
            .load(GameConfig::default(), LevelTable::default())
            .unwrap();
        let violations = check_invariants(&level);
        assert!(violations.is_empty(), "{}: {violations:?}", info.name);
        assert!(!level.players().is_empty(), "{} has no players", info.name);
    }
}

#[test]
fn test_fixture_catalog_order() {
    let levels = discover_levels(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("levels")).unwrap();
    let names: Vec<_> = levels
        .iter()
        .map(|l| (l.category.as_str(), l.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Classic", "Three realms"),
            ("Classic", "Two kingdoms"),
            ("Tutorial", "First steps"),
            ("Tutorial", "Hard times"),
        ]
    );
}

#[test]
fn test_fixtures_render_back_to_source() {
    for relative in [
        "tutorial/first_steps.level",
        "tutorial/hard_times.level",
        "classic/two_kingdoms.level",
        "classic/three_realms.level",
    ] {
        let source = std::fs::read_to_string(level_path(relative)).unwrap();
        let level = load(relative, GameConfig::default());
        assert_eq!(render_ascii(&level), source, "{relative}");
    }
}

#[test]
fn test_single_realm_is_already_won() {
    let level = load("tutorial/first_steps.level", GameConfig::default());
    assert!(level.check_end());
    assert_eq!(level.winner(), Some(1));
}

#[test]
fn test_single_realm_keeps_settling() {
    let mut level = load("tutorial/first_steps.level", GameConfig::default());
    let hall = Coord::new(1, 1);

    for turn in 1..=5 {
        let report = level.next_turn().unwrap();
        assert_eq!(report.next_player, 1);
        let settlement = report.settlement.unwrap();
        assert_eq!(settlement.townhalls[0].territory, 6);
        assert_eq!(settlement.townhalls[0].upkeep, 2);
        assert_eq!(money_at(&level, hall), 10 - 2 * turn);
    }
}

#[test]
fn test_two_kingdoms_alternate_until_broke() {
    let mut level = load("classic/two_kingdoms.level", GameConfig::default());
    let ids: Vec<_> = level.players().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(!level.check_end());

    let first = level.next_turn().unwrap();
    assert_eq!(first.next_player, 2);
    let settled = first.settlement.unwrap();
    assert_eq!(settled.player, 1);
    assert_eq!(settled.townhalls[0].territory, 8);
    assert_eq!(settled.townhalls[0].upkeep, 4);
    assert_eq!(money_at(&level, Coord::new(1, 1)), 6);

    let second = level.next_turn().unwrap();
    assert_eq!(second.next_player, 1);
    let settled = second.settlement.unwrap();
    assert_eq!(settled.townhalls[0].territory, 7);
    assert_eq!(settled.townhalls[0].upkeep, 2);
    assert_eq!(money_at(&level, Coord::new(2, 6)), 8);

    let mut conversions = Vec::new();
    for _ in 0..40 {
        let report = level.next_turn().unwrap();
        assert!(report.eliminated.is_empty());
        let settlement = report.settlement.unwrap();
        if settlement.bandit_count() > 0 {
            conversions.push((report.turn, settlement.player, settlement.bandit_count()));
        }
        let violations = check_invariants(&level);
        assert!(violations.is_empty(), "turn {}: {violations:?}", report.turn);
    }
    assert_eq!(level.turn(), 42);

    // Player 1 pays 4 a turn and breaks on its third settlement, player 2
    // pays 2 and breaks on its sixth. Bandits cost nothing afterwards.
    assert_eq!(conversions, vec![(5, 1, 2), (12, 2, 1)]);
    assert_eq!(money_at(&level, Coord::new(1, 1)), -2);
    assert_eq!(money_at(&level, Coord::new(2, 6)), -2);
    for coord in [Coord::new(2, 2), Coord::new(2, 3), Coord::new(3, 5)] {
        let tile = level.map().get(coord).unwrap();
        assert!(tile.entity().unwrap().is_bandit(), "{coord}");
    }
}

#[test]
fn test_hard_times_goes_bankrupt() {
    let mut level = load("tutorial/hard_times.level", GameConfig::default());
    let hall = Coord::new(1, 1);
    let units = [
        Coord::new(1, 2),
        Coord::new(1, 3),
        Coord::new(2, 1),
        Coord::new(2, 2),
    ];

    // Four units at 2 each against a treasury of 10.
    let first = level.next_turn().unwrap().settlement.unwrap();
    assert_eq!(first.townhalls[0].upkeep, 8);
    assert_eq!(first.townhalls[0].money_after, 2);
    assert_eq!(first.bandit_count(), 0);

    let other = level.next_turn().unwrap().settlement.unwrap();
    assert_eq!(other.player, 2);
    assert_eq!(other.townhalls[0].money_after, 10);

    let broke = level.next_turn().unwrap().settlement.unwrap();
    assert_eq!(broke.player, 1);
    assert_eq!(broke.townhalls[0].money_after, -6);
    assert!(broke.townhalls[0].is_bankrupt());
    assert_eq!(broke.bandit_count(), 4);

    for coord in units {
        let tile = level.map().get(coord).unwrap();
        assert!(tile.entity().unwrap().is_bandit(), "{coord}");
        assert_eq!(tile.owner(), Some(1));
    }
    assert_eq!(money_at(&level, hall), -6);

    // No units left to pay for and no income: the treasury stays put.
    level.next_turn().unwrap();
    let report = level.next_turn().unwrap();
    let settlement = report.settlement.unwrap();
    assert_eq!(settlement.townhalls[0].upkeep, 0);
    assert_eq!(settlement.townhalls[0].money_after, -6);
    assert_eq!(settlement.bandit_count(), 0);
    assert!(check_invariants(&level).is_empty());
}

#[test]
fn test_hard_times_with_cleared_ownership() {
    let config = GameConfig {
        bankruptcy_owner: BankruptcyOwnership::Clear,
        ..GameConfig::default()
    };
    let mut level = load("tutorial/hard_times.level", config);

    for _ in 0..7 {
        level.next_turn().unwrap();
    }

    let neutral = level
        .map()
        .iter()
        .filter(|(_, t)| t.entity().is_some_and(|e| e.is_bandit()))
        .all(|(_, t)| t.owner().is_none());
    assert!(neutral);
    assert_eq!(level.map().count_territory(1), 1);

    // The townhall alone keeps player 1 in the game.
    let report = level.next_turn().unwrap();
    assert!(report.eliminated.is_empty());
    assert_eq!(level.players().len(), 2);
    assert!(check_invariants(&level).is_empty());
}

#[test]
fn test_three_realms_turn_order_follows_townhalls() {
    let mut level = load("classic/three_realms.level", GameConfig::default());
    let ids: Vec<_> = level.players().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3, 2]);

    let order: Vec<_> = (0..6)
        .map(|_| level.next_turn().unwrap().next_player)
        .collect();
    assert_eq!(order, vec![3, 2, 1, 3, 2, 1]);
}

#[test]
fn test_eliminating_a_realm_by_hand() {
    let mut level = load("classic/three_realms.level", GameConfig::default());

    // Player 3 loses every tile; the buildings stay on the board.
    let coords: Vec<_> = level.map().tiles_owned_by(3).map(|(c, _)| c).collect();
    for coord in coords {
        level.map_mut().get_mut(coord).unwrap().clear_owner();
    }

    // Player 1 settles; player 3 is skipped from now on.
    let report = level.next_turn().unwrap();
    assert_eq!(report.eliminated, vec![3]);
    assert_eq!(report.next_player, 2);
    assert!(level.player(3).is_none());
    assert!(!level.check_end());

    // The abandoned townhall stays registered as a neutral building.
    let hall = Coord::new(1, 6);
    assert!(level.buildings().contains(&hall));
    let tile = level.map().get(hall).unwrap();
    assert!(tile.entity().unwrap().is_townhall());
    assert_eq!(tile.owner(), None);
    assert_eq!(tile.level(), 1);
    let violations = check_invariants(&level);
    assert!(violations.is_empty(), "{violations:?}");
}

#[test]
fn test_catalog_discovery_in_temp_dir() {
    let dir = tempfile::tempdir().unwrap();
    let tutorial = dir.path().join("tutorial");
    let classic = dir.path().join("classic");
    std::fs::create_dir_all(&tutorial).unwrap();
    std::fs::create_dir_all(classic.join("nested")).unwrap();

    std::fs::write(tutorial.join("first_steps.level"), "T1S1").unwrap();
    std::fs::write(classic.join("big_map.level"), "T1S1~S2T2").unwrap();
    std::fs::write(classic.join("nested").join("deep_dive.level"), "T1").unwrap();
    std::fs::write(classic.join("readme.md"), "not a level").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let levels = discover_levels(dir.path()).unwrap();
    let names: Vec<_> = levels
        .iter()
        .map(|l| (l.category.as_str(), l.name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Classic", "Big map"),
            ("Nested", "Deep dive"),
            ("Tutorial", "First steps"),
        ]
    );

    let big = levels[0]
        .load(GameConfig::default(), LevelTable::default())
        .unwrap();
    assert_eq!(big.players().len(), 2);
}

#[test]
fn test_catalog_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(discover_levels(&missing).is_err());
}

#[test]
fn test_config_file_changes_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(&path, r#"{ "income_per_tile": 1, "starting_money": 5 }"#).unwrap();

    let config = GameConfig::from_json_file(&path).unwrap();
    let mut level = load("tutorial/first_steps.level", config);
    let report = level.next_turn().unwrap();
    // 5 + 6 tiles of income - 2 upkeep.
    assert_eq!(report.settlement.unwrap().townhalls[0].money_after, 9);
}
