#![no_main]

//! Multi-turn fuzzer.
//!
//! Builds a small board from structured input, then runs turns under
//! arbitrary economy settings, checking invariants after every turn.

use arbitrary::Arbitrary;
use konkr::game::check_invariants;
use konkr::{BankruptcyOwnership, GameConfig, GameError, LevelTable, parse_level};
use libfuzzer_sys::fuzz_target;

/// One cell of the generated board.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzCell {
    Water,
    Forest,
    Sand(u8),
    Townhall(u8),
    Castle(u8),
    Unit(u8),
    Bandit(u8),
}

impl FuzzCell {
    fn push_to(self, out: &mut String) {
        let (letter, owner) = match self {
            FuzzCell::Water => ('~', None),
            FuzzCell::Forest => ('#', None),
            FuzzCell::Sand(o) => ('S', Some(o)),
            FuzzCell::Townhall(o) => ('T', Some(o)),
            FuzzCell::Castle(o) => ('C', Some(o)),
            FuzzCell::Unit(o) => ('V', Some(o)),
            FuzzCell::Bandit(o) => ('B', Some(o)),
        };
        out.push(letter);
        if let Some(owner) = owner {
            out.push(char::from(b'0' + owner % 4));
        }
    }
}

/// Structured input for turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    rows: Vec<Vec<FuzzCell>>,
    starting_money: i16,
    income_per_tile: i8,
    unit_upkeep: i8,
    clear_on_bankruptcy: bool,
    num_turns: u8,
}

fuzz_target!(|input: TurnInput| {
    let mut source = String::new();
    for (i, row) in input.rows.iter().take(12).enumerate() {
        if i % 2 == 1 {
            source.push('|');
        }
        for cell in row.iter().take(12) {
            cell.push_to(&mut source);
        }
        source.push('\n');
    }

    let config = GameConfig {
        starting_money: i32::from(input.starting_money),
        income_per_tile: i32::from(input.income_per_tile),
        unit_upkeep: i32::from(input.unit_upkeep),
        bankruptcy_owner: if input.clear_on_bankruptcy {
            BankruptcyOwnership::Clear
        } else {
            BankruptcyOwnership::Keep
        },
        ..GameConfig::default()
    };

    let Ok(mut level) = parse_level(&source, config, LevelTable::default()) else {
        return;
    };

    for _ in 0..input.num_turns.min(64) {
        match level.next_turn() {
            Ok(report) => {
                assert!(level.player(report.next_player).is_some());
            }
            Err(GameError::NoActivePlayers) => {
                assert!(level.players().is_empty());
                break;
            }
            Err(e) => panic!("turn failed: {e}"),
        }
        let violations = check_invariants(&level);
        assert!(violations.is_empty(), "turn {}: {violations:?}", level.turn());
    }
});
