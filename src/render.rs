//! Text rendering of a level for terminals and JSON consumers.

// format! with push_str reads better here than write! plumbing
#![allow(clippy::format_push_string)]

use serde::Serialize;

use crate::game::{Coord, Level, PlayerId, Tile, TileType};

/// Render the map in level-file notation.
///
/// Odd rows get the `|` indent marker. Owned sand renders as
/// entity letter (or `S`) plus owner digit, neutral sand uses `.` in place
/// of the digit and holes render as `?`. Maps where every sand tile is
/// owned by players `0..=9` parse back to the same board.
#[must_use]
pub fn render_ascii(level: &Level) -> String {
    let mut output = String::new();

    for (row_index, row) in level.map().rows().iter().enumerate() {
        if row_index % 2 == 1 {
            output.push('|');
        }
        for cell in row {
            match cell {
                Some(tile) => push_cell(&mut output, tile),
                None => output.push('?'),
            }
        }
        output.push('\n');
    }

    output
}

fn push_cell(output: &mut String, tile: &Tile) {
    match tile.tile_type() {
        TileType::Water => output.push('~'),
        TileType::Forest => output.push('#'),
        TileType::Sand => {
            let letter = tile
                .entity()
                .and_then(|e| e.kind().letter())
                .unwrap_or('S');
            output.push(letter);
            output.push(owner_digit(tile.owner()));
        }
    }
}

fn owner_digit(owner: Option<PlayerId>) -> char {
    owner.map_or('.', |id| char::from_digit(u32::from(id), 10).unwrap_or('?'))
}

/// Render a human-readable status block: turn, players, treasuries.
#[must_use]
pub fn render_status(level: &Level) -> String {
    let summary = LevelSummary::from_level(level);
    let mut output = String::new();

    output.push_str(&format!("Turn {}\n", summary.turn));
    match summary.current_player {
        Some(id) => output.push_str(&format!("  Current player: {id}\n")),
        None => output.push_str("  Current player: none\n"),
    }
    output.push('\n');

    for player in &summary.players {
        output.push_str(&format!(
            "  Player {} ({}): {} tiles\n",
            player.id, player.name, player.tiles
        ));
        for hall in &player.townhalls {
            output.push_str(&format!(
                "    Townhall {}: money {}, level {}, territory {}\n",
                hall.coord, hall.money, hall.level, hall.territory
            ));
        }
    }

    if summary.finished {
        output.push('\n');
        match summary.winner {
            Some(id) => output.push_str(&format!("  Winner: Player {id}\n")),
            None => output.push_str("  Winner: none\n"),
        }
    }

    output
}

/// Serializable snapshot of a level's standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    /// Completed turn count.
    pub turn: u32,
    /// Player whose turn is next.
    pub current_player: Option<PlayerId>,
    /// Whether at most one owner remains.
    pub finished: bool,
    /// Sole remaining owner, if any.
    pub winner: Option<PlayerId>,
    /// Per-player standing, in turn order.
    pub players: Vec<PlayerSummary>,
}

/// One player's standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    /// Player ID.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Owned sand tiles, claimed or not.
    pub tiles: usize,
    /// Townhalls still standing.
    pub townhalls: Vec<TownhallSummary>,
}

/// One townhall's treasury.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TownhallSummary {
    /// Tile the townhall stands on.
    pub coord: Coord,
    /// Current treasury.
    pub money: i32,
    /// Townhall level.
    pub level: usize,
    /// Size of the connected territory.
    pub territory: usize,
}

impl LevelSummary {
    /// Snapshot the given level.
    #[must_use]
    pub fn from_level(level: &Level) -> Self {
        let players = level
            .players()
            .iter()
            .map(|player| PlayerSummary {
                id: player.id,
                name: player.name.clone(),
                tiles: level.map().count_territory(player.id),
                townhalls: player
                    .townhalls
                    .iter()
                    .filter_map(|&coord| {
                        let entity = level.map().get(coord)?.entity()?;
                        Some(TownhallSummary {
                            coord,
                            money: entity.money()?,
                            level: entity.level(),
                            territory: crate::game::territory(level.map(), coord).len(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            turn: level.turn(),
            current_player: level.current_player().map(|p| p.id),
            finished: level.check_end(),
            winner: level.winner(),
            players,
        }
    }
}
