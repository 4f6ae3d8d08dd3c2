//! Level files: parsing and discovery.
//!
//! # Format
//!
//! One map row per line. A leading `|` marks a shifted row and is skipped.
//! Each cell is either a single terrain character or a letter followed by
//! the owner's digit:
//!
//! | Cell  | Meaning                          |
//! |-------|----------------------------------|
//! | `~`   | water                            |
//! | `#`   | forest (with a forest entity)    |
//! | `S1`  | sand owned by player 1           |
//! | `T1`  | sand + townhall of player 1      |
//! | `C1`  | sand + castle                    |
//! | `V1`  | sand + human unit                |
//! | `B1`  | sand + bandit                    |
//!
//! Anything else leaves a hole in the row.
//!
//! # Catalog
//!
//! Levels live in `<dir>/<category>/<snake_case_name>.level`.

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::LoadError;
use crate::game::{
    Coord, Entity, EntityKind, Level, LevelTable, Map, Player, PlayerId, Tile, TileType,
    format_display_name, generate_warrior_name,
};

/// File extension of level files.
pub const LEVEL_EXTENSION: &str = "level";

/// Parse a level from its text.
///
/// Players are created in the order their first townhall appears, which
/// becomes the turn order.
///
/// # Errors
///
/// Returns [`LoadError::EmptyMap`] for empty text, [`LoadError::NoTiles`]
/// if no cell produced a tile.
pub fn parse_level(source: &str, config: GameConfig, table: LevelTable) -> Result<Level, LoadError> {
    let lines: Vec<&str> = source.lines().collect();
    if lines.is_empty() {
        return Err(LoadError::EmptyMap);
    }

    let mut rng = StdRng::seed_from_u64(config.name_seed);
    let mut players: Vec<Player> = Vec::new();
    let mut rows = Vec::with_capacity(lines.len());

    for (row_index, line) in lines.iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        let mut row: Vec<Option<Tile>> = Vec::new();
        let mut col = usize::from(chars.first() == Some(&'|'));

        while col < chars.len() {
            let c = chars[col];
            let coord = Coord::new(row_index, row.len());

            match c {
                '~' => {
                    row.push(Some(Tile::water()));
                    col += 1;
                }
                '#' => {
                    let mut tile = Tile::forest();
                    tile.set_entity(Some(Entity::with_config(EntityKind::Forest, &config)));
                    row.push(Some(tile));
                    col += 1;
                }
                _ => match chars.get(col + 1).and_then(|d| d.to_digit(10)) {
                    Some(digit) => {
                        let owner = PlayerId::try_from(digit).unwrap_or_default();
                        row.push(owned_cell(c, owner, coord, &config, &mut players, &mut rng));
                        col += 2;
                    }
                    None => {
                        tracing::debug!(%coord, cell = %c, "skipping malformed cell");
                        row.push(None);
                        col += 1;
                    }
                },
            }
        }
        rows.push(row);
    }

    let map = Map::new(rows);
    if map.is_empty() {
        return Err(LoadError::NoTiles);
    }

    let level = Level::new(map, players, config, table)?;
    tracing::info!(
        tiles = level.map().tile_count(),
        players = level.players().len(),
        buildings = level.buildings().len(),
        "level parsed"
    );
    Ok(level)
}

/// Build the tile for a letter+digit cell, registering new players.
fn owned_cell(
    c: char,
    owner: PlayerId,
    coord: Coord,
    config: &GameConfig,
    players: &mut Vec<Player>,
    rng: &mut StdRng,
) -> Option<Tile> {
    if TileType::from_ascii(c) != Some(TileType::Sand) {
        tracing::warn!(%coord, cell = %c, "unknown cell letter");
        return None;
    }

    let mut tile = Tile::sand(Some(owner));
    let kind = EntityKind::from_letter(c);
    if kind != EntityKind::Unknown {
        tile.set_entity(Some(Entity::with_config(kind, config)));
    }

    if kind == EntityKind::Townhall {
        let index = match players.iter().position(|p| p.id == owner) {
            Some(index) => index,
            None => {
                players.push(Player::new(owner, generate_warrior_name(rng)));
                players.len() - 1
            }
        };
        players[index].add_townhall(coord);
    }

    Some(tile)
}

/// Read and parse a level file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or any parse error.
pub fn load_level(path: &Path, config: GameConfig, table: LevelTable) -> Result<Level, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loading level");
    parse_level(&source, config, table)
}

/// A level found on disk, not yet loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelInfo {
    /// Display name derived from the file stem.
    pub name: String,
    /// Display category derived from the parent directory.
    pub category: String,
    /// Path of the level file.
    pub path: PathBuf,
}

impl LevelInfo {
    /// Describe a level file from its path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let category = path
            .parent()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name: format_display_name(&stem),
            category: capitalize(&category),
            path: path.to_path_buf(),
        }
    }

    /// Load the level.
    ///
    /// # Errors
    ///
    /// See [`load_level`].
    pub fn load(&self, config: GameConfig, table: LevelTable) -> Result<Level, LoadError> {
        load_level(&self.path, config, table)
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Find every `.level` file under `dir`, sorted by category then name.
///
/// # Errors
///
/// Returns [`LoadError::Catalog`] if a directory cannot be read.
pub fn discover_levels(dir: &Path) -> Result<Vec<LevelInfo>, LoadError> {
    let mut levels = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|source| LoadError::Catalog {
            path: current.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| LoadError::Catalog {
                    path: current.clone(),
                    source,
                })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == LEVEL_EXTENSION) {
                levels.push(LevelInfo::from_path(&path));
            }
        }
    }

    levels.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
    tracing::debug!(count = levels.len(), dir = %dir.display(), "levels discovered");
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Level, LoadError> {
        parse_level(source, GameConfig::default(), LevelTable::default())
    }

    #[test]
    fn test_parse_basic_level() {
        let level = parse("~T1S1~\n|S1V1#S2T2").unwrap();
        let map = level.map();

        assert_eq!(map.row_len(0), 4);
        assert_eq!(map.row_len(1), 5);
        assert_eq!(map.get(Coord::new(0, 0)).unwrap().tile_type(), TileType::Water);

        let hall = map.get(Coord::new(0, 1)).unwrap();
        assert_eq!(hall.owner(), Some(1));
        assert!(hall.entity().unwrap().is_townhall());

        let unit = map.get(Coord::new(1, 1)).unwrap();
        assert!(unit.entity().unwrap().is_human_unit());
        assert_eq!(unit.entity().unwrap().grid_position(), Coord::new(1, 1));

        let forest = map.get(Coord::new(1, 2)).unwrap();
        assert_eq!(forest.tile_type(), TileType::Forest);
        assert_eq!(forest.entity().unwrap().kind(), EntityKind::Forest);
        assert_eq!(forest.owner(), None);
    }

    #[test]
    fn test_unit_upkeep_at_the_limit_loads() {
        let config = GameConfig {
            unit_upkeep: i32::MAX,
            ..GameConfig::default()
        };
        let level = parse_level("T1V1V1", config, LevelTable::default()).unwrap();
        assert_eq!(level.townhall_upkeep(Coord::new(0, 0)), Some(i32::MAX));
    }

    #[test]
    fn test_players_in_townhall_order() {
        let level = parse("T3S3~T1\nT3S1").unwrap();
        let ids: Vec<_> = level.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        let p3 = level.player(3).unwrap();
        assert_eq!(p3.townhalls, vec![Coord::new(0, 0), Coord::new(1, 0)]);
        assert!(!p3.name.is_empty());
    }

    #[test]
    fn test_owned_tiles_without_townhall_make_no_player() {
        let level = parse("S4V4T1").unwrap();
        assert!(level.player(4).is_none());
        assert!(level.player(1).is_some());
    }

    #[test]
    fn test_malformed_cells_leave_holes() {
        let level = parse("T1x~S").unwrap();
        let map = level.map();
        assert_eq!(map.row_len(0), 4);
        assert!(map.get(Coord::new(0, 1)).is_none());
        assert_eq!(map.get(Coord::new(0, 2)).unwrap().tile_type(), TileType::Water);
        assert!(map.get(Coord::new(0, 3)).is_none());
    }

    #[test]
    fn test_unknown_letter_with_digit_is_a_hole() {
        let level = parse("T1X5S1").unwrap();
        assert_eq!(level.map().row_len(0), 3);
        assert!(level.map().get(Coord::new(0, 1)).is_none());
        assert_eq!(level.map().get(Coord::new(0, 2)).unwrap().owner(), Some(1));
    }

    #[test]
    fn test_bandit_tiles_are_nominally_owned() {
        let level = parse("T1B1").unwrap();
        let tile = level.map().get(Coord::new(0, 1)).unwrap();
        assert_eq!(tile.owner(), Some(1));
        assert!(tile.entity().unwrap().is_bandit());
    }

    #[test]
    fn test_empty_source_fails() {
        assert!(matches!(parse(""), Err(LoadError::EmptyMap)));
        assert!(matches!(parse("???\n|"), Err(LoadError::NoTiles)));
    }

    #[test]
    fn test_names_follow_seed() {
        let a = parse("T1T2").unwrap();
        let b = parse("T1T2").unwrap();
        assert_eq!(a.players()[0].name, b.players()[0].name);
        assert_eq!(a.players()[1].name, b.players()[1].name);
    }

    #[test]
    fn test_missing_file() {
        let err = load_level(
            Path::new("/nonexistent/level.level"),
            GameConfig::default(),
            LevelTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_level_info_from_path() {
        let info = LevelInfo::from_path(Path::new("levels/tutorial/first_steps.level"));
        assert_eq!(info.name, "First steps");
        assert_eq!(info.category, "Tutorial");
    }
}
