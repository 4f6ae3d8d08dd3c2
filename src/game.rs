//! Game layer for Konkr.
//!
//! Implements the simulation rules:
//! - Hex map with sand, water and forest tiles
//! - Entities (townhalls, castles, units, bandits) standing on tiles
//! - Territory claiming by connectivity to buildings
//! - Economy (income, upkeep, bankruptcy)
//! - Turn order and elimination

pub mod economy;
mod entity;
mod hex;
mod invariants;
mod level;
mod level_table;
mod map;
mod player;
pub mod territory;
pub mod tile;

pub use economy::{SettlementReport, TownhallSettlement, settle_economy};
pub use entity::{Entity, EntityKind, format_display_name};
pub use hex::{Coord, HexDirection};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use level::{Level, TurnReport};
pub use level_table::LevelTable;
pub use map::Map;
pub use player::{Player, PlayerId, generate_warrior_name};
pub use territory::{TerritoryStats, claim_connected_territory, refresh_territory, territory};
pub use tile::{Tile, TileType};
