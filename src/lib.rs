// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Konkr: territory and economy engine for a hex-grid strategy game.
//!
//! The crate owns the rules of play and nothing else:
//! - Hex adjacency on a row-offset grid
//! - Territory claiming by connectivity to buildings
//! - Per-turn economy with bankruptcy into bandits
//! - Turn order, elimination and the end-of-game check
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    konkr binary (levels/show/play)  │
//! ├─────────────────────────────────────┤
//! │    loader  ·  render  ·  config     │
//! ├─────────────────────────────────────┤
//! │    game: Level → Map → Tile/Entity  │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use konkr::{GameConfig, LevelTable, parse_level};
//!
//! let mut level = parse_level("T1S1~S2T2", GameConfig::default(), LevelTable::default())?;
//! let report = level.next_turn()?;
//! assert_eq!(report.next_player, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod loader;
pub mod render;

pub use config::{BankruptcyOwnership, GameConfig};
pub use error::{ConfigError, GameError, GameResult, LoadError};

// Re-export key game types at crate root for convenience
pub use game::{
    Coord, Entity, EntityKind, HexDirection, Level, LevelTable, Map, Player, PlayerId,
    SettlementReport, Tile, TileType, TurnReport,
};
pub use loader::{LevelInfo, discover_levels, load_level, parse_level};
pub use render::{LevelSummary, render_ascii, render_status};
