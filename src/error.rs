//! Error types for level loading, configuration and turn processing.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::Coord;

/// Failure to produce a playable level from a file or string.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The level file could not be read.
    #[error("failed to read level file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The level source had no lines at all.
    #[error("no map data found in level")]
    EmptyMap,
    /// Every line was parsed but none produced a tile.
    #[error("level map contains no tiles")]
    NoTiles,
    /// The parsed map could not be brought into a consistent state.
    #[error("level is inconsistent: {0}")]
    State(#[from] GameError),
    /// A levels directory could not be walked.
    #[error("failed to scan levels directory {}: {source}", path.display())]
    Catalog {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Failure to read a configuration or sprite table file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broken game state detected while advancing the simulation.
///
/// These indicate a bug in the level data or in the engine, never a
/// condition the caller is expected to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// `next_turn` was called with nobody left in the roster.
    #[error("no active players remain")]
    NoActivePlayers,
    /// The building registry points at a tile without a building.
    #[error("building registry entry {0} no longer holds a building")]
    StaleBuilding(Coord),
    /// A coordinate that must exist is not on the map.
    #[error("no tile at {0}")]
    MissingTile(Coord),
}

/// Result type for turn processing.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::StaleBuilding(Coord::new(2, 5));
        assert_eq!(
            err.to_string(),
            "building registry entry (2, 5) no longer holds a building"
        );
        assert_eq!(GameError::NoActivePlayers.to_string(), "no active players remain");
    }

    #[test]
    fn test_load_error_display_mentions_path() {
        let err = LoadError::Io {
            path: PathBuf::from("levels/missing.level"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("levels/missing.level"));
        assert!(msg.contains("not found"));
    }
}
