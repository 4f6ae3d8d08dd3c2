//! CLI command implementations for Konkr.

pub(crate) mod levels;
pub(crate) mod play;
pub(crate) mod show;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use konkr::{ConfigError, GameConfig, GameError, LevelTable, LoadError};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format shared by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("Failed to encode JSON: {e}"))
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        Self::new(format!("Simulation failed: {e}"))
    }
}

/// Load the rules and sprite table, falling back to the built-in defaults.
fn load_rules(
    config: Option<&Path>,
    sprites: Option<&Path>,
) -> Result<(GameConfig, LevelTable), CliError> {
    let config = match config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let table = match sprites {
        Some(path) => LevelTable::from_json_file(path)?,
        None => LevelTable::default(),
    };
    Ok((config, table))
}
