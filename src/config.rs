//! Game rules configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What happens to tile ownership when a bankrupt realm's units turn into
/// bandits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankruptcyOwnership {
    /// The realm keeps nominal ownership of the bandit tiles.
    #[default]
    Keep,
    /// Bandit tiles become neutral.
    Clear,
}

/// Economy and setup constants.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```json
/// { "income_per_tile": 1, "bankruptcy_owner": "clear" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Initial treasury of every townhall.
    pub starting_money: i32,
    /// Money each tile of a townhall's territory yields per settlement.
    ///
    /// Zero by default: a townhall's treasury only moves by its upkeep.
    pub income_per_tile: i32,
    /// Upkeep of a human unit.
    pub unit_upkeep: i32,
    /// Upkeep value carried by bandits.
    pub bandit_upkeep: i32,
    /// Treasury needed per townhall level.
    pub townhall_level_step: i32,
    /// Ownership of tiles whose units went bandit.
    pub bankruptcy_owner: BankruptcyOwnership,
    /// Seed for player name generation.
    pub name_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_money: 10,
            income_per_tile: 0,
            unit_upkeep: 2,
            bandit_upkeep: -1,
            townhall_level_step: 10,
            bankruptcy_owner: BankruptcyOwnership::Keep,
            name_seed: 0,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has wrongly typed fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
