//! Per-kind level table supplied by the renderer's sprite mapping.
//!
//! The renderer ships an `entity_sprites.json` file mapping each entity kind
//! name to the ordered list of sprites used for its levels:
//!
//! ```json
//! { "HumanUnit": ["villager", "pikeman", "knight", "hero"] }
//! ```
//!
//! The engine only needs the length of each list (to clamp leveling) and
//! the name at an index (for display).

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::game::EntityKind;

/// Lookup from entity kind to its ordered level sprites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    sprites: HashMap<EntityKind, Vec<String>>,
}

impl LevelTable {
    /// Create an empty table. Every kind has a single level 0.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sprites: HashMap::new(),
        }
    }

    /// Parse a sprite mapping from JSON.
    ///
    /// Entries with an unknown kind name or a non-string sprite are skipped
    /// with a warning so the rest of the table stays usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut table = Self::empty();

        for (key, value) in raw {
            let kind = EntityKind::from_name(&key);
            if kind == EntityKind::Unknown {
                tracing::warn!(key = %key, "skipping sprite mapping for unknown entity kind");
                continue;
            }
            let Some(items) = value.as_array() else {
                tracing::warn!(key = %key, "sprite mapping is not an array");
                continue;
            };

            let mut names = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(name) => names.push(name.to_string()),
                    None => tracing::warn!(key = %key, "invalid sprite name format in entity mapping"),
                }
            }
            table.sprites.insert(kind, names);
        }

        Ok(table)
    }

    /// Read and parse a sprite mapping file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Replace the sprite list for a kind.
    pub fn insert(&mut self, kind: EntityKind, sprites: Vec<String>) {
        self.sprites.insert(kind, sprites);
    }

    /// Number of sprites known for a kind (0 if unmapped).
    #[must_use]
    pub fn level_count(&self, kind: EntityKind) -> usize {
        self.sprites.get(&kind).map_or(0, Vec::len)
    }

    /// Highest level an entity of this kind may reach.
    #[must_use]
    pub fn max_level(&self, kind: EntityKind) -> usize {
        self.level_count(kind).saturating_sub(1)
    }

    /// Sprite name for a kind at a level, if mapped.
    #[must_use]
    pub fn sprite_name(&self, kind: EntityKind, level: usize) -> Option<&str> {
        self.sprites
            .get(&kind)
            .and_then(|names| names.get(level))
            .map(String::as_str)
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        let mut table = Self::empty();
        let mut put = |kind, names: &[&str]| {
            table.insert(kind, names.iter().map(|s| (*s).to_string()).collect());
        };
        put(EntityKind::Forest, &["pine_forest"]);
        put(EntityKind::Townhall, &["village_hall", "town_hall", "city_hall"]);
        put(EntityKind::Castle, &["castle"]);
        put(EntityKind::HumanUnit, &["villager", "pikeman", "knight", "hero"]);
        put(EntityKind::Bandit, &["bandit"]);
        table
    }
}
