//! Pieces that can stand on a tile.
//!
//! Every piece shares one record (kind, level, upkeep, position); behaviour
//! that differs per kind is a `match` on [`EntityKind`].

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::{Coord, LevelTable};

/// The closed set of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Decorative forest on a forest tile.
    Forest,
    /// Capital of a realm; holds the treasury.
    Townhall,
    /// Defensive building.
    Castle,
    /// Player-controlled unit.
    HumanUnit,
    /// Hostile unit produced by bankruptcy.
    Bandit,
    /// Anything the engine does not recognise.
    Unknown,
}

impl EntityKind {
    /// Kind for a map letter (`T`, `C`, `V`, `B`, `#`).
    #[must_use]
    pub const fn from_letter(c: char) -> Self {
        match c {
            '#' => EntityKind::Forest,
            'T' => EntityKind::Townhall,
            'C' => EntityKind::Castle,
            'V' => EntityKind::HumanUnit,
            'B' => EntityKind::Bandit,
            _ => EntityKind::Unknown,
        }
    }

    /// Map letter for owned kinds, `None` for decoration and unknowns.
    #[must_use]
    pub const fn letter(self) -> Option<char> {
        match self {
            EntityKind::Townhall => Some('T'),
            EntityKind::Castle => Some('C'),
            EntityKind::HumanUnit => Some('V'),
            EntityKind::Bandit => Some('B'),
            EntityKind::Forest | EntityKind::Unknown => None,
        }
    }

    /// Canonical name, as used as key in the sprite mapping.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Forest => "Forest",
            EntityKind::Townhall => "Townhall",
            EntityKind::Castle => "Castle",
            EntityKind::HumanUnit => "HumanUnit",
            EntityKind::Bandit => "Bandit",
            EntityKind::Unknown => "Unknown",
        }
    }

    /// Inverse of [`EntityKind::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Forest" => EntityKind::Forest,
            "Townhall" => EntityKind::Townhall,
            "Castle" => EntityKind::Castle,
            "HumanUnit" => EntityKind::HumanUnit,
            "Bandit" => EntityKind::Bandit,
            _ => EntityKind::Unknown,
        }
    }

    /// Buildings anchor territory and never move.
    #[must_use]
    pub const fn is_building(self) -> bool {
        matches!(self, EntityKind::Townhall | EntityKind::Castle)
    }

    /// Kinds whose level can change during play.
    #[must_use]
    pub const fn is_leveled(self) -> bool {
        matches!(self, EntityKind::Townhall | EntityKind::HumanUnit)
    }
}

/// Turn a snake_case identifier into a display label.
///
/// Underscores become spaces and the first letter is capitalised:
/// `"pine_forest"` gives `"Pine forest"`.
#[must_use]
pub fn format_display_name(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A piece standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    kind: EntityKind,
    level: usize,
    upkeep: i32,
    treasury: Option<i32>,
    grid_position: Coord,
}

impl Entity {
    /// Create an entity with the stock upkeep for its kind.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self::with_config(kind, &GameConfig::default())
    }

    /// Create an entity using the upkeep and starting money from `config`.
    #[must_use]
    pub fn with_config(kind: EntityKind, config: &GameConfig) -> Self {
        let upkeep = match kind {
            EntityKind::HumanUnit => config.unit_upkeep,
            EntityKind::Bandit => config.bandit_upkeep,
            EntityKind::Forest
            | EntityKind::Townhall
            | EntityKind::Castle
            | EntityKind::Unknown => 0,
        };
        let treasury = (kind == EntityKind::Townhall).then_some(config.starting_money);

        Self {
            kind,
            level: 0,
            upkeep,
            treasury,
            grid_position: Coord::new(0, 0),
        }
    }

    /// The entity's kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Current level (index into the kind's sprite list).
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Set the level directly, bypassing clamping.
    pub fn set_level(&mut self, level: usize) {
        self.level = level;
    }

    /// Raise the level by one, up to the table's maximum for this kind.
    ///
    /// No-op for kinds that do not level.
    pub fn increase_level(&mut self, table: &LevelTable) {
        if !self.kind.is_leveled() {
            return;
        }
        if self.level >= table.max_level(self.kind) {
            return;
        }
        self.level += 1;
    }

    /// Lower the level by one, stopping at 0.
    ///
    /// No-op for kinds that do not level.
    pub fn decrease_level(&mut self) {
        if !self.kind.is_leveled() {
            return;
        }
        self.level = self.level.saturating_sub(1);
    }

    /// Upkeep this entity costs per settlement.
    ///
    /// For a townhall this is the total upkeep of the units in its
    /// territory as of the last territory refresh.
    #[must_use]
    pub const fn upkeep_cost(&self) -> i32 {
        self.upkeep
    }

    /// Overwrite the upkeep.
    pub fn set_upkeep_cost(&mut self, upkeep: i32) {
        self.upkeep = upkeep;
    }

    /// Whether this is a townhall or castle.
    #[must_use]
    pub const fn is_building(&self) -> bool {
        self.kind.is_building()
    }

    /// Whether this is a player unit.
    #[must_use]
    pub fn is_human_unit(&self) -> bool {
        self.kind == EntityKind::HumanUnit
    }

    /// Whether this is a townhall.
    #[must_use]
    pub fn is_townhall(&self) -> bool {
        self.kind == EntityKind::Townhall
    }

    /// Whether this is a bandit.
    #[must_use]
    pub fn is_bandit(&self) -> bool {
        self.kind == EntityKind::Bandit
    }

    /// Treasury of a townhall; `None` for every other kind.
    #[must_use]
    pub const fn money(&self) -> Option<i32> {
        self.treasury
    }

    /// Update a townhall's treasury and re-level it.
    ///
    /// The townhall gains a level while `money >= step * level` and loses
    /// one otherwise. Ignored for entities without a treasury.
    pub fn set_money(&mut self, money: i32, table: &LevelTable, step: i32) {
        if self.treasury.is_none() {
            return;
        }
        self.treasury = Some(money);

        let threshold = i64::from(step) * i64::try_from(self.level).unwrap_or(i64::MAX);
        if i64::from(money) >= threshold {
            self.increase_level(table);
        } else {
            self.decrease_level();
        }
    }

    /// Position of the tile holding this entity.
    #[must_use]
    pub const fn grid_position(&self) -> Coord {
        self.grid_position
    }

    /// Mirror the holding tile's position.
    pub fn set_grid_position(&mut self, grid_position: Coord) {
        self.grid_position = grid_position;
    }

    /// Human-readable name, from the sprite at the current level if mapped.
    #[must_use]
    pub fn display_name(&self, table: &LevelTable) -> String {
        table
            .sprite_name(self.kind, self.level)
            .map_or_else(|| self.kind.name().to_string(), format_display_name)
    }
}
