//! Game invariants - sanity checks that detect bugs.
//!
//! These hold after every territory refresh in a correctly implemented
//! engine. A violation points at broken level data or an engine bug, never
//! at a legal game situation.

use crate::game::tile::{LEVEL_CLAIMED, LEVEL_UNSET};
use crate::game::{EntityKind, Level};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(level: &Level) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut push = |message: String| violations.push(InvariantViolation { message });

    for (coord, tile) in level.map().iter() {
        if tile.grid_position() != coord {
            push(format!(
                "Tile at {coord} thinks it is at {}",
                tile.grid_position()
            ));
        }
        if let Some(entity) = tile.entity() {
            if entity.grid_position() != coord {
                push(format!(
                    "Entity on {coord} thinks it is at {}",
                    entity.grid_position()
                ));
            }
        }

        if tile.is_decoration() {
            if let Some(owner) = tile.owner() {
                push(format!("Decorative tile at {coord} is owned by {owner}"));
            }
            if tile.level() != LEVEL_UNSET {
                push(format!(
                    "Decorative tile at {coord} has level {}",
                    tile.level()
                ));
            }
            continue;
        }

        // Buildings get the claimed level even when nothing else holds.
        if tile.has_building() {
            if tile.level() != LEVEL_CLAIMED {
                push(format!("Building at {coord} is not at the claimed level"));
            }
        } else {
            let claimed = tile.owner().is_some() && !tile.is_orphan();
            if (tile.level() == LEVEL_CLAIMED) != claimed {
                push(format!(
                    "Sand tile at {coord} has level {} but claimed = {claimed}",
                    tile.level()
                ));
            }
        }

        // A neutral townhall is left over from an eliminated realm.
        if tile.entity().is_some_and(|e| e.kind() == EntityKind::Townhall) {
            if let Some(owner) = tile.owner().filter(|&o| level.player(o).is_none()) {
                push(format!(
                    "Townhall at {coord} belongs to unregistered player {owner}"
                ));
            }
        }
    }

    for &coord in level.buildings() {
        if !level.map().get(coord).is_some_and(|t| t.has_building()) {
            push(format!("Building registry entry {coord} holds no building"));
        }
    }

    for player in level.players() {
        for &coord in &player.townhalls {
            let holds_townhall = level
                .map()
                .get(coord)
                .and_then(|t| t.entity())
                .is_some_and(|e| e.is_townhall());
            if !holds_townhall {
                push(format!(
                    "Player {} lists townhall at {coord} but there is none",
                    player.id
                ));
            }
        }
    }

    if !level.players().is_empty() && level.current_index() >= level.players().len() {
        push(format!(
            "Current player index {} is out of range for {} players",
            level.current_index(),
            level.players().len()
        ));
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(level: &Level) {
    let violations = check_invariants(level);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_level: &Level) {}
