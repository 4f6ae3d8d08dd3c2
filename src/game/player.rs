//! Player state management.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::Coord;

/// Unique identifier for a player (the digit after a townhall letter).
pub type PlayerId = u8;

const NAME_PREFIXES: &[&str] = &[
    "Mocan", "Waehren", "Iron", "Fire", "Shadow", "Thunder", "Frost", "Dark", "Steel", "Flame",
    "Stone", "Wolf", "Dragon", "Eagle", "Lion", "Blood", "Grim", "Raven",
];

const NAME_STEMS: &[&str] = &[
    "axe", "claw", "blade", "fang", "heart", "spear", "shield", "hammer", "bow", "arrow", "sword",
    "wing", "tail",
];

const NAME_SUFFIXES: &[&str] = &["gar", "thar", "dor", "wen", "ion", "dar", "gor", "nor", "thor", "khan"];

/// Generate a warrior name: prefix + stem, with a suffix half of the time.
pub fn generate_warrior_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = NAME_PREFIXES.choose(rng).copied().unwrap_or("Nameless");
    let stem = NAME_STEMS.choose(rng).copied().unwrap_or_default();

    let suffix = if rng.gen_bool(0.5) {
        NAME_SUFFIXES.choose(rng).copied().unwrap_or_default()
    } else {
        ""
    };
    format!("{prefix}{stem}{suffix}")
}

/// A participant in the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Tiles holding this player's townhalls, in map order.
    pub townhalls: Vec<Coord>,
}

impl Player {
    /// Create a player with no townhalls yet.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            townhalls: Vec::new(),
        }
    }

    /// Register a townhall tile. Duplicates are ignored.
    pub fn add_townhall(&mut self, coord: Coord) {
        if !self.townhalls.contains(&coord) {
            self.townhalls.push(coord);
        }
    }

    /// Number of townhalls registered.
    #[must_use]
    pub fn townhall_count(&self) -> usize {
        self.townhalls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_player_creation() {
        let player = Player::new(3, "Ironaxe");
        assert_eq!(player.id, 3);
        assert_eq!(player.name, "Ironaxe");
        assert_eq!(player.townhall_count(), 0);
    }

    #[test]
    fn test_add_townhall_dedupes() {
        let mut player = Player::new(1, "p");
        player.add_townhall(Coord::new(1, 1));
        player.add_townhall(Coord::new(1, 1));
        player.add_townhall(Coord::new(4, 2));
        assert_eq!(player.townhalls, vec![Coord::new(1, 1), Coord::new(4, 2)]);
    }

    #[test]
    fn test_names_are_reproducible() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(generate_warrior_name(&mut a), generate_warrior_name(&mut b));
        }
    }

    #[test]
    fn test_name_starts_with_known_prefix() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let name = generate_warrior_name(&mut rng);
            assert!(NAME_PREFIXES.iter().any(|p| name.starts_with(p)), "{name}");
        }
    }
}
