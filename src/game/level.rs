//! A level in play: map, roster and turn order.

use serde::Serialize;

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::game::economy::{SettlementReport, settle_economy};
use crate::game::territory::{self, TerritoryStats};
use crate::game::{Coord, LevelTable, Map, Player, PlayerId};

/// Everything that happened during one call to [`Level::next_turn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Turn counter after this call (1 for the first call).
    pub turn: u32,
    /// Economy of the player whose turn ended, `None` if that player had
    /// just been eliminated.
    pub settlement: Option<SettlementReport>,
    /// Players removed from the roster this call, in turn order.
    pub eliminated: Vec<PlayerId>,
    /// Player whose turn it is now.
    pub next_player: PlayerId,
}

/// Complete game state for one level.
#[derive(Debug, Clone)]
pub struct Level {
    map: Map,
    players: Vec<Player>,
    buildings: Vec<Coord>,
    current: usize,
    turn: u32,
    config: GameConfig,
    table: LevelTable,
}

impl Level {
    /// Create a level and compute its initial territory.
    ///
    /// The building registry is built from the map. Players keep the order
    /// given, which is the turn order.
    ///
    /// # Errors
    ///
    /// Propagates territory refresh failures.
    pub fn new(
        map: Map,
        players: Vec<Player>,
        config: GameConfig,
        table: LevelTable,
    ) -> GameResult<Self> {
        let buildings = map.building_coords();
        let mut level = Self {
            map,
            players,
            buildings,
            current: 0,
            turn: 0,
            config,
            table,
        };
        level.refresh_territory()?;
        Ok(level)
    }

    /// The tile grid.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Mutable tile grid, for scripted changes between turns.
    ///
    /// Call [`Level::refresh_territory`] afterwards to bring claims up to date.
    #[must_use]
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Active players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Tiles holding townhalls or castles.
    #[must_use]
    pub fn buildings(&self) -> &[Coord] {
        &self.buildings
    }

    /// Index of the current player in [`Level::players`].
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    /// Make `id` the current player. Returns `false` if not in the roster.
    pub fn set_current_player(&mut self, id: PlayerId) -> bool {
        match self.players.iter().position(|p| p.id == id) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }

    /// Number of completed `next_turn` calls.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Rules in effect.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Level table used for leveling entities.
    #[must_use]
    pub const fn level_table(&self) -> &LevelTable {
        &self.table
    }

    /// Claim the territory connected to `start`.
    pub fn claim_connected_territory(&mut self, start: Coord) -> Vec<Coord> {
        territory::claim_connected_territory(&mut self.map, start)
    }

    /// Give buildings and their same-owner neighbours the claimed level.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::StaleBuilding`] or [`GameError::MissingTile`] if
    /// the registry is out of date.
    pub fn recompute_building_levels(&mut self) -> GameResult<()> {
        territory::recompute_building_levels(&mut self.map, &self.buildings)
    }

    /// Recompute all claims, orphans, townhall upkeep and walls.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::StaleBuilding`] or [`GameError::MissingTile`] if
    /// the registry is out of date.
    pub fn refresh_territory(&mut self) -> GameResult<TerritoryStats> {
        territory::refresh_territory(&mut self.map, &self.buildings)
    }

    /// Upkeep of the units in a townhall's territory, computed now.
    ///
    /// `None` if `coord` does not hold a townhall.
    #[must_use]
    pub fn townhall_upkeep(&self, coord: Coord) -> Option<i32> {
        self.map
            .get(coord)
            .and_then(|t| t.entity())
            .filter(|e| e.is_townhall())
            .map(|_| territory::townhall_upkeep(&self.map, coord))
    }

    /// Drop players who no longer own any sand tile.
    ///
    /// The current player is tracked by id: if still active it stays
    /// current, otherwise the next surviving player in turn order becomes
    /// current. Returns the removed ids in turn order.
    pub fn recompute_active_players(&mut self) -> Vec<PlayerId> {
        let owners = self.map.owners();
        if self.players.iter().all(|p| owners.contains(&p.id)) {
            return Vec::new();
        }

        let old_current = self.current;
        let current_id = self.current_player().map(|p| p.id);

        let mut eliminated = Vec::new();
        let mut survivors = Vec::with_capacity(self.players.len());
        // First survivor at or after the old current slot, as an index into
        // `survivors`.
        let mut successor = None;
        for (index, player) in std::mem::take(&mut self.players).into_iter().enumerate() {
            if owners.contains(&player.id) {
                if successor.is_none() && index >= old_current {
                    successor = Some(survivors.len());
                }
                survivors.push(player);
            } else {
                eliminated.push(player.id);
            }
        }
        self.players = survivors;

        self.current = current_id
            .and_then(|id| self.players.iter().position(|p| p.id == id))
            .or(successor)
            .unwrap_or(0);

        for id in &eliminated {
            tracing::info!(player = id, "player eliminated");
        }
        eliminated
    }

    /// Settle the current player's economy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoActivePlayers`] if the roster is empty, or
    /// [`GameError::StaleBuilding`] or [`GameError::MissingTile`] if a
    /// townhall entry is out of date.
    pub fn settle_economy(&mut self) -> GameResult<SettlementReport> {
        let player = self
            .players
            .get(self.current)
            .ok_or(GameError::NoActivePlayers)?;
        settle_economy(&mut self.map, player, &self.config, &self.table)
    }

    /// Advance the game by one player turn.
    ///
    /// Refreshes territory, drops eliminated players, settles the economy
    /// of the player whose turn ends, refreshes territory again so the
    /// conversions are visible, and passes the turn on.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoActivePlayers`] if nobody is left to play, or
    /// [`GameError::StaleBuilding`] or [`GameError::MissingTile`] if the
    /// building registry is broken.
    pub fn next_turn(&mut self) -> GameResult<TurnReport> {
        self.refresh_territory()?;

        let ending = self.current_player().map(|p| p.id);
        let eliminated = self.recompute_active_players();
        if self.players.is_empty() {
            return Err(GameError::NoActivePlayers);
        }

        let still_active = ending.is_some_and(|id| self.player(id).is_some());
        let settlement = if still_active {
            let report = self.settle_economy()?;
            self.refresh_territory()?;
            self.current = (self.current + 1) % self.players.len();
            Some(report)
        } else {
            None
        };

        self.turn += 1;
        let next_player = self
            .current_player()
            .map(|p| p.id)
            .ok_or(GameError::NoActivePlayers)?;
        tracing::info!(turn = self.turn, next_player, "turn advanced");

        Ok(TurnReport {
            turn: self.turn,
            settlement,
            eliminated,
            next_player,
        })
    }

    /// Whether at most one player still owns sand.
    ///
    /// True for a map with no tiles and for a map where nobody owns
    /// anything.
    #[must_use]
    pub fn check_end(&self) -> bool {
        let mut seen = None;
        for (_, tile) in self.map.iter() {
            if !tile.is_sand() {
                continue;
            }
            let Some(owner) = tile.owner() else {
                continue;
            };
            match seen {
                None => seen = Some(owner),
                Some(first) if first != owner => return false,
                Some(_) => {}
            }
        }
        true
    }

    /// The last owner standing, once the game has ended.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.check_end() {
            return None;
        }
        self.map.owners().first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Entity, EntityKind, Tile};

    /// Three players on one sand row, each with a townhall and one spare
    /// tile, separated by water:
    ///
    /// `T1 S1 ~ T2 S2 ~ T3 S3`
    fn three_realms() -> Level {
        let mut row = Vec::new();
        for id in 1..=3u8 {
            let mut hall = Tile::sand(Some(id));
            hall.set_entity(Some(Entity::new(EntityKind::Townhall)));
            row.push(Some(hall));
            row.push(Some(Tile::sand(Some(id))));
            if id < 3 {
                row.push(Some(Tile::water()));
            }
        }
        let map = Map::new(vec![row]);
        let players = (1..=3u8)
            .map(|id| {
                let mut p = Player::new(id, format!("p{id}"));
                p.add_townhall(Coord::new(0, usize::from(id - 1) * 3));
                p
            })
            .collect();
        Level::new(map, players, GameConfig::default(), LevelTable::default()).unwrap()
    }

    /// Hand every tile of `from` to `to`.
    fn conquer(level: &mut Level, from: PlayerId, to: PlayerId) {
        for (_, tile) in level.map_mut().iter_mut() {
            if tile.owner() == Some(from) {
                tile.change_owner(to);
            }
        }
    }

    #[test]
    fn test_new_level_is_claimed() {
        let level = three_realms();
        assert_eq!(level.buildings().len(), 3);
        let spare = level.map().get(Coord::new(0, 1)).unwrap();
        assert!(!spare.is_orphan());
        assert_eq!(spare.level(), 1);
        assert_eq!(level.current_player().unwrap().id, 1);
    }

    #[test]
    fn test_next_turn_cycles_roster() {
        let mut level = three_realms();
        for expected in [2, 3, 1] {
            let report = level.next_turn().unwrap();
            assert_eq!(report.next_player, expected);
        }
        assert_eq!(level.current_index(), 0);
        assert_eq!(level.turn(), 3);
    }

    #[test]
    fn test_next_turn_settles_ending_player() {
        let mut level = three_realms();
        let report = level.next_turn().unwrap();
        let settlement = report.settlement.unwrap();
        assert_eq!(settlement.player, 1);
        // No units and no income: the treasury is untouched.
        assert_eq!(settlement.townhalls[0].money_after, 10);
    }

    #[test]
    fn test_elimination_before_current_keeps_current() {
        let mut level = three_realms();
        assert!(level.set_current_player(3));
        conquer(&mut level, 2, 1);

        let eliminated = level.recompute_active_players();
        assert_eq!(eliminated, vec![2]);
        let ids: Vec<_> = level.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(level.current_player().unwrap().id, 3);
    }

    #[test]
    fn test_elimination_of_current_moves_to_successor() {
        let mut level = three_realms();
        assert!(level.set_current_player(2));
        conquer(&mut level, 2, 3);

        level.recompute_active_players();
        assert_eq!(level.players().len(), 2);
        assert_eq!(level.current_player().unwrap().id, 3);
    }

    #[test]
    fn test_elimination_of_last_slot_wraps() {
        let mut level = three_realms();
        assert!(level.set_current_player(3));
        conquer(&mut level, 3, 1);

        level.recompute_active_players();
        assert_eq!(level.current_index(), 0);
        assert_eq!(level.current_player().unwrap().id, 1);
    }

    #[test]
    fn test_next_turn_skips_settlement_for_eliminated_player() {
        let mut level = three_realms();
        assert!(level.set_current_player(2));
        conquer(&mut level, 2, 1);

        let report = level.next_turn().unwrap();
        assert!(report.settlement.is_none());
        assert_eq!(report.eliminated, vec![2]);
        assert_eq!(report.next_player, 3);
    }

    #[test]
    fn test_next_turn_without_players_fails() {
        let mut level = three_realms();
        for (_, tile) in level.map_mut().iter_mut() {
            tile.clear_owner();
        }
        assert_eq!(level.next_turn().unwrap_err(), GameError::NoActivePlayers);
    }

    #[test]
    fn test_check_end() {
        let mut level = three_realms();
        assert!(!level.check_end());
        assert_eq!(level.winner(), None);

        conquer(&mut level, 2, 1);
        conquer(&mut level, 3, 1);
        assert!(level.check_end());
        assert_eq!(level.winner(), Some(1));
    }

    #[test]
    fn test_check_end_empty_and_neutral() {
        let empty =
            Level::new(Map::default(), Vec::new(), GameConfig::default(), LevelTable::default())
                .unwrap();
        assert!(empty.check_end());
        assert_eq!(empty.winner(), None);

        let neutral = Level::new(
            Map::filled(2, 2, &Tile::sand(None)).unwrap(),
            Vec::new(),
            GameConfig::default(),
            LevelTable::default(),
        )
        .unwrap();
        assert!(neutral.check_end());
    }

    #[test]
    fn test_townhall_upkeep_query() {
        let mut level = three_realms();
        level
            .map_mut()
            .get_mut(Coord::new(0, 1))
            .unwrap()
            .set_entity(Some(Entity::new(EntityKind::HumanUnit)));
        assert_eq!(level.townhall_upkeep(Coord::new(0, 0)), Some(2));
        assert_eq!(level.townhall_upkeep(Coord::new(0, 1)), None);
    }
}
