//! Map cells.

use serde::{Deserialize, Serialize};

use crate::game::{Coord, Entity, HexDirection, PlayerId};

/// Level of a decorative tile that never takes part in claiming.
pub const LEVEL_UNSET: i8 = -1;
/// Level of a sand tile not defended by any building.
pub const LEVEL_UNCLAIMED: i8 = 0;
/// Level of a sand tile inside a building's territory.
pub const LEVEL_CLAIMED: i8 = 1;

/// Terrain of a tile. Only sand is played on; the rest is decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    /// Sea.
    Water = 0,
    /// Woods.
    Forest = 1,
    /// Playable land.
    Sand = 2,
}

impl TileType {
    /// Water and forest never carry an owner.
    #[must_use]
    pub const fn is_decoration(self) -> bool {
        matches!(self, TileType::Water | TileType::Forest)
    }

    /// Terrain for a map character, if it names one on its own.
    #[must_use]
    pub const fn from_ascii(c: char) -> Option<Self> {
        match c {
            '~' => Some(TileType::Water),
            '#' => Some(TileType::Forest),
            'S' | 'T' | 'C' | 'V' | 'B' => Some(TileType::Sand),
            _ => None,
        }
    }
}

/// A single hexagon of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    tile_type: TileType,
    owner: Option<PlayerId>,
    entity: Option<Entity>,
    level: i8,
    orphan: bool,
    walls: [bool; 6],
    grid_position: Coord,
}

impl Tile {
    /// Create a tile with the given terrain and no owner.
    #[must_use]
    pub const fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            owner: None,
            entity: None,
            level: if tile_type.is_decoration() {
                LEVEL_UNSET
            } else {
                LEVEL_UNCLAIMED
            },
            orphan: true,
            walls: [false; 6],
            grid_position: Coord::new(0, 0),
        }
    }

    /// Create a water tile.
    #[must_use]
    pub const fn water() -> Self {
        Self::new(TileType::Water)
    }

    /// Create a forest tile.
    #[must_use]
    pub const fn forest() -> Self {
        Self::new(TileType::Forest)
    }

    /// Create a sand tile, optionally owned.
    #[must_use]
    pub const fn sand(owner: Option<PlayerId>) -> Self {
        let mut tile = Self::new(TileType::Sand);
        tile.owner = owner;
        tile
    }

    /// Terrain type.
    #[must_use]
    pub const fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Whether this tile is water or forest.
    #[must_use]
    pub const fn is_decoration(&self) -> bool {
        self.tile_type.is_decoration()
    }

    /// Whether this tile is sand.
    #[must_use]
    pub fn is_sand(&self) -> bool {
        self.tile_type == TileType::Sand
    }

    /// Owning player.
    #[must_use]
    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Give the tile to a player. Ignored on decorative tiles.
    pub fn change_owner(&mut self, player: PlayerId) {
        if !self.is_decoration() {
            self.owner = Some(player);
        }
    }

    /// Make the tile neutral.
    pub fn clear_owner(&mut self) {
        self.owner = None;
    }

    /// The occupant, if any.
    #[must_use]
    pub const fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    /// Mutable access to the occupant.
    #[must_use]
    pub fn entity_mut(&mut self) -> Option<&mut Entity> {
        self.entity.as_mut()
    }

    /// Replace the occupant, returning the previous one.
    ///
    /// The new entity's position is synced to this tile.
    pub fn set_entity(&mut self, entity: Option<Entity>) -> Option<Entity> {
        let mut entity = entity;
        if let Some(e) = entity.as_mut() {
            e.set_grid_position(self.grid_position);
        }
        std::mem::replace(&mut self.entity, entity)
    }

    /// Whether the occupant is a townhall or castle.
    #[must_use]
    pub fn has_building(&self) -> bool {
        self.entity.as_ref().is_some_and(Entity::is_building)
    }

    /// Fortification level (see the `LEVEL_*` constants).
    #[must_use]
    pub const fn level(&self) -> i8 {
        self.level
    }

    /// Set the fortification level.
    pub fn set_level(&mut self, level: i8) {
        self.level = level;
    }

    /// Whether the tile was not reached by any claim this pass.
    #[must_use]
    pub const fn is_orphan(&self) -> bool {
        self.orphan
    }

    /// Mark the tile as undefended.
    pub fn orphan(&mut self) {
        self.orphan = true;
    }

    /// Mark the tile as claimed.
    pub fn claim(&mut self) {
        self.orphan = false;
    }

    /// Whether the tile is owned and claimed.
    #[must_use]
    pub fn is_claimed(&self) -> bool {
        self.owner.is_some() && !self.orphan && self.level == LEVEL_CLAIMED
    }

    /// Raise a wall on one edge.
    pub fn add_wall(&mut self, edge: HexDirection) {
        self.walls[edge.index()] = true;
    }

    /// Remove the wall on one edge.
    pub fn remove_wall(&mut self, edge: HexDirection) {
        self.walls[edge.index()] = false;
    }

    /// Whether there is a wall on the edge.
    #[must_use]
    pub const fn has_wall(&self, edge: HexDirection) -> bool {
        self.walls[edge as usize]
    }

    /// Whether any edge has a wall.
    #[must_use]
    pub fn has_any_walls(&self) -> bool {
        self.walls.iter().any(|&w| w)
    }

    /// Remove every wall.
    pub fn clear_walls(&mut self) {
        self.walls = [false; 6];
    }

    /// Position on the grid.
    #[must_use]
    pub const fn grid_position(&self) -> Coord {
        self.grid_position
    }

    /// Place the tile on the grid. Also moves the occupant.
    pub fn set_grid_position(&mut self, grid_position: Coord) {
        self.grid_position = grid_position;
        if let Some(e) = self.entity.as_mut() {
            e.set_grid_position(grid_position);
        }
    }
}
