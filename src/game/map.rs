//! The tile arena.
//!
//! Rows may have different lengths and may contain holes where the level
//! file had a malformed cell. Every lookup goes through [`Coord`], so an
//! out-of-range neighbour simply yields `None`.

use std::collections::BTreeSet;

use crate::game::{Coord, PlayerId, Tile};

/// The game map: a jagged grid of optional tiles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map {
    rows: Vec<Vec<Option<Tile>>>,
}

impl Map {
    /// Build a map from parsed rows, stamping every tile with its position.
    #[must_use]
    pub fn new(rows: Vec<Vec<Option<Tile>>>) -> Self {
        let mut map = Self { rows };
        for (coord, tile) in map.iter_mut() {
            tile.set_grid_position(coord);
        }
        map
    }

    /// Create a rectangular map filled with copies of `tile`.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn filled(height: usize, width: usize, tile: &Tile) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let rows = (0..height)
            .map(|_| (0..width).map(|_| Some(*tile)).collect())
            .collect();
        Some(Self::new(rows))
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of one row (0 if the row does not exist).
    #[must_use]
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Raw rows, holes included, for renderers.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<Tile>>] {
        &self.rows
    }

    /// Number of actual tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.rows.iter().flatten().flatten().count()
    }

    /// Whether the map holds no tile at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    /// Check if a coordinate is within the grid (hole or not).
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.col < self.row_len(coord.row)
    }

    /// Get a reference to the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.rows.get(coord.row)?.get(coord.col)?.as_ref()
    }

    /// Get a mutable reference to the tile at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.rows.get_mut(coord.row)?.get_mut(coord.col)?.as_mut()
    }

    /// Set the tile at the given coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, tile: Tile) -> bool {
        let Some(slot) = self
            .rows
            .get_mut(coord.row)
            .and_then(|row| row.get_mut(coord.col))
        else {
            return false;
        };
        let mut tile = tile;
        tile.set_grid_position(coord);
        *slot = Some(tile);
        true
    }

    /// Iterate over all coordinates and tiles, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, tile)| tile.as_ref().map(|t| (Coord::new(r, c), t)))
        })
    }

    /// Iterate over all coordinates and mutable tiles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coord, &mut Tile)> {
        self.rows.iter_mut().enumerate().flat_map(|(r, row)| {
            row.iter_mut()
                .enumerate()
                .filter_map(move |(c, tile)| tile.as_mut().map(|t| (Coord::new(r, c), t)))
        })
    }

    /// Neighbouring coordinates that hold a tile.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let (adj, count) = coord.neighbors();
        adj.into_iter()
            .take(count as usize)
            .filter(move |c| self.get(*c).is_some())
    }

    /// Get all tiles owned by a specific player.
    pub fn tiles_owned_by(&self, player: PlayerId) -> impl Iterator<Item = (Coord, &Tile)> {
        self.iter().filter(move |(_, tile)| tile.owner() == Some(player))
    }

    /// Count tiles owned by a player.
    #[must_use]
    pub fn count_territory(&self, player: PlayerId) -> usize {
        self.tiles_owned_by(player).count()
    }

    /// Every distinct owner of a sand tile, ascending.
    #[must_use]
    pub fn owners(&self) -> BTreeSet<PlayerId> {
        self.iter()
            .filter(|(_, tile)| tile.is_sand())
            .filter_map(|(_, tile)| tile.owner())
            .collect()
    }

    /// Coordinates of every tile holding a townhall or castle.
    #[must_use]
    pub fn building_coords(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, tile)| tile.has_building())
            .map(|(coord, _)| coord)
            .collect()
    }
}
