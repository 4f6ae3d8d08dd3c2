//! Territory: which owned sand tiles are defended by a building.
//!
//! A building defends the connected component of its owner's sand tiles
//! that contains it. Water, forest, neutral tiles and tiles of other
//! players break connectivity. Owned tiles no building reaches are
//! orphans.

use std::collections::{HashSet, VecDeque};

use crate::error::{GameError, GameResult};
use crate::game::tile::{LEVEL_CLAIMED, LEVEL_UNCLAIMED, LEVEL_UNSET};
use crate::game::{Coord, EntityKind, HexDirection, Map, PlayerId};

/// Whether `coord` holds a sand tile owned by `owner`.
fn is_owned_sand(map: &Map, coord: Coord, owner: PlayerId) -> bool {
    map.get(coord)
        .is_some_and(|tile| tile.is_sand() && tile.owner() == Some(owner))
}

/// Connected same-owner sand tiles reachable from `start`, in BFS order.
///
/// Empty if `start` is missing, decorative or unowned.
#[must_use]
pub fn territory(map: &Map, start: Coord) -> Vec<Coord> {
    let Some(owner) = map.get(start).filter(|t| t.is_sand()).and_then(|t| t.owner()) else {
        return Vec::new();
    };

    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut result = Vec::new();

    while let Some(coord) = queue.pop_front() {
        result.push(coord);
        for next in map.neighbors(coord) {
            if is_owned_sand(map, next, owner) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    result
}

/// Mark the territory reachable from `start` as claimed.
///
/// Every visited tile gets `orphan = false` and the claimed level. Returns
/// the claimed coordinates; empty if `start` has no owner.
pub fn claim_connected_territory(map: &mut Map, start: Coord) -> Vec<Coord> {
    let claimed = territory(map, start);
    for &coord in &claimed {
        if let Some(tile) = map.get_mut(coord) {
            tile.claim();
            tile.set_level(LEVEL_CLAIMED);
        }
    }
    claimed
}

/// Give every building and its same-owner sand neighbours the claimed level.
///
/// # Errors
///
/// Returns [`GameError::MissingTile`] if a registry entry is off the map and
/// [`GameError::StaleBuilding`] if it does not hold a building.
pub fn recompute_building_levels(map: &mut Map, buildings: &[Coord]) -> GameResult<()> {
    for &coord in buildings {
        let tile = map.get_mut(coord).ok_or(GameError::MissingTile(coord))?;
        if !tile.has_building() {
            return Err(GameError::StaleBuilding(coord));
        }
        tile.set_level(LEVEL_CLAIMED);

        let Some(owner) = tile.owner() else {
            continue;
        };
        let defended: Vec<Coord> = map
            .neighbors(coord)
            .filter(|&n| is_owned_sand(map, n, owner))
            .collect();
        for n in defended {
            if let Some(tile) = map.get_mut(n) {
                tile.set_level(LEVEL_CLAIMED);
            }
        }
    }
    Ok(())
}

/// Total upkeep of the human units inside the territory of `townhall`.
#[must_use]
pub fn townhall_upkeep(map: &Map, townhall: Coord) -> i32 {
    territory(map, townhall)
        .into_iter()
        .filter_map(|coord| map.get(coord).and_then(|t| t.entity()))
        .filter(|e| e.is_human_unit())
        .map(|e| e.upkeep_cost())
        .fold(0i32, i32::saturating_add)
}

/// Summary of a territory refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerritoryStats {
    /// Owned sand tiles reached by a building.
    pub claimed: usize,
    /// Owned sand tiles no building reaches.
    pub orphaned: usize,
}

/// Recompute claims, orphans, townhall upkeep and walls from scratch.
///
/// # Errors
///
/// Returns [`GameError::MissingTile`] if a registry entry is off the map and
/// [`GameError::StaleBuilding`] if it does not hold a building.
pub fn refresh_territory(map: &mut Map, buildings: &[Coord]) -> GameResult<TerritoryStats> {
    for (_, tile) in map.iter_mut() {
        tile.orphan();
        tile.clear_walls();
        tile.set_level(if tile.is_decoration() {
            LEVEL_UNSET
        } else {
            LEVEL_UNCLAIMED
        });
    }

    recompute_building_levels(map, buildings)?;
    for &coord in buildings {
        claim_connected_territory(map, coord);
    }

    for &coord in buildings {
        let upkeep = townhall_upkeep(map, coord);
        if let Some(hall) = map
            .get_mut(coord)
            .and_then(|t| t.entity_mut())
            .filter(|e| e.kind() == EntityKind::Townhall)
        {
            hall.set_upkeep_cost(upkeep);
        }
    }

    raise_walls(map);

    let mut stats = TerritoryStats::default();
    for (_, tile) in map.iter() {
        if tile.is_sand() && tile.owner().is_some() {
            if tile.is_orphan() {
                stats.orphaned += 1;
            } else {
                stats.claimed += 1;
            }
        }
    }
    tracing::debug!(claimed = stats.claimed, orphaned = stats.orphaned, "territory refreshed");
    Ok(stats)
}

/// Put a wall on every edge where a claimed tile meets anything other than
/// a claimed tile of the same owner.
fn raise_walls(map: &mut Map) {
    let mut walls: Vec<(Coord, HexDirection)> = Vec::new();

    for (coord, tile) in map.iter() {
        let Some(owner) = tile.owner().filter(|_| tile.is_sand() && !tile.is_orphan()) else {
            continue;
        };
        for direction in HexDirection::ALL {
            let same_realm = coord
                .neighbor(direction)
                .and_then(|n| map.get(n))
                .is_some_and(|n| n.is_sand() && n.owner() == Some(owner) && !n.is_orphan());
            if !same_realm {
                walls.push((coord, direction));
            }
        }
    }

    for (coord, direction) in walls {
        if let Some(tile) = map.get_mut(coord) {
            tile.add_wall(direction);
        }
    }
}
