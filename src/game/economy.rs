//! Economy: townhall income, upkeep and bankruptcy.
//!
//! # Settlement
//!
//! Each townhall of the settling player earns `income_per_tile` for every
//! tile of its territory and pays the upkeep of every human unit in it:
//!
//! ```text
//! net = income_per_tile × |territory| − Σ unit upkeep
//! ```
//!
//! A townhall whose treasury ends below zero goes bankrupt: every human
//! unit in its territory is replaced by a bandit.

use serde::Serialize;

use crate::config::{BankruptcyOwnership, GameConfig};
use crate::error::{GameError, GameResult};
use crate::game::territory::territory;
use crate::game::{Coord, Entity, EntityKind, LevelTable, Map, Player, PlayerId};

/// Outcome of settling one townhall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TownhallSettlement {
    /// Tile holding the townhall.
    pub townhall: Coord,
    /// Territory size the income was computed from.
    pub territory: usize,
    /// Money earned from territory.
    pub income: i32,
    /// Upkeep paid for units.
    pub upkeep: i32,
    /// Treasury before settlement.
    pub money_before: i32,
    /// Treasury after settlement.
    pub money_after: i32,
    /// Tiles whose unit turned bandit.
    pub bandits: Vec<Coord>,
}

impl TownhallSettlement {
    /// Whether this townhall went bankrupt.
    #[must_use]
    pub fn is_bankrupt(&self) -> bool {
        self.money_after < 0
    }
}

/// Outcome of settling a player's economy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementReport {
    /// The player that was settled.
    pub player: PlayerId,
    /// One entry per townhall, in registration order.
    pub townhalls: Vec<TownhallSettlement>,
}

impl SettlementReport {
    /// Total number of units converted to bandits.
    #[must_use]
    pub fn bandit_count(&self) -> usize {
        self.townhalls.iter().map(|t| t.bandits.len()).sum()
    }
}

/// Settle every townhall of `player`.
///
/// # Errors
///
/// Returns [`GameError::MissingTile`] if one of the player's townhall
/// entries is off the map, or [`GameError::StaleBuilding`] if it no longer
/// holds a townhall.
pub fn settle_economy(
    map: &mut Map,
    player: &Player,
    config: &GameConfig,
    table: &LevelTable,
) -> GameResult<SettlementReport> {
    let mut report = SettlementReport {
        player: player.id,
        townhalls: Vec::with_capacity(player.townhalls.len()),
    };

    for &coord in &player.townhalls {
        report.townhalls.push(settle_townhall(map, coord, config, table)?);
    }

    Ok(report)
}

/// Settle a single townhall and convert its units if it goes bankrupt.
fn settle_townhall(
    map: &mut Map,
    coord: Coord,
    config: &GameConfig,
    table: &LevelTable,
) -> GameResult<TownhallSettlement> {
    let money_before = map
        .get(coord)
        .ok_or(GameError::MissingTile(coord))?
        .entity()
        .filter(|e| e.is_townhall())
        .and_then(Entity::money)
        .ok_or(GameError::StaleBuilding(coord))?;

    let realm = territory(map, coord);
    let upkeep: i32 = realm
        .iter()
        .filter_map(|&c| map.get(c).and_then(|t| t.entity()))
        .filter(|e| e.is_human_unit())
        .map(Entity::upkeep_cost)
        .fold(0i32, i32::saturating_add);
    let territory_size = i32::try_from(realm.len()).unwrap_or(i32::MAX);
    let income = config.income_per_tile.saturating_mul(territory_size);
    let money_after = money_before.saturating_add(income).saturating_sub(upkeep);

    if let Some(hall) = map.get_mut(coord).and_then(|t| t.entity_mut()) {
        hall.set_upkeep_cost(upkeep);
        hall.set_money(money_after, table, config.townhall_level_step);
    }

    tracing::debug!(
        townhall = %coord,
        income,
        upkeep,
        money_before,
        money_after,
        "townhall settled"
    );

    let bandits = if money_after < 0 {
        let converted = convert_to_bandits(map, &realm, config);
        tracing::info!(
            townhall = %coord,
            money = money_after,
            bandits = converted.len(),
            "townhall went bankrupt"
        );
        converted
    } else {
        Vec::new()
    };

    Ok(TownhallSettlement {
        townhall: coord,
        territory: realm.len(),
        income,
        upkeep,
        money_before,
        money_after,
        bandits,
    })
}

/// Replace every human unit on `tiles` with a fresh bandit.
///
/// Tile position and terrain are untouched; ownership follows
/// `config.bankruptcy_owner`.
pub fn convert_to_bandits(map: &mut Map, tiles: &[Coord], config: &GameConfig) -> Vec<Coord> {
    let mut converted = Vec::new();

    for &coord in tiles {
        let Some(tile) = map.get_mut(coord) else {
            continue;
        };
        if !tile.entity().is_some_and(Entity::is_human_unit) {
            continue;
        }
        tile.set_entity(Some(Entity::with_config(EntityKind::Bandit, config)));
        if config.bankruptcy_owner == BankruptcyOwnership::Clear {
            tile.clear_owner();
        }
        converted.push(coord);
    }

    converted
}
