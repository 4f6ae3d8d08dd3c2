//! Output formatting utilities for CLI.

use konkr::{LevelInfo, LevelSummary, TurnReport};
use serde::Serialize;

/// JSON-serializable level catalog entry.
#[derive(Debug, Serialize)]
pub(super) struct JsonLevelInfo {
    /// Display category.
    pub(super) category: String,
    /// Display name.
    pub(super) name: String,
    /// File path.
    pub(super) path: String,
}

impl JsonLevelInfo {
    /// Create from a [`LevelInfo`].
    pub(super) fn from_info(info: &LevelInfo) -> Self {
        Self {
            category: info.category.clone(),
            name: info.name.clone(),
            path: info.path.display().to_string(),
        }
    }
}

/// JSON-serializable result of the `play` command.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayResult {
    /// Player turns taken.
    pub(super) turns_played: u32,
    /// Every turn, in order.
    pub(super) reports: Vec<TurnReport>,
    /// Standing at the end.
    pub(super) summary: LevelSummary,
}

/// Format one turn as a block of text.
pub(super) fn format_turn(report: &TurnReport) -> String {
    let mut output = format!("Turn {}", report.turn);

    match &report.settlement {
        Some(settlement) => {
            output.push_str(&format!(": player {} settled", settlement.player));
            for hall in &settlement.townhalls {
                output.push_str(&format!(
                    "\n  townhall {}: {} tiles, +{} -{} => {} -> {}",
                    hall.townhall,
                    hall.territory,
                    hall.income,
                    hall.upkeep,
                    hall.money_before,
                    hall.money_after
                ));
                if hall.is_bankrupt() {
                    output.push_str(&format!(" [bankrupt, {} bandits]", hall.bandits.len()));
                }
            }
        }
        None => output.push_str(": no settlement"),
    }

    for id in &report.eliminated {
        output.push_str(&format!("\n  player {id} eliminated"));
    }
    output.push_str(&format!("\n  next: player {}\n", report.next_player));
    output
}
