//! Play command implementation.

use super::output::{JsonPlayResult, format_turn};
use super::{CliError, OutputFormat, load_rules};
use konkr::{LevelSummary, load_level, render_ascii, render_status};
use std::path::Path;

/// Execute the play command.
///
/// Turns are advanced until one realm remains or `turns` player turns
/// have been taken.
///
/// # Errors
///
/// Returns an error if loading fails or the simulation hits a broken state.
pub(crate) fn execute(
    level: &Path,
    turns: u32,
    config: Option<&Path>,
    sprites: Option<&Path>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let (config, table) = load_rules(config, sprites)?;
    let mut level = load_level(level, config, table)?;

    let text = format == OutputFormat::Text;
    if text && !quiet {
        let names: Vec<_> = level
            .players()
            .iter()
            .map(|p| format!("{} ({})", p.name, p.id))
            .collect();
        println!("Players: {}", names.join(", "));
        println!();
    }

    let mut reports = Vec::new();
    while reports.len() < turns as usize && !level.check_end() {
        let report = level.next_turn()?;
        if text && !quiet {
            print!("{}", format_turn(&report));
        }
        reports.push(report);
    }

    match format {
        OutputFormat::Text => {
            if !quiet {
                println!();
            }
            print!("{}", render_ascii(&level));
            println!();
            print!("{}", render_status(&level));
        }
        OutputFormat::Json => {
            let result = JsonPlayResult {
                turns_played: level.turn(),
                reports,
                summary: LevelSummary::from_level(&level),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
