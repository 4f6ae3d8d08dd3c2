//! Show command implementation.

use super::{CliError, OutputFormat, load_rules};
use konkr::{LevelSummary, load_level, render_ascii, render_status};
use std::path::Path;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the rules or the level fail to load.
pub(crate) fn execute(
    level: &Path,
    config: Option<&Path>,
    sprites: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let (config, table) = load_rules(config, sprites)?;
    let level = load_level(level, config, table)?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_ascii(&level));
            println!();
            print!("{}", render_status(&level));
        }
        OutputFormat::Json => {
            let summary = LevelSummary::from_level(&level);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
