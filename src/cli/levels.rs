//! Levels command implementation.

use super::output::JsonLevelInfo;
use super::{CliError, OutputFormat};
use konkr::discover_levels;
use std::path::Path;

/// Execute the levels command.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked.
pub(crate) fn execute(dir: &Path, format: OutputFormat) -> Result<(), CliError> {
    let levels = discover_levels(dir)?;

    match format {
        OutputFormat::Text => {
            if levels.is_empty() {
                println!("No levels found in {}", dir.display());
                return Ok(());
            }
            let mut category = None;
            for info in &levels {
                if category != Some(&info.category) {
                    println!("{}", info.category);
                    category = Some(&info.category);
                }
                println!("  {:<24} {}", info.name, info.path.display());
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = levels.iter().map(JsonLevelInfo::from_info).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}
