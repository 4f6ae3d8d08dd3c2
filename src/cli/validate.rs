//! Level validation command implementation.

use super::{CliError, load_rules};
use konkr::game::check_invariants;
use konkr::load_level;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the level cannot be loaded or is inconsistent.
pub(crate) fn execute(level: &Path, config: Option<&Path>) -> Result<(), CliError> {
    let (config, table) = load_rules(config, None)?;

    println!("Validating: {}", level.display());
    println!();

    let level = match load_level(level, config, table) {
        Ok(level) => {
            print_check("Level parses", true);
            level
        }
        Err(e) => {
            print_check("Level parses", false);
            return Err(e.into());
        }
    };

    let has_players = !level.players().is_empty();
    print_check("At least one player", has_players);

    let homeless: Vec<_> = level
        .players()
        .iter()
        .filter(|p| level.map().count_territory(p.id) == 0)
        .map(|p| p.id)
        .collect();
    print_check("Every player owns territory", homeless.is_empty());

    let violations = check_invariants(&level);
    print_check("State invariants", violations.is_empty());
    for violation in &violations {
        println!("      {}", violation.message);
    }

    println!();
    println!("Summary:");
    println!("  Rows:      {}", level.map().height());
    println!("  Tiles:     {}", level.map().tile_count());
    println!("  Players:   {}", level.players().len());
    println!("  Buildings: {}", level.buildings().len());
    println!();

    if !has_players {
        return Err(CliError::new("Level has no townhall, nobody can play"));
    }
    if !homeless.is_empty() {
        return Err(CliError::new(format!(
            "Players without territory: {homeless:?}"
        )));
    }
    if !violations.is_empty() {
        return Err(CliError::new(format!(
            "{} invariant violation(s)",
            violations.len()
        )));
    }

    println!("Validation successful!");
    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
