//! Konkr CLI - inspect, validate and simulate Konkr levels.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Konkr - hex-grid territory and economy engine
#[derive(Parser, Debug)]
#[command(name = "konkr")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the levels found under a directory
    Levels {
        /// Levels directory (category subdirectories of .level files)
        #[arg(default_value = "levels")]
        dir: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Print a level's map and standing
    Show {
        /// Level file
        #[arg(required = true)]
        level: PathBuf,

        /// Game rules (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Entity sprite table (JSON)
        #[arg(long)]
        sprites: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Advance a level turn by turn until one realm remains
    Play {
        /// Level file
        #[arg(required = true)]
        level: PathBuf,

        /// Maximum player turns (default: 100)
        #[arg(short, long, default_value = "100")]
        turns: u32,

        /// Game rules (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Entity sprite table (JSON)
        #[arg(long)]
        sprites: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress turn-by-turn output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check that a level file loads into a consistent state
    Validate {
        /// Level file
        #[arg(required = true)]
        level: PathBuf,

        /// Game rules (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("konkr=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command {
        Commands::Levels { dir, format } => cli::levels::execute(&dir, format),

        Commands::Show {
            level,
            config,
            sprites,
            format,
        } => cli::show::execute(&level, config.as_deref(), sprites.as_deref(), format),

        Commands::Play {
            level,
            turns,
            config,
            sprites,
            format,
            quiet,
        } => cli::play::execute(
            &level,
            turns,
            config.as_deref(),
            sprites.as_deref(),
            format,
            quiet,
        ),

        Commands::Validate { level, config } => cli::validate::execute(&level, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
