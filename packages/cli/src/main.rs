//! Rover CLI Entry Point
//!
//! Drives a single grid agent from an interactive prompt or a script file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

mod commands;
mod config;
mod logging;
mod render;
mod session;

use config::Config;

#[derive(Parser)]
#[command(name = "rover", about = "Rover CLI - Drive an agent around a 5x5 grid")]
#[command(version, propagate_version = true)]
struct Cli {
    /// Path to configuration file (default: ~/.rover/config.toml)
    #[arg(short, long, global = true, env = "ROVER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging and echo every agent event
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable terminal colours
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Repl,

    /// Execute commands from a script file, one per line
    Run {
        /// Script file
        script: PathBuf,

        /// Print only the final agent state as JSON
        #[arg(long)]
        json: bool,

        /// Don't draw the grid after each command
        #[arg(long)]
        no_grid: bool,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Init { force } => commands::init::run(&config_path, force),
        Commands::Repl => {
            let config = prepare(&config_path, cli.no_color, cli.verbose)?;
            commands::repl::run(&config, cli.verbose)
        }
        Commands::Run {
            script,
            json,
            no_grid,
        } => {
            let config = prepare(&config_path, cli.no_color, cli.verbose)?;
            commands::run::run(&config, &script, json, no_grid, cli.verbose)
        }
    }
}

/// Load configuration and install logging
fn prepare(config_path: &Path, no_color: bool, verbose: bool) -> Result<Config> {
    let mut config = Config::load_or_default(config_path)?;
    if no_color {
        config.display.color = false;
    }

    logging::init(&config.logging, verbose)?;
    info!(path = %config_path.display(), "Configuration loaded");
    Ok(config)
}
