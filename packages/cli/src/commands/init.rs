use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;

/// Write the default configuration file
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!(
        "{} Default configuration written to {}",
        "✓".green().bold(),
        path.display().to_string().cyan()
    );
    Ok(())
}
