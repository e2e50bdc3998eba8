use anyhow::{Context, Result};
use rover_agent::Rover;
use std::io;
use tracing::info;

use crate::config::Config;
use crate::session::{Session, SessionOptions, GOODBYE};

/// Interactive session on stdin
pub fn run(config: &Config, verbose: bool) -> Result<()> {
    // stdout stays unlocked between writes so the handler can print
    ctrlc::set_handler(|| {
        println!("\n{}", GOODBYE);
        std::process::exit(0);
    })
    .context("Failed to install Ctrl-C handler")?;

    let stdin = io::stdin();
    let options = SessionOptions::interactive(config, verbose);
    let mut session = Session::new(Rover::new(), io::stdout(), options);
    let summary = session.run(stdin.lock())?;

    info!(
        lines = summary.lines,
        exited = summary.exited,
        failures = summary.failures.len(),
        placed = summary.state.is_placed(),
        state = %summary.state,
        "Interactive session finished"
    );
    Ok(())
}
