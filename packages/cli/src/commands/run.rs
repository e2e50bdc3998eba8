use anyhow::{Context, Result};
use colored::Colorize;
use rover_agent::Rover;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::session::{Session, SessionOptions, SessionSummary};

/// Execute a script file, one command per line
pub fn run(config: &Config, script: &Path, json: bool, no_grid: bool, verbose: bool) -> Result<()> {
    let file = File::open(script)
        .with_context(|| format!("Failed to open script: {}", script.display()))?;
    info!(script = %script.display(), "Running script");

    let mut options = SessionOptions::script(config, verbose);
    options.show_grid = options.show_grid && !no_grid && !json;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = if json {
        // only the final state goes to stdout
        Session::new(Rover::new(), io::sink(), options).run(BufReader::new(file))?
    } else {
        Session::new(Rover::new(), &mut out, options).run(BufReader::new(file))?
    };

    if json {
        let state = serde_json::to_string_pretty(&summary.state)
            .context("Failed to serialize agent state")?;
        writeln!(out, "{}", state)?;
        report_failures(&mut io::stderr(), &summary, config.display.color)?;
    } else {
        report_failures(&mut out, &summary, config.display.color)?;
    }

    info!(
        lines = summary.lines,
        failures = summary.failures.len(),
        placed = summary.state.is_placed(),
        state = %summary.state,
        "Script finished"
    );
    Ok(())
}

fn report_failures<W: Write>(out: &mut W, summary: &SessionSummary, color: bool) -> Result<()> {
    if summary.failures.is_empty() {
        return Ok(());
    }

    let heading = format!("{} line(s) could not be parsed:", summary.failures.len());
    if color {
        writeln!(out, "{}", heading.yellow())?;
    } else {
        writeln!(out, "{}", heading)?;
    }
    for failure in &summary.failures {
        writeln!(out, "  line {}: {}", failure.line, failure.error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LineFailure;
    use rover_agent::{AgentState, CommandError};

    #[test]
    fn test_report_failures_lists_lines() {
        let summary = SessionSummary {
            lines: 4,
            exited: false,
            failures: vec![LineFailure {
                line: 3,
                error: CommandError::Unknown("JUMP".to_string()),
            }],
            state: AgentState::Unplaced,
        };

        let mut out = Vec::new();
        report_failures(&mut out, &summary, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1 line(s) could not be parsed:\n"));
        assert!(text.contains("  line 3: unknown command 'JUMP'"));
    }

    #[test]
    fn test_no_output_without_failures() {
        let summary = SessionSummary {
            lines: 1,
            exited: true,
            failures: Vec::new(),
            state: AgentState::Unplaced,
        };

        let mut out = Vec::new();
        report_failures(&mut out, &summary, false).unwrap();
        assert!(out.is_empty());
    }
}
