//! Console Session
//!
//! Reads command lines, drives a [`Controller`] and writes user-facing
//! responses. Used both for the interactive prompt and for script files.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use rover_agent::protocol::command::USAGE;
use rover_agent::{parse_line, AgentState, Command, CommandError, Controller, Event, Instruction};

use crate::config::Config;
use crate::render;

/// Printed when an interactive session ends without `EXIT`
pub const GOODBYE: &str = "Goodbye!";

const PLACE_HELP: &str = "Invalid PLACE format. Use: PLACE X,Y,F (e.g., PLACE 0,0,NORTH)";

/// How a session presents itself
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Prompt to print before each line; `None` for non-interactive input
    pub prompt: Option<String>,
    pub show_grid: bool,
    pub color: bool,
    /// Print every agent event, including silent no-ops
    pub echo_events: bool,
}

impl SessionOptions {
    pub fn interactive(config: &Config, verbose: bool) -> Self {
        Self {
            prompt: Some(config.prompt.clone()),
            show_grid: config.display.show_grid,
            color: config.display.color,
            echo_events: verbose,
        }
    }

    pub fn script(config: &Config, verbose: bool) -> Self {
        Self {
            prompt: None,
            ..Self::interactive(config, verbose)
        }
    }
}

/// A line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    pub line: usize,
    pub error: CommandError,
}

/// What happened over a whole session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub lines: usize,
    pub exited: bool,
    pub failures: Vec<LineFailure>,
    pub state: AgentState,
}

enum Step {
    Continue,
    Exit,
    Failed(CommandError),
}

/// One front-end session owning its own agent
pub struct Session<C: Controller, W: Write> {
    controller: C,
    out: W,
    options: SessionOptions,
}

impl<C: Controller, W: Write> Session<C, W> {
    pub fn new(controller: C, out: W, options: SessionOptions) -> Self {
        Self {
            controller,
            out,
            options,
        }
    }

    /// Process input until `EXIT` or end of input
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<SessionSummary> {
        let interactive = self.options.prompt.is_some();
        if interactive {
            writeln!(self.out, "Rover CLI - type commands ({})", USAGE)?;
        }

        let mut summary = SessionSummary {
            lines: 0,
            exited: false,
            failures: Vec::new(),
            state: self.controller.state(),
        };
        let mut buf = Vec::new();

        loop {
            self.prompt()?;
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .context("Failed to read input")?;
            if read == 0 {
                if interactive {
                    writeln!(self.out, "\n{}", GOODBYE)?;
                }
                break;
            }
            summary.lines += 1;

            // undecodable bytes become U+FFFD and fail to parse like any other typo
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

            match self.handle_line(line)? {
                Step::Continue => {}
                Step::Exit => {
                    summary.exited = true;
                    break;
                }
                Step::Failed(error) => {
                    warn!(line = summary.lines, error = %error, "Unparseable command");
                    summary.failures.push(LineFailure {
                        line: summary.lines,
                        error,
                    });
                }
            }
        }

        self.out.flush()?;
        summary.state = self.controller.state();
        debug!(lines = summary.lines, state = %summary.state, "Session ended");
        Ok(summary)
    }

    fn prompt(&mut self) -> Result<()> {
        if let Some(prompt) = &self.options.prompt {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Step> {
        let command = match parse_line(line) {
            Ok(None) => return Ok(Step::Continue),
            Ok(Some(Instruction::Exit)) => {
                writeln!(self.out, "Shutting down rover control...")?;
                return Ok(Step::Exit);
            }
            Ok(Some(Instruction::Agent(command))) => command,
            Err(error) => {
                match &error {
                    CommandError::InvalidPlace { .. } => {
                        writeln!(self.out, "{}", PLACE_HELP)?;
                        self.draw()?;
                    }
                    CommandError::Unknown(_) => {
                        writeln!(self.out, "Unknown command. Valid: {}", USAGE)?;
                    }
                }
                return Ok(Step::Failed(error));
            }
        };

        let event = self.controller.apply(command);
        match &event {
            Event::Placed(p) => writeln!(self.out, "Placed at {}", p)?,
            rejected if rejected.is_rejection() => {
                writeln!(self.out, "Invalid placement – ignored.")?
            }
            Event::Reported(p) => writeln!(self.out, "Output: {}", p)?,
            Event::Ignored(Command::Report) => writeln!(self.out, "Rover not placed yet.")?,
            other if self.options.echo_events => writeln!(self.out, "{}", other)?,
            _ => {}
        }
        self.draw()?;

        Ok(Step::Continue)
    }

    fn draw(&mut self) -> Result<()> {
        if self.options.show_grid {
            let grid = render::render_grid(&self.controller.state(), self.options.color);
            write!(self.out, "{}", grid)?;
        }
        Ok(())
    }
}
