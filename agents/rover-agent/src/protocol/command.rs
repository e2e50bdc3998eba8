//! Text Command Grammar
//!
//! Parses one line of user input into an [`Instruction`]:
//!
//! ```text
//! PLACE <x>,<y>,<FACING>
//! MOVE | LEFT | RIGHT | REPORT | EXIT
//! ```
//!
//! Keywords are case-insensitive. Parsing only checks shape; whether a
//! placement is on the grid or names a real facing is left to the state
//! machine, so those come back as a `PLACE` command that the agent rejects.

use std::num::IntErrorKind;

use crate::agent::state::Command;

/// Valid command summary shown to users
pub const USAGE: &str = "PLACE X,Y,F | MOVE | LEFT | RIGHT | REPORT | EXIT";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Forward to the agent
    Agent(Command),
    /// End the session
    Exit,
}

/// Reasons a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("invalid PLACE format '{input}', use: PLACE X,Y,F (e.g., PLACE 0,0,NORTH)")]
    InvalidPlace { input: String },

    #[error("unknown command '{0}', valid: {usage}", usage = USAGE)]
    Unknown(String),
}

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines. The first whitespace-separated token
/// selects the command; `PLACE` takes exactly one argument token, the other
/// keywords ignore anything after them.
pub fn parse_line(line: &str) -> Result<Option<Instruction>, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(action) = parts.next() else {
        return Ok(None);
    };

    let invalid_place = || CommandError::InvalidPlace {
        input: line.trim().to_string(),
    };

    let instruction = match action.to_ascii_uppercase().as_str() {
        "PLACE" => {
            let args: Vec<&str> = parts.collect();
            let [arg] = args.as_slice() else {
                return Err(invalid_place());
            };
            Instruction::Agent(parse_place(arg).ok_or_else(invalid_place)?)
        }
        "MOVE" => Instruction::Agent(Command::Move),
        "LEFT" => Instruction::Agent(Command::Left),
        "RIGHT" => Instruction::Agent(Command::Right),
        "REPORT" => Instruction::Agent(Command::Report),
        "EXIT" => Instruction::Exit,
        _ => return Err(CommandError::Unknown(action.to_string())),
    };

    Ok(Some(instruction))
}

fn parse_place(arg: &str) -> Option<Command> {
    let fields: Vec<&str> = arg.split(',').collect();
    let [x, y, facing] = fields.as_slice() else {
        return None;
    };
    let x = parse_coordinate(x.trim())?;
    let y = parse_coordinate(y.trim())?;
    Some(Command::place(x, y, facing.trim()))
}

/// Parse an integer coordinate. Values beyond `i64` saturate, which keeps
/// them off the grid so the agent rejects the placement.
fn parse_coordinate(field: &str) -> Option<i64> {
    match field.parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
