//! Compass Direction
//!
//! The four facings an agent can hold, in the fixed clockwise order that
//! rotation walks through.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Cardinal facing of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

/// Error returned when a facing token is not one of the four names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown facing '{token}', expected one of NORTH, EAST, SOUTH, WEST")]
pub struct ParseDirectionError {
    pub token: String,
}

impl Direction {
    /// All directions in rotation order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Direction after a quarter turn counter-clockwise
    pub fn left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// Direction after a quarter turn clockwise
    pub fn right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Unit displacement `(dx, dy)` of one step in this direction
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Canonical uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
        }
    }

    /// Single-letter marker used when drawing the grid
    pub fn initial(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

/// Facing as handed in by a caller: already typed, or a raw token that
/// failed to name a direction. Unknown tokens are carried through so the
/// state machine can reject the placement itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacingToken {
    Known(Direction),
    Unknown(String),
}

impl FacingToken {
    /// Resolve to a direction, or the parse error for an unknown token
    pub fn direction(&self) -> Result<Direction, ParseDirectionError> {
        match self {
            FacingToken::Known(direction) => Ok(*direction),
            FacingToken::Unknown(token) => Err(ParseDirectionError {
                token: token.clone(),
            }),
        }
    }
}

impl From<Direction> for FacingToken {
    fn from(direction: Direction) -> Self {
        FacingToken::Known(direction)
    }
}

impl From<&str> for FacingToken {
    fn from(token: &str) -> Self {
        token
            .parse::<Direction>()
            .map(FacingToken::Known)
            .unwrap_or_else(|_| FacingToken::Unknown(token.to_string()))
    }
}

impl From<String> for FacingToken {
    fn from(token: String) -> Self {
        FacingToken::from(token.as_str())
    }
}

impl std::fmt::Display for FacingToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingToken::Known(direction) => write!(f, "{}", direction),
            FacingToken::Unknown(token) => f.write_str(token),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDirectionError {
                token: s.to_string(),
            })
    }
}
