//! Rover Agent Library
//!
//! This crate provides the core of the Rover simulator: an agent confined to
//! a 5x5 grid, the pure state machine that moves it, the events it emits and
//! the text command protocol front ends parse user input with.

pub mod agent;
pub mod protocol;

// Re-exports for convenience
pub use agent::direction::{Direction, FacingToken, ParseDirectionError};
pub use agent::events::{Event, EventSink, TracingSink};
pub use agent::rover::{Controller, Rover};
pub use agent::state::{transition, AgentState, Command, PlaceError, Placement, Turn, GRID_SIZE};
pub use protocol::command::{parse_line, CommandError, Instruction};
