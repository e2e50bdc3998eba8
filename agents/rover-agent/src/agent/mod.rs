//! Agent module
//!
//! This module contains the grid agent: its facing, its state machine, the
//! events it emits and the owning [`rover::Rover`].

pub mod direction;
pub mod events;
pub mod rover;
pub mod state;
