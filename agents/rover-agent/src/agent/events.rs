//! Agent Events
//!
//! Every command applied to the agent yields exactly one [`Event`]. Events
//! are plain values; where they go is decided by the [`EventSink`] the
//! caller injects into the [`Rover`](crate::agent::rover::Rover).

use tracing::{info, warn};

use crate::agent::state::{Command, PlaceError, Placement, Turn};

/// Outcome of a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Placement accepted
    Placed(Placement),
    /// Placement refused, state untouched
    PlacementRejected(PlaceError),
    /// Agent stepped forward one cell
    Moved { from: Placement, to: Placement },
    /// Step would have left the grid, state untouched
    MoveBlocked(Placement),
    /// Facing rotated in place
    Turned { turn: Turn, placement: Placement },
    /// Current placement read back
    Reported(Placement),
    /// Command received before any placement, state untouched
    Ignored(Command),
}

impl Event {
    /// Whether the command was refused outright. Blocked moves and commands
    /// before placement are silent no-ops, not rejections.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Event::PlacementRejected(_))
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Placed(p) => write!(f, "Placed at {}", p),
            Event::PlacementRejected(err) => write!(f, "Invalid place: {}", err),
            Event::Moved { to, .. } => write!(f, "Moved to {},{}", to.x(), to.y()),
            Event::MoveBlocked(_) => write!(f, "Move ignored: would fall off the grid"),
            Event::Turned { turn, placement } => {
                write!(f, "Turned {} to {}", turn, placement.facing())
            }
            Event::Reported(p) => write!(f, "Report: {}", p),
            Event::Ignored(cmd) => write!(f, "{} ignored: agent not placed", cmd.name()),
        }
    }
}

/// Receives the events produced by an agent
pub trait EventSink {
    fn record(&mut self, event: &Event);
}

/// Collects events in order
impl EventSink for Vec<Event> {
    fn record(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

/// Emits each event as a `tracing` record.
///
/// Accepted transitions and reports log at `info`; rejections, blocked moves
/// and commands before placement log at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&mut self, event: &Event) {
        match event {
            Event::Placed(p) => {
                info!(x = p.x(), y = p.y(), facing = %p.facing(), "Agent placed");
            }
            Event::PlacementRejected(err) => {
                warn!(error = %err, "Placement rejected");
            }
            Event::Moved { from, to } => {
                info!(from = %from, to = %to, "Agent moved");
            }
            Event::MoveBlocked(p) => {
                warn!(at = %p, "Move ignored: would fall off the grid");
            }
            Event::Turned { turn, placement } => {
                info!(turn = %turn, facing = %placement.facing(), "Agent turned");
            }
            Event::Reported(p) => {
                info!(report = %p, "Agent report");
            }
            Event::Ignored(cmd) => {
                warn!(command = cmd.name(), "Command ignored: agent not placed");
            }
        }
    }
}
