//! Rover
//!
//! [`Rover`] owns one agent's state and feeds every command through
//! [`transition`], forwarding the resulting event to its sink. Front ends
//! talk to it through the [`Controller`] trait.

use crate::agent::direction::FacingToken;
use crate::agent::events::{Event, EventSink, TracingSink};
use crate::agent::state::{transition, AgentState, Command};

/// The operation set a front end drives an agent with.
///
/// Implementors supply [`apply`](Controller::apply) and
/// [`state`](Controller::state); the five agent operations are derived from
/// them.
pub trait Controller {
    /// Apply a command and return the event it produced
    fn apply(&mut self, command: Command) -> Event;

    /// Current state, read-only
    fn state(&self) -> AgentState;

    /// Place the agent. Returns `false` and leaves the state untouched when
    /// the position is off the grid or the facing is unknown.
    fn place(&mut self, x: i64, y: i64, facing: impl Into<FacingToken>) -> bool
    where
        Self: Sized,
    {
        matches!(self.apply(Command::place(x, y, facing)), Event::Placed(_))
    }

    /// Step forward one cell. Silently ignored when unplaced or at the edge.
    fn move_forward(&mut self) {
        self.apply(Command::Move);
    }

    /// Quarter turn counter-clockwise. Ignored when unplaced.
    fn left(&mut self) {
        self.apply(Command::Left);
    }

    /// Quarter turn clockwise. Ignored when unplaced.
    fn right(&mut self) {
        self.apply(Command::Right);
    }

    /// `"x,y,FACING"` when placed, `None` before the first placement
    fn report(&mut self) -> Option<String> {
        match self.apply(Command::Report) {
            Event::Reported(placement) => Some(placement.to_string()),
            _ => None,
        }
    }
}

/// Single agent with an injected event sink
#[derive(Debug, Clone, Default)]
pub struct Rover<S: EventSink = TracingSink> {
    state: AgentState,
    sink: S,
}

impl Rover {
    /// Create an unplaced rover that logs through `tracing`
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }
}

impl<S: EventSink> Rover<S> {
    /// Create an unplaced rover that reports to `sink`
    pub fn with_sink(sink: S) -> Self {
        Self {
            state: AgentState::Unplaced,
            sink,
        }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: EventSink> Controller for Rover<S> {
    fn apply(&mut self, command: Command) -> Event {
        let (next, event) = transition(self.state, &command);
        self.state = next;
        self.sink.record(&event);
        event
    }

    fn state(&self) -> AgentState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::direction::Direction;
    use crate::agent::state::Placement;

    fn recording() -> Rover<Vec<Event>> {
        Rover::with_sink(Vec::new())
    }

    #[test]
    fn test_new_rover_is_unplaced() {
        let mut rover = Rover::new();
        assert_eq!(rover.state(), AgentState::Unplaced);
        assert_eq!(rover.report(), None);
    }

    #[test]
    fn test_place_valid() {
        let mut rover = recording();
        assert!(rover.place(0, 0, Direction::North));
        let p = rover.state().placement().unwrap();
        assert_eq!((p.x(), p.y(), p.facing()), (0, 0, Direction::North));
    }

    #[test]
    fn test_place_accepts_tokens() {
        let mut rover = recording();
        assert!(rover.place(2, 3, "south"));
        assert_eq!(rover.report().as_deref(), Some("2,3,SOUTH"));
    }

    #[test]
    fn test_place_invalid_coordinates() {
        let mut rover = recording();
        for (x, y) in [(-1, 0), (5, 0), (0, -1), (0, 5), (2, 5)] {
            assert!(!rover.place(x, y, Direction::North));
            assert_eq!(rover.state(), AgentState::Unplaced);
        }
    }

    #[test]
    fn test_place_invalid_direction() {
        let mut rover = recording();
        for token in ["UP", "DOWN", "NORTHWEST", "SOUTHEAST", "LEFT", ""] {
            assert!(!rover.place(2, 2, token));
            assert_eq!(rover.state(), AgentState::Unplaced);
        }
    }

    #[test]
    fn test_place_rejects_padded_facing() {
        let mut rover = recording();
        assert!(!rover.place(0, 0, " north "));
        assert_eq!(rover.report(), None);
    }

    #[test]
    fn test_invalid_replace_keeps_previous_placement() {
        let mut rover = recording();
        assert!(rover.place(1, 1, Direction::East));
        assert!(!rover.place(7, 1, Direction::West));
        assert!(!rover.place(1, 1, "sideways"));
        assert_eq!(rover.report().as_deref(), Some("1,1,EAST"));
    }

    #[test]
    fn test_move_without_placement_is_ignored() {
        let mut rover = recording();
        rover.move_forward();
        rover.left();
        rover.right();
        assert_eq!(rover.state(), AgentState::Unplaced);
    }

    #[test]
    fn test_move_that_would_fall_off_is_ignored() {
        let mut rover = recording();
        rover.place(0, 0, Direction::South);
        rover.move_forward();
        assert_eq!(rover.report().as_deref(), Some("0,0,SOUTH"));

        rover.place(4, 4, Direction::East);
        rover.move_forward();
        assert_eq!(rover.report().as_deref(), Some("4,4,EAST"));
    }

    #[test]
    fn test_example_sequence_c() {
        let mut rover = recording();
        rover.place(1, 2, Direction::East);
        rover.move_forward();
        rover.move_forward();
        rover.left();
        rover.move_forward();
        assert_eq!(rover.report().as_deref(), Some("3,3,NORTH"));
    }

    #[test]
    fn test_sink_receives_every_event() {
        let mut rover = recording();
        rover.move_forward();
        rover.place(9, 9, Direction::North);
        rover.place(0, 0, Direction::West);
        rover.move_forward();
        rover.right();
        rover.report();

        let origin = Placement::new(0, 0, Direction::West).unwrap();
        let north = Placement::new(0, 0, Direction::North).unwrap();
        let events = rover.into_sink();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], Event::Ignored(Command::Move));
        assert!(events[1].is_rejection());
        assert_eq!(events[2], Event::Placed(origin));
        assert_eq!(events[3], Event::MoveBlocked(origin));
        assert_eq!(
            events[4],
            Event::Turned {
                turn: crate::agent::state::Turn::Right,
                placement: north
            }
        );
        assert_eq!(events[5], Event::Reported(north));
    }
}
