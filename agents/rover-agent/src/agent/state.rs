//! Agent State Machine
//!
//! The agent is either unplaced or sitting on a cell of the grid with a
//! facing. [`transition`] is the whole machine: a pure function from the
//! current state and a command to the next state plus the [`Event`]
//! describing what happened. Rejected and ignored commands hand back the
//! input state untouched.

use serde::Serialize;

use crate::agent::direction::{Direction, FacingToken, ParseDirectionError};
use crate::agent::events::Event;

/// Cells per side of the square grid
pub const GRID_SIZE: u8 = 5;

/// Check whether a coordinate pair lies on the grid
pub fn on_grid(x: i64, y: i64) -> bool {
    let range = 0..i64::from(GRID_SIZE);
    range.contains(&x) && range.contains(&y)
}

/// Reasons a placement is refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("position {x},{y} is off the grid")]
    OutOfBounds { x: i64, y: i64 },

    #[error(transparent)]
    UnknownFacing(#[from] ParseDirectionError),
}

/// A validated position and facing on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    x: u8,
    y: u8,
    facing: Direction,
}

impl Placement {
    /// Build a placement, refusing coordinates off the grid
    pub fn new(x: i64, y: i64, facing: Direction) -> Result<Self, PlaceError> {
        let out_of_bounds = || PlaceError::OutOfBounds { x, y };
        let gx = u8::try_from(x).map_err(|_| out_of_bounds())?;
        let gy = u8::try_from(y).map_err(|_| out_of_bounds())?;
        if gx >= GRID_SIZE || gy >= GRID_SIZE {
            return Err(out_of_bounds());
        }
        Ok(Self {
            x: gx,
            y: gy,
            facing,
        })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// The placement one step ahead, or `None` if that step leaves the grid
    pub fn advanced(&self) -> Option<Placement> {
        let (dx, dy) = self.facing.delta();
        Placement::new(i64::from(self.x) + dx, i64::from(self.y) + dy, self.facing).ok()
    }

    /// Same cell, facing rotated a quarter turn
    pub fn turned(&self, turn: Turn) -> Placement {
        let facing = match turn {
            Turn::Left => self.facing.left(),
            Turn::Right => self.facing.right(),
        };
        Placement { facing, ..*self }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.facing)
    }
}

/// Represents the possible states of the agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AgentState {
    /// Not yet on the grid
    #[default]
    Unplaced,
    /// On the grid at a validated position and facing
    Placed(Placement),
}

impl AgentState {
    pub fn placement(&self) -> Option<Placement> {
        match self {
            AgentState::Unplaced => None,
            AgentState::Placed(placement) => Some(*placement),
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, AgentState::Placed(_))
    }

    /// `"x,y,FACING"` when placed, `None` otherwise
    pub fn report(&self) -> Option<String> {
        self.placement().map(|p| p.to_string())
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentState::Unplaced => write!(f, "unplaced"),
            AgentState::Placed(placement) => write!(f, "{}", placement),
        }
    }
}

/// Rotation sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Turn::Left => write!(f, "left"),
            Turn::Right => write!(f, "right"),
        }
    }
}

/// Commands the agent understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place { x: i64, y: i64, facing: FacingToken },
    Move,
    Left,
    Right,
    Report,
}

impl Command {
    /// Build a placement command from a typed direction or a raw token
    pub fn place(x: i64, y: i64, facing: impl Into<FacingToken>) -> Self {
        Command::Place {
            x,
            y,
            facing: facing.into(),
        }
    }

    /// Uppercase command keyword
    pub fn name(&self) -> &'static str {
        match self {
            Command::Place { .. } => "PLACE",
            Command::Move => "MOVE",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
            Command::Report => "REPORT",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Place { x, y, facing } => write!(f, "PLACE {},{},{}", x, y, facing),
            other => f.write_str(other.name()),
        }
    }
}

/// Apply one command to a state.
///
/// Returns the next state together with the event that describes the
/// outcome. When the event is a rejection or an ignore, the returned state
/// equals the input state.
pub fn transition(state: AgentState, command: &Command) -> (AgentState, Event) {
    match command {
        Command::Place { x, y, facing } => match validate(*x, *y, facing) {
            Ok(placement) => (AgentState::Placed(placement), Event::Placed(placement)),
            Err(err) => (state, Event::PlacementRejected(err)),
        },
        Command::Move => when_placed(state, command, |current| match current.advanced() {
            Some(to) => (AgentState::Placed(to), Event::Moved { from: current, to }),
            None => (state, Event::MoveBlocked(current)),
        }),
        Command::Left => when_placed(state, command, |current| turn(current, Turn::Left)),
        Command::Right => when_placed(state, command, |current| turn(current, Turn::Right)),
        Command::Report => when_placed(state, command, |current| {
            (state, Event::Reported(current))
        }),
    }
}

fn validate(x: i64, y: i64, facing: &FacingToken) -> Result<Placement, PlaceError> {
    if !on_grid(x, y) {
        return Err(PlaceError::OutOfBounds { x, y });
    }
    Placement::new(x, y, facing.direction()?)
}

fn turn(current: Placement, turn: Turn) -> (AgentState, Event) {
    let placement = current.turned(turn);
    (AgentState::Placed(placement), Event::Turned { turn, placement })
}

fn when_placed(
    state: AgentState,
    command: &Command,
    apply: impl FnOnce(Placement) -> (AgentState, Event),
) -> (AgentState, Event) {
    match state.placement() {
        Some(current) => apply(current),
        None => (state, Event::Ignored(command.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(x: i64, y: i64, facing: Direction) -> AgentState {
        AgentState::Placed(Placement::new(x, y, facing).unwrap())
    }

    fn run(commands: &[Command]) -> AgentState {
        commands
            .iter()
            .fold(AgentState::Unplaced, |state, cmd| transition(state, cmd).0)
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(AgentState::default(), AgentState::Unplaced);
        assert_eq!(AgentState::default().report(), None);
        assert!(!AgentState::default().is_placed());
    }

    #[test]
    fn test_place_on_grid() {
        let (state, event) = transition(
            AgentState::Unplaced,
            &Command::place(0, 0, Direction::North),
        );
        assert_eq!(state, placed(0, 0, Direction::North));
        assert!(state.is_placed());
        assert!(matches!(event, Event::Placed(_)));
    }

    #[test]
    fn test_place_off_grid_keeps_state() {
        let cases = [(-1, 0), (5, 0), (0, -1), (0, 5), (2, 5), (i64::MAX, 0), (0, i64::MIN)];
        for start in [AgentState::Unplaced, placed(2, 2, Direction::East)] {
            for (x, y) in cases {
                let (state, event) = transition(start, &Command::place(x, y, Direction::North));
                assert_eq!(state, start, "place {},{} changed state", x, y);
                assert_eq!(
                    event,
                    Event::PlacementRejected(PlaceError::OutOfBounds { x, y })
                );
            }
        }
    }

    #[test]
    fn test_place_unknown_facing_keeps_state() {
        for start in [AgentState::Unplaced, placed(1, 3, Direction::South)] {
            for token in ["UP", "DOWN", "NORTHWEST", "SOUTHEAST", "LEFT", ""] {
                let (state, event) = transition(start, &Command::place(2, 2, token));
                assert_eq!(state, start);
                assert!(matches!(
                    event,
                    Event::PlacementRejected(PlaceError::UnknownFacing(_))
                ));
            }
        }
    }

    #[test]
    fn test_replace_overwrites_placement() {
        let state = run(&[
            Command::place(0, 0, Direction::North),
            Command::place(4, 2, Direction::West),
        ]);
        assert_eq!(state, placed(4, 2, Direction::West));
    }

    #[test]
    fn test_commands_ignored_while_unplaced() {
        for cmd in [Command::Move, Command::Left, Command::Right, Command::Report] {
            let (state, event) = transition(AgentState::Unplaced, &cmd);
            assert_eq!(state, AgentState::Unplaced);
            assert_eq!(event, Event::Ignored(cmd));
        }
    }

    #[test]
    fn test_move_forward_inside_grid() {
        let state = run(&[Command::place(1, 1, Direction::North), Command::Move]);
        assert_eq!(state, placed(1, 2, Direction::North));
    }

    #[test]
    fn test_move_blocked_at_edges() {
        let corners = [
            (0, 0, Direction::South),
            (0, 0, Direction::West),
            (4, 4, Direction::East),
            (4, 4, Direction::North),
        ];
        for (x, y, facing) in corners {
            let start = placed(x, y, facing);
            let (state, event) = transition(start, &Command::Move);
            assert_eq!(state, start);
            assert!(matches!(event, Event::MoveBlocked(_)));
        }
    }

    #[test]
    fn test_agent_never_leaves_grid() {
        let mut state = placed(2, 2, Direction::North);
        let script = [Command::Move, Command::Move, Command::Move, Command::Right];
        for cmd in script.iter().cycle().take(200) {
            state = transition(state, cmd).0;
            let p = state.placement().unwrap();
            assert!(on_grid(i64::from(p.x()), i64::from(p.y())));
        }
    }

    #[test]
    fn test_rotate_left() {
        let state = run(&[Command::place(0, 0, Direction::North), Command::Left]);
        assert_eq!(state.placement().unwrap().facing(), Direction::West);
        let (state, _) = transition(state, &Command::Left);
        assert_eq!(state.placement().unwrap().facing(), Direction::South);
    }

    #[test]
    fn test_rotate_right() {
        let state = run(&[Command::place(0, 0, Direction::North), Command::Right]);
        assert_eq!(state.placement().unwrap().facing(), Direction::East);
        let (state, _) = transition(state, &Command::Right);
        assert_eq!(state.placement().unwrap().facing(), Direction::South);
    }

    #[test]
    fn test_rotation_keeps_position() {
        let state = run(&[
            Command::place(3, 1, Direction::East),
            Command::Left,
            Command::Right,
            Command::Right,
        ]);
        assert_eq!(state, placed(3, 1, Direction::South));
    }

    #[test]
    fn test_report_format() {
        let state = run(&[Command::place(3, 1, Direction::West)]);
        assert_eq!(state.report().as_deref(), Some("3,1,WEST"));
        let (same, event) = transition(state, &Command::Report);
        assert_eq!(same, state);
        assert!(matches!(event, Event::Reported(_)));
    }

    #[test]
    fn test_example_sequences() {
        let a = run(&[Command::place(0, 0, Direction::North), Command::Move]);
        assert_eq!(a.report().as_deref(), Some("0,1,NORTH"));

        let b = run(&[Command::place(0, 0, Direction::North), Command::Left]);
        assert_eq!(b.report().as_deref(), Some("0,0,WEST"));

        let c = run(&[
            Command::place(1, 2, Direction::East),
            Command::Move,
            Command::Move,
            Command::Left,
            Command::Move,
        ]);
        assert_eq!(c.report().as_deref(), Some("3,3,NORTH"));
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(AgentState::Unplaced).unwrap();
        assert_eq!(json, serde_json::json!({"state": "unplaced"}));

        let json = serde_json::to_value(placed(3, 1, Direction::West)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"state": "placed", "x": 3, "y": 1, "facing": "WEST"})
        );
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::place(1, 2, Direction::East).to_string(), "PLACE 1,2,EAST");
        assert_eq!(Command::place(1, 2, "up").to_string(), "PLACE 1,2,up");
        assert_eq!(Command::Report.to_string(), "REPORT");
    }
}
