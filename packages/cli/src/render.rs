//! Grid rendering
//!
//! Draws the 5x5 board with the agent's facing initial on its cell. Row
//! `y = 4` is printed first so north points up the terminal.

use colored::Colorize;
use rover_agent::{AgentState, GRID_SIZE};

const EMPTY_CELL: char = '·';
const WIDTH: usize = 26;

/// Plain cell rows, top row first
pub fn grid_rows(state: &AgentState) -> Vec<Vec<char>> {
    let size = usize::from(GRID_SIZE);
    let mut rows = vec![vec![EMPTY_CELL; size]; size];
    if let Some(p) = state.placement() {
        let row = size - 1 - usize::from(p.y());
        rows[row][usize::from(p.x())] = p.facing().initial();
    }
    rows
}

/// Framed board ready to print
pub fn render_grid(state: &AgentState, color: bool) -> String {
    let rule = "═".repeat(WIDTH + 2);
    let title = format!("{:░^width$}", " ROVER ", width = WIDTH);
    let title = if color {
        title.bold().to_string()
    } else {
        title
    };

    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("║{}║\n", title));
    out.push_str(&rule);
    out.push('\n');

    for row in grid_rows(state) {
        let cells: Vec<String> = row
            .into_iter()
            .map(|cell| {
                let padded = format!("{:^4}", cell);
                if color && cell != EMPTY_CELL {
                    padded.green().bold().to_string()
                } else {
                    padded
                }
            })
            .collect();
        out.push_str(&format!("║ {} ║\n", cells.join(" ")));
    }

    out.push_str(&format!("╘{}╛\n", "═".repeat(WIDTH)));
    out
}
