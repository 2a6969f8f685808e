//! Read-only snapshot handed to renderers after each tick

use serde::{Deserialize, Serialize};

use super::grid::Cell;
use super::state::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub width: i32,
    pub height: i32,
    /// Head first
    pub body: Vec<Cell>,
    /// Old tail cell to erase, for incremental redraw
    pub last_removed: Option<Cell>,
    /// All cells vacated this tick
    pub trimmed: Vec<Cell>,
    pub beneficial: Cell,
    pub harmful: Cell,
    pub score: i64,
    pub best_score: i64,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            width: state.grid.width,
            height: state.grid.height,
            body: state.snake.body().iter().copied().collect(),
            last_removed: state.snake.last_removed(),
            trimmed: state.snake.trimmed().to_vec(),
            beneficial: state.beneficial.position,
            harmful: state.harmful.position,
            score: state.score,
            best_score: state.best_score,
        }
    }
}
