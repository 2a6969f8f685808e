//! Input sources
//!
//! Anything that produces turn requests for the loop: a replayed script, the
//! built-in autopilot, or an external keyboard layer implementing
//! [`InputSource`].

use std::collections::VecDeque;

use crate::sim::{Cell, Direction, GameState};

/// A discrete request from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    Quit,
}

/// Produces the events that arrived since the last poll
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> Vec<InputEvent>;
}

/// Replays pre-recorded batches, one batch per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
    /// Emit `Quit` once the script runs out
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
            quit_when_done: false,
        }
    }

    pub fn quit_when_done(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> Vec<InputEvent> {
        match self.batches.pop_front() {
            Some(batch) => batch,
            None if self.quit_when_done => vec![InputEvent::Quit],
            None => Vec::new(),
        }
    }
}

/// Demo player: heads for the beneficial item by toroidal distance, never
/// reverses, and steers around its body and the harmful item when it can.
#[derive(Debug, Clone, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    /// Heading the autopilot would take from the current state
    pub fn choose(&self, state: &GameState) -> Direction {
        let snake = &state.snake;
        let current = snake.direction();
        let head = snake.head();

        // The tail cell frees up this tick unless the snake is still growing
        let tail_moves = snake.len() >= snake.target_length();
        let body: Vec<Cell> = if tail_moves {
            snake.body().iter().take(snake.len() - 1).copied().collect()
        } else {
            snake.body().iter().copied().collect()
        };

        let mut best = current;
        let mut best_cost = i32::MAX;
        for direction in Direction::ALL {
            if current.is_opposite(direction) {
                continue;
            }
            let next = state.grid.wrap(head, direction);
            let mut cost = state.grid.distance(next, state.beneficial.position);
            if next == state.harmful.position {
                cost += 1_000;
            }
            if body.contains(&next) {
                cost += 10_000;
            }
            // Keep going straight on ties
            if cost < best_cost || (cost == best_cost && direction == current) {
                best = direction;
                best_cost = cost;
            }
        }
        best
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> Vec<InputEvent> {
        let direction = self.choose(state);
        if direction == state.snake.direction() {
            Vec::new()
        } else {
            vec![InputEvent::Turn(direction)]
        }
    }
}
