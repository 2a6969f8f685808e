//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here, including the seeded RNG,
//! so two states built from the same seed replay identically.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::frame::Frame;
use super::grid::{Cell, Grid};
use super::item::{Item, ItemKind};
use super::snake::Snake;
use crate::error::SimError;

/// Outcome of a single tick. At most one effect applies per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    /// Plain move, nothing eaten
    Moved,
    /// Head reached the beneficial item
    AteBeneficial,
    /// Head ran into the body; snake and score restarted
    SelfCollision,
    /// Head reached the harmful item
    AteHarmful,
}

/// Where the snake restarts after running into itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Board centre
    #[default]
    Center,
    /// The cell where the collision happened
    #[serde(alias = "in-place")]
    InPlace,
}

impl ResetPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetPolicy::Center => "center",
            ResetPolicy::InPlace => "in-place",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "center" | "centre" => Some(ResetPolicy::Center),
            "in-place" | "in_place" | "inplace" => Some(ResetPolicy::InPlace),
            _ => None,
        }
    }
}

/// Complete game state for one board
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub grid: Grid,
    pub reset_policy: ResetPolicy,
    pub snake: Snake,
    pub beneficial: Item,
    pub harmful: Item,
    /// May go negative
    pub score: i64,
    /// Highest score seen this session
    pub best_score: i64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of self-collision restarts
    pub resets: u32,
    rng: Pcg32,
}

impl GameState {
    /// Snake of length 1 at the centre heading right, both items on random
    /// free cells.
    pub fn new(seed: u64, grid: Grid, reset_policy: ResetPolicy) -> Result<Self, SimError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = Snake::new(grid.center(), Direction::Right);

        let mut occupied: HashSet<Cell> = snake.body().iter().copied().collect();
        let beneficial = Item::spawn(ItemKind::Beneficial, &grid, &occupied, &mut rng)?;
        occupied.insert(beneficial.position);
        let harmful = Item::spawn(ItemKind::Harmful, &grid, &occupied, &mut rng)?;

        log::debug!(
            "new {}x{} board, seed {}, reset policy {}",
            grid.width,
            grid.height,
            seed,
            reset_policy.as_str()
        );

        Ok(Self {
            seed,
            grid,
            reset_policy,
            snake,
            beneficial,
            harmful,
            score: 0,
            best_score: 0,
            time_ticks: 0,
            resets: 0,
            rng,
        })
    }

    pub fn item(&self, kind: ItemKind) -> &Item {
        match kind {
            ItemKind::Beneficial => &self.beneficial,
            ItemKind::Harmful => &self.harmful,
        }
    }

    /// Forward a turn request to the snake (see [`Snake::buffer_direction`])
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        self.snake.buffer_direction(direction)
    }

    /// Cells an item of `kind` must avoid: the snake body plus the other item.
    /// Built fresh on every call.
    pub fn occupied_for(&self, kind: ItemKind) -> HashSet<Cell> {
        let mut occupied: HashSet<Cell> = self.snake.body().iter().copied().collect();
        occupied.insert(self.item(kind.other()).position);
        occupied
    }

    /// Move an item to a free cell
    pub fn relocate_item(&mut self, kind: ItemKind) -> Result<Cell, SimError> {
        let occupied = self.occupied_for(kind);
        let item = match kind {
            ItemKind::Beneficial => &mut self.beneficial,
            ItemKind::Harmful => &mut self.harmful,
        };
        item.relocate(&self.grid, &occupied, &mut self.rng)
    }

    /// Put the snake back to length 1 with a random heading and clear the
    /// score. Items are left for the caller to move.
    pub fn restart_snake(&mut self) {
        let position = match self.reset_policy {
            ResetPolicy::Center => self.grid.center(),
            ResetPolicy::InPlace => self.snake.head(),
        };
        let direction = Direction::random(&mut self.rng);
        log::debug!(
            "self-collision at tick {} (length {}, score {}); restarting at ({}, {}) heading {:?}",
            self.time_ticks,
            self.snake.len(),
            self.score,
            position.x,
            position.y,
            direction
        );
        self.snake.reset(direction, position);
        self.score = 0;
        self.resets += 1;
    }

    /// Add to the score, tracking the session best
    pub fn add_score(&mut self, delta: i64) {
        self.score += delta;
        self.best_score = self.best_score.max(self.score);
    }

    /// True when the items sit on free cells apart from each other
    pub fn items_placed_validly(&self) -> bool {
        !self.snake.occupies(self.beneficial.position)
            && !self.snake.occupies(self.harmful.position)
            && self.beneficial.position != self.harmful.position
    }

    /// Snapshot for renderers
    pub fn frame(&self) -> Frame {
        Frame::capture(self)
    }
}
