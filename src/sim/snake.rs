//! The snake: an ordered body, head first
//!
//! Length changes go through `target_length`; the body catches up on the
//! next `tick`, so growth and shrink always lag the event by one move.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::{Cell, Grid};
use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Body cells, head at the front. Never empty.
    body: VecDeque<Cell>,
    direction: Direction,
    /// Turn requested since the last tick
    pending_direction: Option<Direction>,
    target_length: usize,
    /// Cells dropped off the tail by the most recent tick (oldest tail first)
    trimmed: Vec<Cell>,
}

impl Snake {
    /// A length-1 snake
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction,
            pending_direction: None,
            target_length: 1,
            trimmed: Vec::new(),
        }
    }

    /// Build a snake from explicit cells (head first); target length is the
    /// body length
    pub fn from_body(
        body: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Result<Self, SimError> {
        let body: VecDeque<Cell> = body.into_iter().collect();
        if body.is_empty() {
            return Err(SimError::EmptyBody);
        }
        Ok(Self {
            target_length: body.len(),
            body,
            direction,
            pending_direction: None,
            trimmed: Vec::new(),
        })
    }

    /// Queue a turn for the next tick. Reversals are dropped; a later call
    /// before the tick replaces an earlier one. Returns whether it was queued.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Advance one cell: commit the pending turn, push the new head, then trim
    /// the tail down to the target length.
    pub fn tick(&mut self, grid: &Grid) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let new_head = grid.wrap(self.head(), self.direction);
        self.body.push_front(new_head);

        self.trimmed.clear();
        while self.body.len() > self.target_length {
            if let Some(tail) = self.body.pop_back() {
                self.trimmed.push(tail);
            }
        }
    }

    #[inline]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// True when the head overlaps any other body cell
    pub fn self_collided(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    /// Collapse to a single cell at `position`
    pub fn reset(&mut self, direction: Direction, position: Cell) {
        self.target_length = 1;
        self.body.clear();
        self.body.push_back(position);
        self.direction = direction;
        self.pending_direction = None;
        self.trimmed.clear();
    }

    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Never drops below one cell
    pub fn shrink(&mut self) {
        self.target_length = self.target_length.saturating_sub(1).max(1);
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept alongside `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Old tail cell vacated by the last tick, if any
    pub fn last_removed(&self) -> Option<Cell> {
        self.trimmed.first().copied()
    }

    /// Every cell vacated by the last tick
    pub fn trimmed(&self) -> &[Cell] {
        &self.trimmed
    }
}
