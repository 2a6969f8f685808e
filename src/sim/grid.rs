//! Board geometry
//!
//! The board is a torus: leaving one edge re-enters from the opposite one.
//! Cells are column/row indices, never pixels.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A grid coordinate (column, row)
pub type Cell = IVec2;

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Step one cell in `direction`, wrapping at the edges
    #[inline]
    pub fn wrap(&self, cell: Cell, direction: Direction) -> Cell {
        self.offset(cell, direction.delta())
    }

    /// Apply an arbitrary delta with floor-mod wrap on both axes
    pub fn offset(&self, cell: Cell, delta: IVec2) -> Cell {
        IVec2::new(
            (cell.x + delta.x).rem_euclid(self.width),
            (cell.y + delta.y).rem_euclid(self.height),
        )
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Number of cells on the board
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn center(&self) -> Cell {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Uniformly random cell on the board
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        IVec2::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Shortest Manhattan distance on the torus
    pub fn distance(&self, a: Cell, b: Cell) -> i32 {
        let dx = (a.x - b.x).rem_euclid(self.width);
        let dy = (a.y - b.y).rem_euclid(self.height);
        dx.min(self.width - dx) + dy.min(self.height - dy)
    }
}

/// Top-left pixel of a cell
#[inline]
pub fn cell_to_pixels(cell: Cell, cell_size: i32) -> IVec2 {
    cell * cell_size
}

/// Cell containing a pixel
#[inline]
pub fn pixels_to_cell(pixels: IVec2, cell_size: i32) -> Cell {
    IVec2::new(
        pixels.x.div_euclid(cell_size),
        pixels.y.div_euclid(cell_size),
    )
}
