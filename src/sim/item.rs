//! Consumable items
//!
//! Both items share placement logic; only the effect applied by the tick
//! and the colour tag differ.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Grid};
use crate::consts::{BENEFICIAL_COLOR, HARMFUL_COLOR};
use crate::error::SimError;

/// Which effect an item has when eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Grows the snake and scores a point
    Beneficial,
    /// Shrinks the snake and costs a point
    Harmful,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Beneficial => "beneficial",
            ItemKind::Harmful => "harmful",
        }
    }

    /// Fill colour for renderers
    pub fn color(&self) -> [u8; 3] {
        match self {
            ItemKind::Beneficial => BENEFICIAL_COLOR,
            ItemKind::Harmful => HARMFUL_COLOR,
        }
    }

    pub fn other(&self) -> ItemKind {
        match self {
            ItemKind::Beneficial => ItemKind::Harmful,
            ItemKind::Harmful => ItemKind::Beneficial,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-cell item on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub position: Cell,
}

impl Item {
    /// Place a new item on a random unoccupied cell
    pub fn spawn<R: Rng + ?Sized>(
        kind: ItemKind,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Self, SimError> {
        let mut item = Self {
            kind,
            position: grid.center(),
        };
        item.relocate(grid, occupied, rng)?;
        Ok(item)
    }

    /// Move to a uniformly random cell outside `occupied`.
    ///
    /// Rejection-samples the whole board. Fails with [`SimError::BoardFull`]
    /// instead of spinning when `occupied` covers every cell.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Cell, SimError> {
        let taken = occupied.iter().filter(|c| grid.contains(**c)).count();
        if taken >= grid.area() {
            return Err(SimError::BoardFull {
                kind: self.kind,
                width: grid.width,
                height: grid.height,
            });
        }

        let position = loop {
            let candidate = grid.random_cell(rng);
            if !occupied.contains(&candidate) {
                break candidate;
            }
        };

        log::debug!(
            "{} item relocated ({}, {}) -> ({}, {})",
            self.kind,
            self.position.x,
            self.position.y,
            position.x,
            position.y
        );
        self.position = position;
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_relocate_never_lands_on_occupied() {
        let grid = Grid::new(32, 24);
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut item = Item {
            kind: ItemKind::Beneficial,
            position: IVec2::ZERO,
        };

        for round in 0..1000 {
            // Up to ~89% coverage
            let coverage = rng.random_range(0..(grid.area() * 89 / 100));
            let occupied: HashSet<Cell> =
                (0..coverage).map(|_| grid.random_cell(&mut rng)).collect();
            item.kind = if round % 2 == 0 {
                ItemKind::Beneficial
            } else {
                ItemKind::Harmful
            };

            let pos = item.relocate(&grid, &occupied, &mut rng).unwrap();
            assert!(grid.contains(pos));
            assert!(!occupied.contains(&pos));
            assert_eq!(item.position, pos);
        }
    }

    #[test]
    fn test_relocate_finds_single_free_cell() {
        let grid = Grid::new(4, 3);
        let free = IVec2::new(2, 1);
        let occupied: HashSet<Cell> = (0..4)
            .flat_map(|x| (0..3).map(move |y| IVec2::new(x, y)))
            .filter(|c| *c != free)
            .collect();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut item = Item {
            kind: ItemKind::Harmful,
            position: IVec2::ZERO,
        };
        assert_eq!(item.relocate(&grid, &occupied, &mut rng), Ok(free));
    }

    #[test]
    fn test_relocate_full_board_fails_fast() {
        let grid = Grid::new(2, 2);
        let occupied: HashSet<Cell> = [
            IVec2::new(0, 0),
            IVec2::new(1, 0),
            IVec2::new(0, 1),
            IVec2::new(1, 1),
            // Off-board cells do not count toward coverage
            IVec2::new(9, 9),
        ]
        .into_iter()
        .collect();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut item = Item {
            kind: ItemKind::Beneficial,
            position: IVec2::ZERO,
        };

        let err = item.relocate(&grid, &occupied, &mut rng).unwrap_err();
        assert_eq!(
            err,
            SimError::BoardFull {
                kind: ItemKind::Beneficial,
                width: 2,
                height: 2
            }
        );
        assert_eq!(item.position, IVec2::ZERO);
    }

    #[test]
    fn test_spawn_avoids_occupied() {
        let grid = Grid::new(3, 1);
        let occupied: HashSet<Cell> = [IVec2::new(0, 0), IVec2::new(1, 0)].into_iter().collect();
        let mut rng = Pcg32::seed_from_u64(99);
        let item = Item::spawn(ItemKind::Harmful, &grid, &occupied, &mut rng).unwrap();
        assert_eq!(item.position, IVec2::new(2, 0));
        assert_eq!(item.kind.color(), HARMFUL_COLOR);
    }
}
