//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick
//! - Seeded RNG only
//! - No rendering, input or clock dependencies

pub mod direction;
pub mod frame;
pub mod grid;
pub mod item;
pub mod snake;
pub mod state;
pub mod tick;

pub use direction::Direction;
pub use frame::Frame;
pub use grid::{Cell, Grid, cell_to_pixels, pixels_to_cell};
pub use item::{Item, ItemKind};
pub use snake::Snake;
pub use state::{GameState, ResetPolicy, TickEvent};
pub use tick::{TickInput, tick};
