//! The Snake - a toroidal grid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, items, collisions, score)
//! - `settings`: Board geometry and timing configuration
//! - `input`: Input sources feeding turn requests into the loop
//! - `render`: Frame sinks consuming per-tick snapshots
//! - `runner`: Fixed-rate driver tying input, simulation and output together

pub mod error;
pub mod input;
pub mod render;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, RunError, SimError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 480;
    /// Cell edge in pixels
    pub const GRID_SIZE: i32 = 20;
    /// Board dimensions in cells
    pub const GRID_WIDTH: i32 = SCREEN_WIDTH / GRID_SIZE;
    pub const GRID_HEIGHT: i32 = SCREEN_HEIGHT / GRID_SIZE;

    /// Simulation rate (ticks per second)
    pub const SPEED: u32 = 20;
    /// Maximum ticks run per poll to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Shortest board side accepted by settings. Smaller boards run out of
    /// free cells for the items almost at once.
    pub const MIN_BOARD_SIDE: i32 = 4;

    /// Palette (RGB)
    pub const BORDER_COLOR: [u8; 3] = [93, 216, 228];
    pub const SNAKE_COLOR: [u8; 3] = [0, 255, 0];
    pub const BENEFICIAL_COLOR: [u8; 3] = [255, 0, 0];
    pub const HARMFUL_COLOR: [u8; 3] = [245, 255, 250];
    pub const SCORE_COLOR: [u8; 3] = [255, 255, 102];
}
