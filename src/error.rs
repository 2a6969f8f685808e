//! Error types

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::ItemKind;

/// Failures inside the simulation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Item relocation requested with every cell already taken
    #[error("no free cell for the {kind} item on a {width}x{height} board")]
    BoardFull {
        kind: ItemKind,
        width: i32,
        height: i32,
    },
    #[error("a snake body needs at least one cell")]
    EmptyBody,
}

/// Invalid or unreadable settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("tick rate must be positive")]
    ZeroTickRate,
    #[error("a {width}x{height} board is smaller than {min}x{min} cells")]
    BoardTooSmall { width: i32, height: i32, min: i32 },
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON")]
    Parse(#[from] serde_json::Error),
}

/// Failures while driving the game loop
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("frame output failed")]
    Io(#[from] std::io::Error),
}
