//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to the
//! built-in default so partial files are fine.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, MIN_BOARD_SIDE, SCREEN_HEIGHT, SCREEN_WIDTH, SPEED};
use crate::error::ConfigError;
use crate::sim::{Grid, ResetPolicy};

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Window width in pixels
    pub screen_width: i32,
    /// Window height in pixels
    pub screen_height: i32,
    /// Cell edge in pixels
    pub cell_size: i32,

    // === Timing ===
    pub ticks_per_second: u32,

    // === Simulation ===
    /// Fixed run seed; random when absent
    pub seed: Option<u64>,
    pub reset_policy: ResetPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: GRID_SIZE,

            ticks_per_second: SPEED,

            seed: None,
            reset_policy: ResetPolicy::Center,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Check dimensions and rate
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid().map(|_| ())
    }

    /// Board in cells. Partial cells at the right/bottom edge are dropped.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let width = self.screen_width / self.cell_size;
        let height = self.screen_height / self.cell_size;
        if width < MIN_BOARD_SIDE || height < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                width,
                height,
                min: MIN_BOARD_SIDE,
            });
        }
        Ok(Grid::new(width, height))
    }

    /// Wall-clock time between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.grid().unwrap(), Grid::new(32, 24));
        assert_eq!(settings.tick_interval(), Duration::from_millis(50));
        assert_eq!(settings.reset_policy, ResetPolicy::Center);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "cell_size": 40, "seed": 7 }"#).unwrap();
        assert_eq!(settings.grid().unwrap(), Grid::new(16, 12));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.ticks_per_second, SPEED);
    }

    #[test]
    fn test_reset_policy_json() {
        let settings = Settings::from_json(r#"{ "reset_policy": "in_place" }"#).unwrap();
        assert_eq!(settings.reset_policy, ResetPolicy::InPlace);

        // Same spelling as the command line
        let json = format!(r#"{{ "reset_policy": "{}" }}"#, ResetPolicy::InPlace.as_str());
        let settings = Settings::from_json(&json).unwrap();
        assert_eq!(settings.reset_policy, ResetPolicy::InPlace);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            Settings::from_json(r#"{ "cell_size": 0 }"#),
            Err(ConfigError::ZeroCellSize)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "ticks_per_second": 0 }"#),
            Err(ConfigError::ZeroTickRate)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "screen_width": 40, "screen_height": 20 }"#),
            Err(ConfigError::BoardTooSmall { width: 2, height: 1, .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "screen_width": 60, "screen_height": 20 }"#),
            Err(ConfigError::BoardTooSmall { width: 3, height: 1, .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "screen_width": 80, "screen_height": 60 }"#),
            Err(ConfigError::BoardTooSmall { width: 4, height: 3, .. })
        ));
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_smallest_board_accepted() {
        let settings = Settings::from_json(r#"{ "screen_width": 80, "screen_height": 80 }"#).unwrap();
        assert_eq!(settings.grid().unwrap(), Grid::new(4, 4));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/the-snake.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("the-snake-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "ticks_per_second": 10 }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(settings.tick_interval(), Duration::from_millis(100));
    }
}
