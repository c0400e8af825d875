use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::grid::clamp_dimension;

/// Upper bound for both the tick rate and the frame rate
pub const MAX_RATE: u32 = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Fixed simulation rate
    pub ticks_per_second: u32,
    /// How often the loop wakes up to redraw and feed the tick clock
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 16,
            grid_height: 16,
            ticks_per_second: 15,
            frame_rate: 60,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
        .normalized()
    }

    /// Same settings with a different board size
    pub fn with_size(&self, width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..self.clone()
        }
        .normalized()
    }

    /// Clamp every field into its playable range
    pub fn normalized(self) -> Self {
        Self {
            grid_width: clamp_dimension(i64::try_from(self.grid_width).unwrap_or(i64::MAX)),
            grid_height: clamp_dimension(i64::try_from(self.grid_height).unwrap_or(i64::MAX)),
            ticks_per_second: self.ticks_per_second.clamp(1, MAX_RATE),
            frame_rate: self.frame_rate.clamp(1, MAX_RATE),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&content).context("Failed to deserialize config")?;
        Ok(config.normalized())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::{MAX_GRID_SIZE, MIN_GRID_SIZE};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.grid_height, 16);
        assert_eq!(config.ticks_per_second, 15);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 25);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 25);
    }

    #[test]
    fn test_sizes_are_clamped() {
        let config = GameConfig::new(0, 100_000);
        assert_eq!(config.grid_width, MIN_GRID_SIZE);
        assert_eq!(config.grid_height, MAX_GRID_SIZE);

        let resized = GameConfig {
            ticks_per_second: 5,
            ..Default::default()
        }
        .with_size(2, 40);
        assert_eq!(resized.grid_width, MIN_GRID_SIZE);
        assert_eq!(resized.grid_height, 40);
        assert_eq!(resized.ticks_per_second, 5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");

        let config = GameConfig {
            ticks_per_second: 5,
            ..GameConfig::new(32, 20)
        };
        config.save_to_file(&path).unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_file_fills_defaults_and_clamps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "grid_width": 2, "ticks_per_second": 0 }"#).unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.grid_width, MIN_GRID_SIZE);
        assert_eq!(loaded.grid_height, 16);
        assert_eq!(loaded.ticks_per_second, 1);
        assert_eq!(loaded.frame_rate, 60);
    }

    #[test]
    fn test_rates_are_clamped() {
        let config = GameConfig {
            ticks_per_second: 2_000_000_000,
            frame_rate: u32::MAX,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.ticks_per_second, MAX_RATE);
        assert_eq!(config.frame_rate, MAX_RATE);

        let config = GameConfig {
            ticks_per_second: 0,
            frame_rate: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.ticks_per_second, 1);
        assert_eq!(config.frame_rate, 1);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = GameConfig::load_from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
