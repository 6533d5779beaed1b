//! Runtime configuration
//!
//! Screen size, tick rate and seed. Loaded from a JSON file on native and
//! from LocalStorage in the browser; anything missing or broken falls back
//! to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Why a config could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Fixed run seed; a fresh one is picked per run when absent
    pub seed: Option<u64>,
    /// Player sprite file name
    pub player_sprite: String,
    /// Stop a headless run after this many ticks
    pub max_ticks: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            seed: None,
            player_sprite: "rubick.png".to_string(),
            max_ticks: TICK_RATE as u64 * 60 * 5,
        }
    }
}

impl Config {
    /// Environment variable naming a config file (native only)
    pub const PATH_ENV: &'static str = "WAVE_SURVIVOR_CONFIG";
    /// Config file looked up in the working directory (native only)
    pub const DEFAULT_PATH: &'static str = "wave_survivor.json";
    /// LocalStorage key (used only in wasm32)
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "wave_survivor_config";

    /// Play area rectangle
    pub fn arena(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen_width as f32, self.screen_height as f32)
    }

    /// Fixed timestep in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Reject configs the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if (self.screen_width as f32) <= ENEMY_SIZE || (self.screen_height as f32) <= ENEMY_SIZE {
            return Err(ConfigError::Invalid(format!(
                "screen {}x{} is too small to spawn enemies",
                self.screen_width, self.screen_height
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load config from disk, falling back to defaults (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let explicit = std::env::var(Self::PATH_ENV).ok();
        let path = explicit.clone().unwrap_or_else(|| Self::DEFAULT_PATH.to_string());

        match Self::from_path(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            // A missing default file is the normal case
            Err(ConfigError::Io(e))
                if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("Using default config");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.arena(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.player_sprite, "rubick.png");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "screen_width": 1024, "seed": 42 }"#).unwrap();
        assert_eq!(config.screen_width, 1024);
        assert_eq!(config.screen_height, 600);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let err = Config::from_json(r#"{ "tick_rate": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_tiny_screen() {
        let err = Config::from_json(r#"{ "screen_width": 20 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_path("/definitely/not/here/wave_survivor.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
