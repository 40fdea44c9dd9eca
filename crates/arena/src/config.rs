//! Arena configuration (input bindings, match defaults). Loaded from config.ron at startup.

use crate::state::MatchMode;
use input::ControlScheme;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("config could not be serialized: {0}")]
    Serialize(#[from] ron::Error),
}

/// Persistent arena settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Key bindings for every remappable action.
    #[serde(default)]
    pub controls: ControlScheme,
    /// Mode the headless driver starts in.
    #[serde(default = "default_mode")]
    pub default_mode: MatchMode,
    /// Fixed RNG seed. `None` seeds from entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Frames the headless driver runs before giving up on a match.
    #[serde(default = "default_frame_budget")]
    pub demo_frame_budget: u32,
}

fn default_sensitivity() -> f32 {
    1.0
}
fn default_mode() -> MatchMode {
    MatchMode::OneVsOne
}
fn default_frame_budget() -> u32 {
    60 * 120
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            controls: ControlScheme::default(),
            default_mode: default_mode(),
            rng_seed: None,
            demo_frame_budget: default_frame_budget(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Err(e) = self.save_to(&path) {
            log::warn!("Could not write config to {:?}: {}", path, e);
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&data)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, s)?;
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
