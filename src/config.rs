//! Configuration management
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/subcue/config.toml` on Linux). Every field has a default, so a
//! missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::player::ErrorPolicy;
use crate::timeline::{IndexLayout, LayoutError};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "SUBCUE_CONFIG";

const MIN_POLL_INTERVAL_MS: u64 = 1;
const MAX_POLL_INTERVAL_MS: u64 = 10_000;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine a config directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("player.poll_interval_ms must be between {min} and {max}, got {value}")]
    PollInterval { value: u64, min: u64, max: u64 },

    #[error("Invalid [index] layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Unknown logging.level '{0}' (expected error, warn, info, debug or trace)")]
    LogLevel(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub index: IndexConfig,
    pub logging: LoggingConfig,
}

/// Polling driver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Driver cadence in milliseconds
    pub poll_interval_ms: u64,
    /// What to do when a lookup fails during playback
    pub on_error: ErrorPolicy,
    /// Media offset playback starts from
    pub start_offset_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            on_error: ErrorPolicy::Skip,
            start_offset_ms: 0,
        }
    }
}

/// Digit index layout, as decimal exponents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Exponent of the most significant indexed digit
    pub top_exponent: u32,
    /// Exponent of the least significant indexed digit (bucket width 10^n ms)
    pub resolution_exponent: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let layout = IndexLayout::default();
        Self {
            top_exponent: layout.top_exponent(),
            resolution_exponent: layout.resolution_exponent(),
        }
    }
}

impl IndexConfig {
    pub fn layout(&self) -> Result<IndexLayout, LayoutError> {
        IndexLayout::new(self.top_exponent, self.resolution_exponent)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Default config file location, honouring [`CONFIG_ENV`].
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("subcue").join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.player.poll_interval_ms;
        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&interval) {
            return Err(ConfigError::PollInterval {
                value: interval,
                min: MIN_POLL_INTERVAL_MS,
                max: MAX_POLL_INTERVAL_MS,
            });
        }
        self.index.layout()?;
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::LogLevel(self.logging.level.clone()));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
