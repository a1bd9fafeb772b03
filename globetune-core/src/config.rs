use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Longest accepted search debounce window
pub const MAX_DEBOUNCE_MS: u64 = 5000;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Playback policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Start playing the first track as soon as a region is selected
    #[serde(default)]
    pub auto_play_on_region_select: bool,
    /// Start playing when a track row is clicked
    #[serde(default)]
    pub auto_play_on_track_select: bool,
    /// Keep playing after next/previous
    #[serde(default = "default_true")]
    pub resume_on_skip: bool,
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_seek_step() -> u64 {
    5
}

impl PlayerConfig {
    #[must_use]
    pub const fn seek_step(&self) -> Duration {
        Duration::from_secs(self.seek_step_secs)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            auto_play_on_region_select: false,
            auto_play_on_track_select: false,
            resume_on_skip: default_true(),
            seek_step_secs: default_seek_step(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_debounce_ms() -> u64 {
    220
}

impl SearchConfig {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (`.toml` or `.json`). The built-in sample is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to the cache directory
    #[serde(default)]
    pub enabled: bool,
}

impl Config {
    /// Get the configuration directory path (~/.config/globetune/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/globetune/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from the default location, writing a template on first run
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigNotFound`] after writing the template, or an
    /// error if the file cannot be read, parsed or validated.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path())
    }

    /// Same as [`Config::load_or_create`] for an explicit path
    ///
    /// # Errors
    ///
    /// See [`Config::load_or_create`].
    pub fn load_or_create_at(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(config_path, CONFIG_TEMPLATE)?;

            return Err(CoreError::ConfigNotFound {
                path: config_path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(config_path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate config text
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigInvalid`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "search.debounce_ms must be at most {MAX_DEBOUNCE_MS}, got {}",
                    self.search.debounce_ms
                ),
            });
        }
        if self.player.seek_step_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "player.seek_step_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Commented config written on first run
pub const CONFIG_TEMPLATE: &str = r##"# Globetune Configuration
# ~/.config/globetune/config.toml

[player]
# Start playing the first track when a country is clicked
auto_play_on_region_select = false
# Start playing when a track row is clicked (the play button always plays)
auto_play_on_track_select = false
# Keep playing after next/previous
resume_on_skip = true
# Step used by fast-forward and rewind
seek_step_secs = 5

[search]
# Quiet time before a search query is applied (max 5000)
debounce_ms = 220

[catalog]
# Catalog file, .toml or .json. The built-in sample is used when unset.
# path = "/path/to/catalog.toml"

[logging]
# Also write logs to ~/.cache/globetune/globetune.log
enabled = false
"##;
