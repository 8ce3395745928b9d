//! Application configuration with persistence.
//!
//! # Configuration File Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/cardfold/config.json`
//! - macOS: `~/Library/Application Support/cardfold/config.json`
//! - Windows: `%APPDATA%/cardfold/config.json`
//!
//! A different file can be given with `--config`; loading and saving have
//! `_from`/`_to` variants taking an explicit path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_ANIMATION_MS, DEFAULT_ROW_COUNT, MAX_ANIMATION_MS};
use crate::error::{CardfoldError, Result};
use crate::theme::Theme;

// ============================================================================
// Constants
// ============================================================================

/// Application name used for configuration directory.
pub const APP_NAME: &str = "cardfold";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// AppConfig
// ============================================================================

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Colors for every widget.
    pub theme: Theme,
    /// Duration of each toggle phase in milliseconds.
    pub animation_ms: u64,
    /// Number of demo rows to show.
    pub rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            animation_ms: DEFAULT_ANIMATION_MS,
            rows: DEFAULT_ROW_COUNT,
        }
    }
}

impl AppConfig {
    /// Returns the path to the default configuration file, creating its
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or(CardfoldError::ConfigDir)?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from the default location.
    ///
    /// Falls back to defaults if the file is missing or invalid.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path().map_or_else(
            |err| {
                tracing::warn!(%err, "config path unavailable, using defaults");
                Self::default()
            },
            |path| Self::load_from(&path),
        )
    }

    /// Loads the configuration from `path`, falling back to defaults.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "config load failed, using defaults");
                Self::default()
            }
        }
    }

    /// Attempts to load and validate the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a value is
    /// out of range.
    pub fn try_load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`CardfoldError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.animation_ms > MAX_ANIMATION_MS {
            return Err(CardfoldError::invalid_config(
                "animation_ms",
                format!("must be at most {MAX_ANIMATION_MS}, got {}", self.animation_ms),
            ));
        }
        if self.rows == 0 {
            return Err(CardfoldError::invalid_config("rows", "must be at least 1"));
        }
        Ok(())
    }

    /// Duration of one toggle phase.
    #[must_use]
    pub const fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================
