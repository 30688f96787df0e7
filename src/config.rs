// SPDX-License-Identifier: GPL-3.0-only

//! Persisted user preferences

use crate::constants::{APP_CONFIG_DIR, CONFIG_FILE_NAME};
use crate::errors::ConfigError;
use crate::selection::ConfigSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferences used when none are given explicitly, highest priority first
    pub preferences: Vec<ConfigSpec>,
    /// List every format instead of only the top entries
    pub show_all_formats: bool,
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults if no file exists
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`. A missing file yields the default config.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_error)?;

        info!(path = %path.display(), "Saved config");
        Ok(())
    }
}
