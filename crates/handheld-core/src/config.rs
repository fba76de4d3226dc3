//! Configuration persistence
//!
//! Saves and loads user preferences such as the data directory and the
//! lockout policy.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StoreError};
use crate::lockout::LockoutPolicy;
use crate::store::FileStore;
use crate::{LOCK_SECONDS, MAX_ATTEMPTS};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "handheld";

/// Settings shared by the terminal app and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the key-value store (defaults to the platform data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Failed attempts allowed before locking
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds a lock lasts
    #[serde(default = "default_lock_seconds")]
    pub lock_seconds: u64,

    /// Use the high-contrast terminal theme
    #[serde(default)]
    pub high_contrast: bool,
}

fn default_max_attempts() -> u32 {
    MAX_ATTEMPTS
}

fn default_lock_seconds() -> u64 {
    LOCK_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_attempts: MAX_ATTEMPTS,
            lock_seconds: LOCK_SECONDS,
            high_contrast: false,
        }
    }
}

impl Config {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_file = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&config_file)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Lockout policy described by this configuration
    pub fn lockout_policy(&self) -> LockoutPolicy {
        LockoutPolicy::new(self.max_attempts, Duration::from_secs(self.lock_seconds))
    }

    /// Resolved store directory
    pub fn resolve_data_dir(&self) -> Result<PathBuf, StoreError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStore::default_dir(),
        }
    }
}
