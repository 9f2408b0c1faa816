//! Configuration management for Xenophon
//!
//! The configuration lives in `~/.xenophon/config.json` next to the default
//! history database. It selects the storage engine, where that engine keeps
//! its data, and the default log level.

use crate::error::{Error, Result};
use crate::storage::EngineKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding config and data
pub const CONFIG_DIR: &str = ".xenophon";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default history database file name
pub const DEFAULT_DATABASE_FILE: &str = "history.db";

/// Main configuration structure for Xenophon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage engine identifier ("sqlite3" or "memory")
    pub storage_engine: String,

    /// Path to the history database
    pub database_path: PathBuf,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Configuration for logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        let database_path = config_home()
            .unwrap_or_else(|_| fallback_home())
            .join(DEFAULT_DATABASE_FILE);

        Self {
            storage_engine: EngineKind::default().to_string(),
            database_path,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// The per-user directory holding config and data
pub fn config_home() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(Error::HomeDirectoryNotFound)?;
    Ok(home.join(CONFIG_DIR))
}

/// Where data goes when there is no home directory
///
/// This is shared, world-writable space. `CliApp::new` warns whenever the
/// database ends up here.
pub fn fallback_home() -> PathBuf {
    std::env::temp_dir().join(CONFIG_DIR)
}

impl Config {
    /// Whether the database lives under [`fallback_home`]
    pub fn uses_fallback_home(&self) -> bool {
        self.database_path.starts_with(fallback_home())
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path, defaulting when it is missing
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, writing the defaults there first if
    /// the file does not exist yet
    ///
    /// Returns the configuration and whether the file was created.
    pub fn load_or_create(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            return Ok((Self::load_from_path(path)?, false));
        }

        let config = Self::default();
        config.save_to_path(path)?;
        Ok((config, true))
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(config_home()?.join(DEFAULT_CONFIG_FILE))
    }

    /// Parse the configured storage engine
    pub fn engine_kind(&self) -> Result<EngineKind> {
        self.storage_engine.parse()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::config_validation(
                "database_path",
                "must not be empty",
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Error::config_validation(
                    "logging.level",
                    "must be one of: trace, debug, info, warn, error",
                ))
            }
        }

        Ok(())
    }
}
