//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. An explicit path (`--config`)
//! 2. `$MODCOMPAT_CONFIG` if set
//! 3. `./modcompat.toml`
//! 4. `$XDG_CONFIG_HOME/modcompat/config.toml`
//! 5. `~/.modcompat/config.toml`
//!
//! No file at all is not an error: defaults apply.
//!
//! # Plugin Sections
//!
//! Plugins claim their section names through a [`SectionRegistry`] and
//! read them back with [`Config::section`].
//!
//! # Example
//!
//! ```no_run
//! use modcompat::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(None, Path::new(".")).unwrap();
//! println!("Keep going: {}", config.keep_going());
//! ```

pub mod schema;

pub use schema::{ConfigFile, ScanSettings, SectionRegistry};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MODCOMPAT_CONFIG";

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "modcompat.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid [{section}] section: {message}")]
    InvalidSection { section: String, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated while checking configuration.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The file that triggered the warning, if any.
    pub path: Option<PathBuf>,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults if no file was found)
    pub file: ConfigFile,
    /// Path of the file that was loaded
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the first location that exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist, or if the
    /// selected file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        for candidate in Self::search_paths(cwd) {
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }

        Ok(Config::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Config {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Candidate locations after an explicit path, in search order.
    fn search_paths(cwd: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }

        paths.push(cwd.join(LOCAL_CONFIG_FILE));

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join("modcompat/config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".modcompat/config.toml"));
        }

        paths
    }

    /// Deserialize a plugin section.
    ///
    /// Returns `Ok(None)` if the file has no such section.
    pub fn section<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ConfigError> {
        let Some(table) = self.file.sections.get(name) else {
            return Ok(None);
        };

        toml::Value::Table(table.clone())
            .try_into()
            .map(Some)
            .map_err(|e| ConfigError::InvalidSection {
                section: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Report sections that no plugin registered.
    pub fn unclaimed_sections(&self, registry: &SectionRegistry) -> Vec<ConfigWarning> {
        self.file
            .sections
            .keys()
            .filter(|name| !registry.is_registered(name))
            .map(|name| ConfigWarning {
                message: format!("unknown config section [{}] is ignored", name),
                path: self.path.clone(),
            })
            .collect()
    }

    /// Check if a session continues after a per-archive failure.
    ///
    /// Defaults to `true` if not configured.
    pub fn keep_going(&self) -> bool {
        self.file
            .scan
            .as_ref()
            .and_then(|s| s.keep_going)
            .unwrap_or(true)
    }

    /// Get the path of the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
