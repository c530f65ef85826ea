//! Configuration file loading for the console.
//!
//! Settings come from `chessrules.toml` in the working directory unless a
//! path is given on the command line. A missing default file yields the
//! defaults; a missing explicit file is an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Board rendering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Print the destination grid after a `moves` command.
    #[serde(default = "default_true")]
    pub show_destinations: bool,
    /// Print rank numbers and file letters around grids.
    #[serde(default = "default_true")]
    pub coordinates: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            show_destinations: true,
            coordinates: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Console configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default `tracing` filter, e.g. "info" or "chessrules=debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: default_log_level(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// With `path` set the file must exist. Without it, [`Self::default_path()`]
    /// is read if present and the defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = Self::default_path();
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns `chessrules.toml` in the current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chessrules.toml")
    }
}
