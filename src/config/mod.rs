//! Client configuration, read from `~/.config/fuelroute/config.json`.
//!
//! Every key is optional. A missing file means all defaults.

mod error;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::model::RequestSource;

pub use error::ConfigError;

/// Service address used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/optimize-route/";

/// Environment variable that overrides [`Config::endpoint`].
pub const ENDPOINT_ENV: &str = "FUELROUTE_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the trip is POSTed to.
    pub endpoint: String,
    /// Whether the request body comes from the form or the fixed payload.
    pub request_source: RequestSource,
    /// Minimum level written to the log file (`error` .. `trace`, or `off`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_source: RequestSource::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the user's config file and applies the environment override.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_path(&Self::default_path()?)?;
        Ok(config.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok()))
    }

    /// `<config_dir>/fuelroute/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("fuelroute").join("config.json"))
    }

    /// Reads a config file, falling back to defaults when it does not exist.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the endpoint when `endpoint` is set and not blank.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        self
    }

    /// Parsed log level; unrecognised values fall back to `Info`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
