//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Environment variables
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Declaration manifest settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest used when `--manifest` is not given
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_manifest_path() -> PathBuf {
    PathBuf::from("transitions.toml")
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./transition-graph.toml
    /// 2. ~/.transition-graph/config.toml
    /// 3. /etc/transition-graph/config.toml
    pub fn load() -> Result<Self> {
        let mut paths = vec![PathBuf::from("transition-graph.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".transition-graph").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/transition-graph/config.toml"));

        for path in paths {
            if path.exists() {
                tracing::debug!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Resolve the manifest path, preferring an explicit override
    pub fn manifest_path(&self, overridden: Option<PathBuf>) -> PathBuf {
        overridden.unwrap_or_else(|| self.manifest.path.clone())
    }
}
