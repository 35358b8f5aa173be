//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use serde_with::{DurationMilliSeconds, serde_as};

use crate::{ConfigError, LogFormat};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Search engine connection section.
    pub engine: Option<RawEngineSettings>,
    /// Index names section.
    pub indices: Option<RawIndexSettings>,
    /// Search behavior section.
    pub search: Option<RawSearchSettings>,
    /// Logging section.
    pub logging: Option<RawLoggingSettings>,
}

/// Raw engine connection settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEngineSettings {
    /// Base URL of the engine.
    pub url: Option<String>,
    /// API key sent with every request.
    pub api_key: Option<String>,
    /// Request timeout in milliseconds.
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub timeout_ms: Option<Duration>,
    /// Whether to accept invalid TLS certificates.
    pub accept_invalid_certs: Option<bool>,
}

/// Raw index names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Ingested content index.
    pub contents: Option<String>,
    /// Publications index.
    pub publications: Option<String>,
    /// Profiles index.
    pub profiles: Option<String>,
    /// Collectible assets index.
    pub assets: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Default page size.
    pub page_size: Option<u32>,
    /// Largest accepted ingestion batch.
    pub max_bulk_documents: Option<usize>,
    /// Default trailing window of the trend report, in days.
    pub trend_days: Option<u32>,
    /// Default number of trending terms.
    pub trend_size: Option<u32>,
    /// Default number of application identifiers.
    pub app_id_size: Option<u32>,
}

/// Raw logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLoggingSettings {
    /// Log filter directive.
    pub filter: Option<String>,
    /// Output format.
    pub format: Option<LogFormat>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks whether a config file sets `root = true`.
///
/// Unreadable or malformed files are not roots; the error surfaces later when parsing.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
