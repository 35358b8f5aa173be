//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence. Environment
//! variables (`SIFT_ENGINE_URL`, `SIFT_API_KEY`, ...) override the merged result.

#![warn(missing_docs)]

mod discovery;
mod env;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use env::{
    ENV_API_KEY, ENV_ASSETS_INDEX, ENV_CONTENTS_INDEX, ENV_ENGINE_URL, ENV_PROFILES_INDEX,
    ENV_PUBLICATIONS_INDEX, ENV_TIMEOUT_MS, read_non_empty_env,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawEngineSettings, RawIndexSettings, RawLoggingSettings, RawSearchSettings,
    parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
pub use templates::config_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Placeholder printed instead of a configured API key.
const REDACTED: &str = "<redacted>";

/// Top-level merged configuration for sift.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.sift.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Search engine connection.
    pub engine: EngineSettings,
    /// Index names per entity kind.
    pub indices: IndexSettings,
    /// Search behavior defaults.
    pub search: SearchSettings,
    /// Logging output.
    pub logging: LoggingSettings,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found. Environment
    /// overrides are not applied; see [`Config::apply_env`].
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Applies `SIFT_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Vec<ConfigWarning> {
        env::apply_process_overrides(self)
    }

    /// Applies `SIFT_*` overrides read through `lookup`.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Vec<ConfigWarning>
    where
        F: Fn(&str) -> Option<String>,
    {
        env::apply_overrides(self, lookup)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - An engine URL without an http(s) scheme
    /// - Empty index names
    /// - A zero page size or ingestion batch limit
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.sift.toml` file. A configured API key is
    /// replaced by a placeholder.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let mut engine = self.engine.clone();
        if engine.api_key.is_some() {
            engine.api_key = Some(REDACTED.to_string());
        }
        let serializable = SerializableSettings {
            engine,
            indices: self.indices.clone(),
            search: self.search.clone(),
            logging: self.logging.clone(),
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Search engine connection settings.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Base URL of the engine.
    pub url: String,
    /// API key sent as `Authorization: ApiKey <key>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout.
    #[serde(rename = "timeout_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub timeout: Duration,
    /// Whether to accept invalid TLS certificates.
    pub accept_invalid_certs: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:9200"),
            api_key: None,
            timeout: Duration::from_millis(360_000),
            accept_invalid_certs: false,
        }
    }
}

/// Index names per entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Ingested content index.
    pub contents: String,
    /// Publications index.
    pub publications: String,
    /// Profiles index.
    pub profiles: String,
    /// Collectible assets index.
    pub assets: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            contents: String::from("lens-test-data"),
            publications: String::from("lens-final-posts-data"),
            profiles: String::from("lens-final-profiles-data"),
            assets: String::from("lens-nfts-test-data"),
        }
    }
}

/// Search behavior defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Default page size.
    pub page_size: u32,
    /// Largest accepted ingestion batch.
    pub max_bulk_documents: usize,
    /// Default trailing window of the trend report, in days.
    pub trend_days: u32,
    /// Default number of trending terms.
    pub trend_size: u32,
    /// Default number of application identifiers.
    pub app_id_size: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_bulk_documents: 100,
            trend_days: 2,
            trend_size: 20,
            app_id_size: 20,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `warn` or `sift_engine=debug`.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: String::from("warn"),
            format: LogFormat::default(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Engine connection.
    engine: EngineSettings,
    /// Index names.
    indices: IndexSettings,
    /// Search defaults.
    search: SearchSettings,
    /// Logging.
    logging: LoggingSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ConfigTree, layer_host};

    #[test]
    fn test_engine_defaults() {
        let engine = EngineSettings::default();
        assert_eq!(engine.url, "http://localhost:9200");
        assert!(engine.api_key.is_none());
        assert_eq!(engine.timeout, Duration::from_secs(360));
        assert!(!engine.accept_invalid_certs);
    }

    #[test]
    fn test_search_defaults() {
        let search = SearchSettings::default();
        assert_eq!(search.page_size, 10);
        assert_eq!(search.max_bulk_documents, 100);
        assert_eq!(search.trend_days, 2);
    }

    #[test]
    fn test_settings_to_toml() {
        let toml = Config::default().settings_to_toml().unwrap();

        assert!(toml.contains("[engine]"));
        assert!(toml.contains("[indices]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[logging]"));
        assert!(toml.contains("timeout_ms = 360000"));
        assert!(toml.contains("format = \"compact\""));

        let parsed = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(parsed.search.unwrap().page_size, Some(10));
    }

    #[test]
    fn test_settings_to_toml_redacts_api_key() {
        let mut config = Config::default();
        config.engine.api_key = Some("very-secret".into());
        let toml = config.settings_to_toml().unwrap();
        assert!(!toml.contains("very-secret"));
        assert!(toml.contains(REDACTED));
    }

    #[test]
    fn test_load_merges_layers_up_to_root() {
        let tree = ConfigTree::new();
        tree.layer("");
        tree.root_layer("project");
        tree.layer("project/feed");
        let cwd = tree.dir("project/feed/src");

        let config = Config::load(&cwd).unwrap();

        let feed = layer_host("project/feed");
        assert_eq!(config.engine.url, format!("http://{feed}:9200"));
        assert_eq!(config.indices.contents, layer_host("project"));
        assert_eq!(config.indices.assets, "lens-nfts-test-data");
    }
}
