//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`. For every scalar the
//! first defined value wins, so files closer to the working directory take precedence.

use std::path::PathBuf;

use crate::{
    Config, EngineSettings, IndexSettings, LoggingSettings, SearchSettings,
    parse::{
        RawConfig, RawEngineSettings, RawIndexSettings, RawLoggingSettings, RawSearchSettings,
    },
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), lowest precedence last (global config).
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Lowest precedence first, so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(engine) = &raw.engine {
            apply_raw_engine(&mut config.engine, engine);
        }
        if let Some(indices) = &raw.indices {
            apply_raw_indices(&mut config.indices, indices);
        }
        if let Some(search) = &raw.search {
            apply_raw_search(&mut config.search, search);
        }
        if let Some(logging) = &raw.logging {
            apply_raw_logging(&mut config.logging, logging);
        }
    }

    config
}

/// Applies raw engine settings, overwriting any present values.
fn apply_raw_engine(result: &mut EngineSettings, raw: &RawEngineSettings) {
    if let Some(ref v) = raw.url {
        result.url = v.clone();
    }
    if let Some(ref v) = raw.api_key {
        result.api_key = Some(v.clone());
    }
    if let Some(v) = raw.timeout_ms {
        result.timeout = v;
    }
    if let Some(v) = raw.accept_invalid_certs {
        result.accept_invalid_certs = v;
    }
}

/// Applies raw index names.
fn apply_raw_indices(result: &mut IndexSettings, raw: &RawIndexSettings) {
    if let Some(ref v) = raw.contents {
        result.contents = v.clone();
    }
    if let Some(ref v) = raw.publications {
        result.publications = v.clone();
    }
    if let Some(ref v) = raw.profiles {
        result.profiles = v.clone();
    }
    if let Some(ref v) = raw.assets {
        result.assets = v.clone();
    }
}

/// Applies raw search settings.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.page_size {
        result.page_size = v;
    }
    if let Some(v) = raw.max_bulk_documents {
        result.max_bulk_documents = v;
    }
    if let Some(v) = raw.trend_days {
        result.trend_days = v;
    }
    if let Some(v) = raw.trend_size {
        result.trend_size = v;
    }
    if let Some(v) = raw.app_id_size {
        result.app_id_size = v;
    }
}

/// Applies raw logging settings.
fn apply_raw_logging(result: &mut LoggingSettings, raw: &RawLoggingSettings) {
    if let Some(ref v) = raw.filter {
        result.filter = v.clone();
    }
    if let Some(v) = raw.format {
        result.format = v;
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use super::*;
    use crate::{LogFormat, parse::parse_config_str};

    fn parsed(path: &str, contents: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(contents, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_is_default() {
        let config = merge_configs(&[]);
        assert_eq!(config.engine.url, "http://localhost:9200");
    }

    #[test]
    fn test_first_defined_value_wins() {
        let configs = [
            parsed("/work/project/.sift.toml", "[search]\npage_size = 50\n"),
            parsed(
                "/home/me/.sift.toml",
                "[search]\npage_size = 5\ntrend_days = 7\n",
            ),
        ];
        let config = merge_configs(&configs);
        assert_eq!(config.search.page_size, 50);
        assert_eq!(config.search.trend_days, 7);
    }

    #[test]
    fn test_sections_merge_independently() {
        let configs = [
            parsed("/a/.sift.toml", "[engine]\napi_key = \"local\"\n"),
            parsed(
                "/.sift.toml",
                "[engine]\nurl = \"https://es:9243\"\ntimeout_ms = 2000\n\n[logging]\nformat = \"json\"\n",
            ),
        ];
        let config = merge_configs(&configs);
        assert_eq!(config.engine.url, "https://es:9243");
        assert_eq!(config.engine.api_key.as_deref(), Some("local"));
        assert_eq!(config.engine.timeout, Duration::from_millis(2000));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_index_names_override_individually() {
        let configs = [parsed(
            "/a/.sift.toml",
            "[indices]\nassets = \"nfts-v3\"\n",
        )];
        let config = merge_configs(&configs);
        assert_eq!(config.indices.assets, "nfts-v3");
        assert_eq!(config.indices.profiles, "lens-final-profiles-data");
    }
}
