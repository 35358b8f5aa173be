//! Environment variable overrides.
//!
//! Overrides are applied after file merging and take precedence over every config file.

use std::{env, time::Duration};

use crate::{Config, ConfigWarning};

/// Engine base URL.
pub const ENV_ENGINE_URL: &str = "SIFT_ENGINE_URL";
/// Engine API key.
pub const ENV_API_KEY: &str = "SIFT_API_KEY";
/// Engine request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "SIFT_TIMEOUT_MS";
/// Content index name.
pub const ENV_CONTENTS_INDEX: &str = "SIFT_CONTENTS_INDEX";
/// Publications index name.
pub const ENV_PUBLICATIONS_INDEX: &str = "SIFT_PUBLICATIONS_INDEX";
/// Profiles index name.
pub const ENV_PROFILES_INDEX: &str = "SIFT_PROFILES_INDEX";
/// Assets index name.
pub const ENV_ASSETS_INDEX: &str = "SIFT_ASSETS_INDEX";

/// Reads a trimmed, non-empty variable from the process environment.
#[must_use]
pub fn read_non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|raw| non_empty(&raw))
}

/// Trims `raw`, returning `None` when nothing is left.
fn non_empty(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Applies overrides from the process environment.
pub fn apply_process_overrides(config: &mut Config) -> Vec<ConfigWarning> {
    apply_overrides(config, |name| env::var(name).ok())
}

/// Applies overrides read through `lookup`, returning warnings for unusable values.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Vec<ConfigWarning>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).and_then(|raw| non_empty(&raw));
    let mut warnings = Vec::new();

    if let Some(url) = read(ENV_ENGINE_URL) {
        config.engine.url = url;
    }
    if let Some(key) = read(ENV_API_KEY) {
        config.engine.api_key = Some(key);
    }
    if let Some(raw) = read(ENV_TIMEOUT_MS) {
        match raw.parse::<u64>() {
            Ok(ms) => config.engine.timeout = Duration::from_millis(ms),
            Err(_) => warnings.push(ConfigWarning::InvalidEnvValue {
                name: ENV_TIMEOUT_MS.to_string(),
                value: raw,
            }),
        }
    }

    let indices = &mut config.indices;
    for (name, slot) in [
        (ENV_CONTENTS_INDEX, &mut indices.contents),
        (ENV_PUBLICATIONS_INDEX, &mut indices.publications),
        (ENV_PROFILES_INDEX, &mut indices.profiles),
        (ENV_ASSETS_INDEX, &mut indices.assets),
    ] {
        if let Some(index) = read(name) {
            *slot = index;
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_overrides_replace_merged_values() {
        let mut config = Config::default();
        let warnings = apply_overrides(
            &mut config,
            lookup(&[
                (ENV_ENGINE_URL, " https://prod:9243 "),
                (ENV_API_KEY, "k"),
                (ENV_TIMEOUT_MS, "500"),
                (ENV_PROFILES_INDEX, "profiles-v9"),
            ]),
        );
        assert!(warnings.is_empty());
        assert_eq!(config.engine.url, "https://prod:9243");
        assert_eq!(config.engine.api_key.as_deref(), Some("k"));
        assert_eq!(config.engine.timeout, Duration::from_millis(500));
        assert_eq!(config.indices.profiles, "profiles-v9");
        assert_eq!(config.indices.contents, "lens-test-data");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let mut config = Config::default();
        apply_overrides(&mut config, lookup(&[(ENV_ENGINE_URL, "   ")]));
        assert_eq!(config.engine.url, "http://localhost:9200");
    }

    #[test]
    fn test_invalid_timeout_warns() {
        let mut config = Config::default();
        let warnings = apply_overrides(&mut config, lookup(&[(ENV_TIMEOUT_MS, "soon")]));
        assert_eq!(
            warnings,
            vec![ConfigWarning::InvalidEnvValue {
                name: ENV_TIMEOUT_MS.into(),
                value: "soon".into(),
            }]
        );
        assert_eq!(config.engine.timeout, Duration::from_millis(360_000));
    }
}
