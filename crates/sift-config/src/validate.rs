//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The engine URL does not use an http or https scheme.
    EngineUrlNotHttp {
        /// The configured URL.
        url: String,
    },
    /// An index name is empty.
    EmptyIndexName {
        /// Which index setting is empty.
        index: &'static str,
    },
    /// The default page size is zero and will be clamped to one.
    ZeroPageSize,
    /// The ingestion batch limit is zero, so every batch will be rejected.
    ZeroBulkLimit,
    /// An environment override could not be parsed and was ignored.
    InvalidEnvValue {
        /// Variable name.
        name: String,
        /// Rejected value.
        value: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngineUrlNotHttp { url } => {
                write!(f, "engine url is not http(s): {url}")
            }
            Self::EmptyIndexName { index } => {
                write!(f, "index name for '{index}' is empty")
            }
            Self::ZeroPageSize => write!(f, "search.page_size is 0; pages will hold 1 result"),
            Self::ZeroBulkLimit => {
                write!(f, "search.max_bulk_documents is 0; all ingestion will be rejected")
            }
            Self::InvalidEnvValue { name, value } => {
                write!(f, "ignoring {name}: invalid value '{value}'")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let url = config.engine.url.as_str();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        warnings.push(ConfigWarning::EngineUrlNotHttp {
            url: url.to_string(),
        });
    }

    let indices = &config.indices;
    for (index, name) in [
        ("contents", &indices.contents),
        ("publications", &indices.publications),
        ("profiles", &indices.profiles),
        ("assets", &indices.assets),
    ] {
        if name.trim().is_empty() {
            warnings.push(ConfigWarning::EmptyIndexName { index });
        }
    }

    if config.search.page_size == 0 {
        warnings.push(ConfigWarning::ZeroPageSize);
    }
    if config.search.max_bulk_documents == 0 {
        warnings.push(ConfigWarning::ZeroBulkLimit);
    }

    warnings
}
