//! Log output for the CLI.
//!
//! Logs go to stderr so stdout carries only command output.

use std::io;

use sift_config::{LogFormat, LoggingSettings, read_non_empty_env};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable overriding the configured filter directive.
pub const ENV_LOG: &str = "SIFT_LOG";

/// Filter used when the configured directive does not parse.
const FALLBACK_FILTER: &str = "warn";

/// Installs the global subscriber described by `settings`.
pub fn init(settings: &LoggingSettings) {
    let directive = filter_directive(read_non_empty_env(ENV_LOG), settings);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("warning: invalid log filter '{directive}': {e}");
        EnvFilter::new(FALLBACK_FILTER)
    });

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match settings.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr).with_target(true))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(io::stderr).with_target(true))
            .try_init(),
    };
    if let Err(e) = installed {
        eprintln!("warning: could not install logger: {e}");
    }
}

/// Picks the filter directive: the environment first, then the configuration.
fn filter_directive(from_env: Option<String>, settings: &LoggingSettings) -> String {
    from_env.unwrap_or_else(|| settings.filter.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directive_wins() {
        let settings = LoggingSettings::default();
        assert_eq!(
            filter_directive(Some("sift_engine=debug".into()), &settings),
            "sift_engine=debug"
        );
        assert_eq!(filter_directive(None, &settings), "warn");
    }

    #[test]
    fn configured_directives_parse() {
        for directive in ["warn", "sift_engine=debug,info", "off"] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
        }
    }
}
