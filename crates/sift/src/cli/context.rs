//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_config::{Config, ConfigWarning};
use sift_engine::{HttpEngine, IndexNames, Lens};
use sift_query::Pagination;

use super::args::PageArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration with environment overrides applied.
    pub config: Config,
    /// Environment overrides that could not be applied.
    pub env_warnings: Vec<ConfigWarning>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let mut config = load_config_or_failure(&cwd)?;
        let env_warnings = config.apply_env();
        Ok(Self {
            cwd,
            config,
            env_warnings,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            env_warnings: Vec::new(),
        })
    }

    /// Index names from the configuration.
    pub fn indices(&self) -> IndexNames {
        IndexNames::from(&self.config.indices)
    }

    /// Builds the search facade over the configured engine.
    pub fn lens(&self) -> Result<Lens<HttpEngine>, ExitCode> {
        Lens::from_config(&self.config).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Resolves page selection against the configured page size.
    pub fn pagination(&self, args: &PageArgs) -> Pagination {
        let size = args
            .size
            .unwrap_or_else(|| i64::from(self.config.search.page_size));
        Pagination::new(args.page, size)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
