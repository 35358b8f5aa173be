//! Implementation of `sift check`.

use std::process::ExitCode;

use serde_json::Value;
use sift_config::{ConfigWarning, discover_config_files};
use sift_engine::HttpEngine;

use crate::cli::{
    args::CheckCommand,
    context::CommandContext,
    output::{dim, header, subheader, warning},
};

/// Validates configuration and, unless offline, engine connectivity.
///
/// Exits with failure when there are warnings or the engine cannot be reached.
pub fn run(ctx: &CommandContext, cmd: &CheckCommand) -> ExitCode {
    println!("{}", header("Checking configuration"));
    println!();

    let config_files = discover_config_files(&ctx.cwd);
    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none found, using defaults)"));
    }
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    let config = &ctx.config;
    println!("{}", subheader("Engine:"));
    println!("   {}", config.engine.url);
    println!();

    let mut warnings = ctx.env_warnings.clone();
    warnings.extend(config.validate());

    let mut healthy = true;
    if !cmd.offline {
        healthy = check_engine(ctx);
        println!();
    }

    if warnings.is_empty() {
        println!("No configuration issues found.");
    } else {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   - {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }

    if warnings.is_empty() && healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Contacts the engine and prints what it reports about itself.
fn check_engine(ctx: &CommandContext) -> bool {
    println!("{}", subheader("Connectivity:"));
    let engine = match HttpEngine::from_config(&ctx.config.engine) {
        Ok(engine) => engine,
        Err(e) => {
            println!("   {}", warning(&e.to_string()));
            return false;
        }
    };
    match engine.health() {
        Ok(info) => {
            println!("   reachable {}", dim(&describe_engine(&info)));
            true
        }
        Err(e) => {
            println!("   {}", warning(&e.to_string()));
            false
        }
    }
}

/// Summarizes an engine root document as `cluster (version)`.
fn describe_engine(info: &Value) -> String {
    let cluster = info
        .get("cluster_name")
        .and_then(Value::as_str)
        .unwrap_or("unknown cluster");
    let version = info
        .pointer("/version/number")
        .and_then(Value::as_str)
        .unwrap_or("unknown version");
    format!("({cluster}, {version})")
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::EngineUrlNotHttp { .. } => {
                "Set [engine] url to an http:// or https:// address."
            }
            ConfigWarning::EmptyIndexName { .. } => "Give every [indices] entry a name.",
            ConfigWarning::ZeroPageSize => "Set [search] page_size to 1 or more.",
            ConfigWarning::ZeroBulkLimit => "Set [search] max_bulk_documents to 1 or more.",
            ConfigWarning::InvalidEnvValue { .. } => "Unset or correct the SIFT_* variable.",
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    if !hints.is_empty() {
        println!("{}", subheader("Hints:"));
        for hint in hints {
            println!("   - {hint}");
        }
    }
}
