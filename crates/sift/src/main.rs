//! Command-line interface for sift.

mod cli;

use std::process::ExitCode;

use cli::{
    args::{Commands, parse_cli},
    commands,
    context::CommandContext,
    logging,
};
use tracing::warn;

fn main() -> ExitCode {
    let cli = parse_cli();

    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    logging::init(&ctx.config.logging);
    for warning in &ctx.env_warnings {
        warn!(%warning, "ignoring environment override");
    }

    commands::run(cli.command, &ctx)
}
