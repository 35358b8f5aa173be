//! Command implementations and dispatch.

pub mod check;
pub mod comments;
pub mod config;
pub mod index;
pub mod init;
pub mod reports;
pub mod search;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Publications(cmd) => search::publications(ctx, &cmd),
        Commands::Profiles(cmd) => search::profiles(ctx, &cmd),
        Commands::Assets(cmd) => search::assets(ctx, &cmd),
        Commands::Contents(cmd) => search::contents(ctx, &cmd),
        Commands::Comments(cmd) => comments::run(ctx, &cmd),
        Commands::Trends(cmd) => reports::trends(ctx, &cmd),
        Commands::AppIds(cmd) => reports::app_ids(ctx, &cmd),
        Commands::Index(cmd) => index::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check(cmd) => check::run(ctx, &cmd),
    }
}
