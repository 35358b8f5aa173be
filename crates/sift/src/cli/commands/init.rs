//! Implementation of `sift init`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_config::{CONFIG_FILENAME, config_template, global_config_path};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{dim, print_toml, subheader},
};

/// Writes the commented configuration template to a new `.sift.toml`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let target = match init_target(&ctx.cwd, cmd.global) {
        Ok(path) => path,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    if target.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", target.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = config_template();
    if let Err(e) = fs::write(&target, &template) {
        eprintln!("error: failed to write {}: {e}", target.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", target.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    print_toml(&template);
    println!("{}", dim("Uncomment [engine] url, then run `sift check`."));

    ExitCode::SUCCESS
}

/// Picks the file to create: the global config for `--global` or when run from the home
/// directory, otherwise `.sift.toml` in `cwd`.
fn init_target(cwd: &Path, global: bool) -> Result<PathBuf, &'static str> {
    let global_path = global_config_path();
    let in_home = global_path
        .as_deref()
        .and_then(Path::parent)
        .is_some_and(|home| home == cwd);

    if global || in_home {
        global_path.ok_or("could not determine home directory")
    } else {
        Ok(cwd.join(CONFIG_FILENAME))
    }
}
