//! Implementation of `sift index`.

use std::{
    fs,
    io::{self, Read},
    path::Path,
    process::ExitCode,
};

use sift_engine::parse_contents;

use crate::cli::{args::IndexCommand, context::CommandContext, output::print_json};

/// Ingests a batch of content documents into the content index.
pub fn run(ctx: &CommandContext, cmd: &IndexCommand) -> ExitCode {
    let json = match read_input(&cmd.file) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", cmd.file.display());
            return ExitCode::FAILURE;
        }
    };

    let documents = match parse_contents(&json) {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("error: invalid content documents: {e}");
            return ExitCode::FAILURE;
        }
    };

    let lens = match ctx.lens() {
        Ok(lens) => lens,
        Err(code) => return code,
    };
    match lens.index_contents(documents) {
        Ok(summary) => {
            let code = print_json(&summary);
            if summary.failed > 0 {
                eprintln!("error: {} documents were rejected", summary.failed);
                return ExitCode::FAILURE;
            }
            code
        }
        Err(e) => {
            eprintln!("error: indexing failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads `path`, or stdin when the path is `-`.
fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut json = String::new();
        io::stdin().read_to_string(&mut json)?;
        return Ok(json);
    }
    fs::read_to_string(path)
}
