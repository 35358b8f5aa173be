//! Implementation of `sift comments`.

use std::process::ExitCode;

use sift_query::{CommentsQuery, compile_comments};

use crate::cli::{
    args::CommentsCommand,
    context::CommandContext,
    output::{print_explain, print_json},
};

/// Lists comments attached to a publication.
pub fn run(ctx: &CommandContext, cmd: &CommentsCommand) -> ExitCode {
    let request = CommentsQuery {
        publication_id: cmd.publication_id.clone(),
        pagination: ctx.pagination(&cmd.page),
    };

    if cmd.explain.explain {
        let body = compile_comments(&request).to_body();
        return print_explain(&ctx.config.indices.publications, &body);
    }

    let lens = match ctx.lens() {
        Ok(lens) => lens,
        Err(code) => return code,
    };
    match lens.publication_comments(request) {
        Ok(result) => print_json(&result),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
