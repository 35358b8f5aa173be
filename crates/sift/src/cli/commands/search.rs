//! Implementation of the entity search commands.

use std::process::ExitCode;

use sift_query::{
    AssetQuery, ContentQuery, DateRange, ProfileQuery, PublicationQuery, SearchRequest,
    TextMatchMode, TextQuery,
};

use crate::cli::{
    args::{AssetsCommand, ContentsCommand, DateArgs, ProfilesCommand, PublicationsCommand},
    context::CommandContext,
    output::{print_explain, print_json},
};

/// Implements `sift publications`.
pub fn publications(ctx: &CommandContext, cmd: &PublicationsCommand) -> ExitCode {
    let request = PublicationQuery {
        query: text_query(&cmd.text, cmd.mode),
        shape: cmd.shape,
        bio: cmd.bio.clone(),
        from_users: cmd.from_users.clone(),
        mention_users: cmd.mention_users.clone(),
        app_id: cmd.app_id.clone(),
        min_collects: cmd.min_collects,
        min_mirror: cmd.min_mirror,
        min_comments: cmd.min_comments,
        min_profile_follower: cmd.min_profile_follower,
        min_profile_posts: cmd.min_profile_posts,
        dates: date_range(&cmd.dates),
        pagination: ctx.pagination(&cmd.page),
    };
    execute(ctx, request.into(), cmd.explain.explain)
}

/// Implements `sift profiles`.
pub fn profiles(ctx: &CommandContext, cmd: &ProfilesCommand) -> ExitCode {
    let request = ProfileQuery {
        query: text_query(&cmd.text, cmd.mode),
        bio: cmd.bio.clone(),
        owned_by: cmd.owned_by.clone(),
        min_follower: cmd.min_follower,
        min_posts: cmd.min_posts,
        min_publications: cmd.min_publications,
        min_comments: cmd.min_comments,
        pagination: ctx.pagination(&cmd.page),
    };
    execute(ctx, request.into(), cmd.explain.explain)
}

/// Implements `sift assets`.
pub fn assets(ctx: &CommandContext, cmd: &AssetsCommand) -> ExitCode {
    let request = AssetQuery {
        query: text_query(&cmd.text, cmd.mode),
        pagination: ctx.pagination(&cmd.page),
    };
    execute(ctx, request.into(), cmd.explain.explain)
}

/// Implements `sift contents`.
pub fn contents(ctx: &CommandContext, cmd: &ContentsCommand) -> ExitCode {
    let request = ContentQuery {
        query: text_query(&cmd.text, cmd.mode),
        shape: cmd.shape,
        app_id: cmd.app_id.clone(),
        profile_id: cmd.profile_id.clone(),
        dates: date_range(&cmd.dates),
        pagination: ctx.pagination(&cmd.page),
    };
    execute(ctx, request.into(), cmd.explain.explain)
}

/// Runs `request`, or prints its first-attempt engine request when `explain` is set.
fn execute(ctx: &CommandContext, request: SearchRequest, explain: bool) -> ExitCode {
    if explain {
        let indices = ctx.indices();
        return print_explain(indices.for_kind(request.kind()), &request.compile().to_body());
    }

    let lens = match ctx.lens() {
        Ok(lens) => lens,
        Err(code) => return code,
    };
    match lens.search(request) {
        Ok(result) => print_json(&result),
        Err(e) => {
            eprintln!("error: search failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Free text under `mode`.
fn text_query(text: &str, mode: TextMatchMode) -> TextQuery {
    TextQuery {
        text: text.to_string(),
        mode,
    }
}

/// Date window from the `--from`/`--to` flags.
fn date_range(args: &DateArgs) -> DateRange {
    DateRange::new(args.from, args.to)
}
