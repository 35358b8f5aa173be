//! Implementation of `sift trends` and `sift app-ids`.

use std::process::ExitCode;

use chrono::Utc;
use sift_query::AggregationSpec;

use crate::cli::{
    args::{AppIdsCommand, TrendsCommand},
    context::CommandContext,
    output::{print_buckets, print_explain},
};

/// Reports terms trending in recently ingested content.
pub fn trends(ctx: &CommandContext, cmd: &TrendsCommand) -> ExitCode {
    let size = cmd.size.unwrap_or(ctx.config.search.trend_size);
    let days = cmd.days.unwrap_or(ctx.config.search.trend_days);

    if cmd.explain.explain {
        let spec = AggregationSpec::trending(size, days, Utc::now());
        return print_explain(&ctx.config.indices.contents, &spec.to_body());
    }

    let lens = match ctx.lens() {
        Ok(lens) => lens,
        Err(code) => return code,
    };
    match lens.trending_terms(size, days) {
        Ok(buckets) => print_buckets(&buckets, cmd.table),
        Err(e) => {
            eprintln!("error: trend report failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reports the most common publishing applications.
pub fn app_ids(ctx: &CommandContext, cmd: &AppIdsCommand) -> ExitCode {
    let size = cmd.size.unwrap_or(ctx.config.search.app_id_size);

    if cmd.explain.explain {
        let spec = AggregationSpec::app_ids(size);
        return print_explain(&ctx.config.indices.publications, &spec.to_body());
    }

    let lens = match ctx.lens() {
        Ok(lens) => lens,
        Err(code) => return code,
    };
    match lens.distinct_app_ids(size) {
        Ok(buckets) => print_buckets(&buckets, cmd.table),
        Err(e) => {
            eprintln!("error: application report failed: {e}");
            ExitCode::FAILURE
        }
    }
}
