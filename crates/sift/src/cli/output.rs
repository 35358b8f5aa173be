//! Rendering of command results.
//!
//! Output is colored only when stdout is a terminal, so piped output stays plain JSON.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use serde_json::{Value, json};
pub use sift_highlight::{dim, header, subheader, warning};
use sift_highlight::Highlighter;
use sift_query::TermBucket;

/// Whether stdout is a terminal.
fn colored() -> bool {
    io::stdout().is_terminal()
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            if colored() {
                println!("{}", Highlighter::new().highlight_json(&json));
            } else {
                println!("{json}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints a TOML document.
pub fn print_toml(toml: &str) {
    if colored() {
        print!("{}", Highlighter::new().highlight_toml(toml));
    } else {
        print!("{toml}");
    }
}

/// Prints the request that would be sent to `index`.
pub fn print_explain(index: &str, body: &Value) -> ExitCode {
    if colored() {
        println!("{}", subheader("Index:"));
        println!("   {index}");
        println!();
        println!("{}", subheader("Request body:"));
    }
    print_json(&json!({ "index": index, "body": body }))
}

/// Prints aggregation buckets as JSON or as a table.
pub fn print_buckets(buckets: &[TermBucket], as_table: bool) -> ExitCode {
    if !as_table {
        return print_json(&buckets);
    }
    if buckets.is_empty() {
        println!("{}", dim("(no buckets)"));
        return ExitCode::SUCCESS;
    }
    println!("{}", bucket_table(buckets));
    ExitCode::SUCCESS
}

/// Renders buckets as a table; the score column appears only when some bucket has one.
fn bucket_table(buckets: &[TermBucket]) -> Table {
    let scored = buckets.iter().any(|b| b.score.is_some());
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    if scored {
        table.set_header(vec!["Term", "Docs", "Score"]);
    } else {
        table.set_header(vec!["Term", "Docs"]);
    }
    for bucket in buckets {
        let mut row = vec![Cell::new(&bucket.key), Cell::new(bucket.doc_count)];
        if scored {
            row.push(Cell::new(
                bucket.score.map(|s| format!("{s:.2}")).unwrap_or_default(),
            ));
        }
        table.add_row(row);
    }
    table
}
