//! Clap argument definitions for the `sift` CLI.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use sift_query::{ResultShape, TextMatchMode};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Faceted search over content, publications, profiles and assets")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Page selection shared by listing commands.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Page number, 1-based; values below 1 select the first page
    #[arg(short = 'p', long, default_value = "1", allow_negative_numbers = true)]
    pub page: i64,

    /// Results per page [default: search.page_size, 10]
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub size: Option<i64>,
}

/// Shared explain flag.
#[derive(Args, Debug, Clone, Default)]
pub struct ExplainArgs {
    /// Print the engine request instead of sending it
    #[arg(long)]
    pub explain: bool,
}

/// Date window shared by searches over dated documents.
#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long = "from")]
    pub from: Option<NaiveDate>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long = "to")]
    pub to: Option<NaiveDate>,
}

/// Arguments for `sift publications`.
#[derive(Args, Debug, Clone)]
pub struct PublicationsCommand {
    /// Free text
    #[arg(default_value = "")]
    pub text: String,

    /// Matching mode: exact_phrase, all_words, any_words, hashtags, none_of_words
    #[arg(short = 'm', long, default_value = "any_words")]
    pub mode: TextMatchMode,

    /// Result shape: latest, links, photo, video, top
    #[arg(short = 's', long, default_value = "top")]
    pub shape: ResultShape,

    /// Author biography
    #[arg(long)]
    pub bio: Option<String>,

    /// Author handle
    #[arg(long)]
    pub from_users: Option<String>,

    /// Mentioned profiles
    #[arg(long)]
    pub mention_users: Option<String>,

    /// Publishing application
    #[arg(long)]
    pub app_id: Option<String>,

    /// Minimum collects
    #[arg(long)]
    pub min_collects: Option<i64>,

    /// Minimum mirrors
    #[arg(long)]
    pub min_mirror: Option<i64>,

    /// Minimum comments
    #[arg(long)]
    pub min_comments: Option<i64>,

    /// Minimum author followers
    #[arg(long)]
    pub min_profile_follower: Option<i64>,

    /// Minimum author posts
    #[arg(long)]
    pub min_profile_posts: Option<i64>,

    #[command(flatten)]
    /// Creation-date window.
    pub dates: DateArgs,

    #[command(flatten)]
    /// Page selection.
    pub page: PageArgs,

    #[command(flatten)]
    /// Explain flag.
    pub explain: ExplainArgs,
}

/// Arguments for `sift profiles`.
#[derive(Args, Debug, Clone)]
pub struct ProfilesCommand {
    /// Free text
    #[arg(default_value = "")]
    pub text: String,

    /// Matching mode: exact_phrase, all_words, any_words, hashtags, none_of_words
    #[arg(short = 'm', long, default_value = "any_words")]
    pub mode: TextMatchMode,

    /// Biography
    #[arg(long)]
    pub bio: Option<String>,

    /// Owning address
    #[arg(long)]
    pub owned_by: Option<String>,

    /// Minimum followers
    #[arg(long)]
    pub min_follower: Option<i64>,

    /// Minimum posts
    #[arg(long)]
    pub min_posts: Option<i64>,

    /// Minimum publications
    #[arg(long)]
    pub min_publications: Option<i64>,

    /// Minimum comments
    #[arg(long)]
    pub min_comments: Option<i64>,

    #[command(flatten)]
    /// Page selection.
    pub page: PageArgs,

    #[command(flatten)]
    /// Explain flag.
    pub explain: ExplainArgs,
}

/// Arguments for `sift assets`.
#[derive(Args, Debug, Clone)]
pub struct AssetsCommand {
    /// Free text
    #[arg(default_value = "")]
    pub text: String,

    /// Matching mode: exact_phrase, all_words, any_words, hashtags, none_of_words
    #[arg(short = 'm', long, default_value = "all_words")]
    pub mode: TextMatchMode,

    #[command(flatten)]
    /// Page selection.
    pub page: PageArgs,

    #[command(flatten)]
    /// Explain flag.
    pub explain: ExplainArgs,
}

/// Arguments for `sift contents`.
#[derive(Args, Debug, Clone)]
pub struct ContentsCommand {
    /// Free text
    #[arg(default_value = "")]
    pub text: String,

    /// Matching mode: exact_phrase, all_words, any_words, hashtags, none_of_words
    #[arg(short = 'm', long, default_value = "any_words")]
    pub mode: TextMatchMode,

    /// Result shape: latest, links, photo, video, top
    #[arg(short = 's', long, default_value = "latest")]
    pub shape: ResultShape,

    /// Publishing application
    #[arg(long)]
    pub app_id: Option<String>,

    /// Publishing profile
    #[arg(long)]
    pub profile_id: Option<String>,

    #[command(flatten)]
    /// Ingestion-date window.
    pub dates: DateArgs,

    #[command(flatten)]
    /// Page selection.
    pub page: PageArgs,

    #[command(flatten)]
    /// Explain flag.
    pub explain: ExplainArgs,
}

/// Arguments for `sift comments`.
#[derive(Args, Debug, Clone)]
pub struct CommentsCommand {
    /// Identifier of the commented publication
    pub publication_id: String,

    #[command(flatten)]
    /// Page selection.
    pub page: PageArgs,

    #[command(flatten)]
    /// Explain flag.
    pub explain: ExplainArgs,
}

/// Arguments for `sift trends`.
#[derive(Args, Debug, Clone)]
pub struct TrendsCommand {
    /// Maximum terms [default: search.trend_size, 20]
    #[arg(short = 'n', long)]
    pub size: Option<u32>,

    /// Trailing window in days [default: search.trend_days, 2]
    #[arg(short = 'd', long)]
    pub days: Option<u32>,

    /// Print a table instead of JSON
    #[arg(long)]
    pub table: bool,

    #[command(flatten)]
    /// Explain flag.
    pub explain: ExplainArgs,
}

/// Arguments for `sift app-ids`.
#[derive(Args, Debug, Clone)]
pub struct AppIdsCommand {
    /// Maximum identifiers [default: search.app_id_size, 20]
    #[arg(short = 'n', long)]
    pub size: Option<u32>,

    /// Print a table instead of JSON
    #[arg(long)]
    pub table: bool,

    #[command(flatten)]
    /// Explain flag.
    pub explain: ExplainArgs,
}

/// Arguments for `sift index`.
#[derive(Args, Debug, Clone)]
pub struct IndexCommand {
    /// JSON file holding an array of content documents; `-` reads stdin
    pub file: PathBuf,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `sift check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Only validate configuration; do not contact the engine
    #[arg(long)]
    pub offline: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search publications
    #[command(after_help = "\
EXAMPLES:
  sift publications 'gm frens'
  sift publications lens --shape latest --min-collects 5
  sift publications --from-users stani.lens --shape photo
  sift publications '#web3 #nft' --mode hashtags --explain")]
    Publications(PublicationsCommand),

    /// Search profiles
    Profiles(ProfilesCommand),

    /// Search collectible assets
    Assets(AssetsCommand),

    /// Search ingested content
    Contents(ContentsCommand),

    /// List comments on a publication
    Comments(CommentsCommand),

    /// Report terms trending in recently ingested content
    Trends(TrendsCommand),

    /// Report the most common publishing applications
    #[command(name = "app-ids")]
    AppIds(AppIdsCommand),

    /// Ingest content documents from a JSON file
    Index(IndexCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and engine connectivity
    Check(CheckCommand),
}

/// Parses CLI arguments, exiting with clap's usage message on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assets_default_to_all_words() {
        let Commands::Assets(cmd) = parse(&["sift", "assets", "bored ape"]) else {
            panic!("expected assets");
        };
        assert_eq!(cmd.mode, TextMatchMode::AllWords);
        assert_eq!(cmd.text, "bored ape");
    }

    #[test]
    fn publications_default_to_top() {
        let Commands::Publications(cmd) = parse(&["sift", "publications", "gm"]) else {
            panic!("expected publications");
        };
        assert_eq!(cmd.shape, ResultShape::Top);
        assert_eq!(cmd.mode, TextMatchMode::AnyWords);
    }

    #[test]
    fn publications_parse_knobs() {
        let Commands::Publications(cmd) = parse(&[
            "sift",
            "publications",
            "lens",
            "--mode",
            "exact-phrase",
            "--shape",
            "top",
            "--min-collects",
            "3",
            "--from",
            "2022-06-01",
            "-p",
            "0",
        ]) else {
            panic!("expected publications");
        };
        assert_eq!(cmd.mode, TextMatchMode::ExactPhrase);
        assert_eq!(cmd.shape, ResultShape::Top);
        assert_eq!(cmd.min_collects, Some(3));
        assert_eq!(cmd.dates.from, NaiveDate::from_ymd_opt(2022, 6, 1));
        assert_eq!(cmd.page.page, 0);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["sift", "contents", "x", "--mode", "fuzzy"]).is_err());
    }

    #[test]
    fn search_text_is_optional() {
        let Commands::Profiles(cmd) = parse(&["sift", "profiles", "--owned-by", "0xabc"]) else {
            panic!("expected profiles");
        };
        assert!(cmd.text.is_empty());
        assert_eq!(cmd.owned_by.as_deref(), Some("0xabc"));
    }
}
