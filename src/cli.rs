//! CLI interface for pr-timeline.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out on
//! stdout. Diagnostics go to stderr through `tracing` (`RUST_LOG`).
//!
//! - `pr-timeline timeline`: merged pull-request timeline of every source.
//! - `pr-timeline contributors`: contributor list of the project.
//! - `pr-timeline sources`: the configured sources.

mod format;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::contributors::decode_contributors;
use crate::decode::read_feed;
use crate::github;
use crate::model::SourceFeed;

use format::{format_contributors, format_sources, format_timeline};

/// pr-timeline: one newest-first timeline of merged pull requests.
#[derive(Debug, Parser)]
#[command(name = "pr-timeline", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Config file. Defaults to `~/.pr-timeline/config.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r"Examples:
  pr-timeline timeline
  pr-timeline timeline --json
  pr-timeline timeline --feed Schedge=schedge.json --feed Alberta=alberta.json
  pr-timeline contributors --from contributors.json

Feed files hold the body of GET /repos/{owner}/{repo}/pulls, newest first.
Without --feed, the configured sources are fetched through `gh api`.";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the merged timeline, call to action first.
    Timeline {
        /// Read a source from a saved listing instead of GitHub: `NAME=PATH`.
        /// Can be specified multiple times.
        #[arg(long = "feed", value_parser = parse_feed_arg)]
        feeds: Vec<FeedArg>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the project's contributors, bots excluded.
    Contributors {
        /// Read a saved contributors listing instead of fetching it.
        #[arg(long)]
        from: Option<PathBuf>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the configured sources.
    Sources,
}

/// A `--feed NAME=PATH` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedArg {
    pub name: String,
    pub path: PathBuf,
}

fn parse_feed_arg(arg: &str) -> Result<FeedArg, String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.is_empty() => Ok(FeedArg {
            name: name.trim().to_string(),
            path: PathBuf::from(path),
        }),
        _ => Err(format!("expected NAME=PATH, got '{arg}'")),
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let output = execute(&config, cli.command)?;
    print!("{output}");
    Ok(())
}

/// Carry out a command and return what it prints.
fn execute(config: &Config, command: Command) -> Result<String, String> {
    match command {
        Command::Timeline { feeds, json } => cmd_timeline(config, &feeds, json),
        Command::Contributors { from, json } => cmd_contributors(config, from, json),
        Command::Sources => Ok(format_sources(&config.sources)),
    }
}

fn cmd_timeline(config: &Config, feeds: &[FeedArg], json: bool) -> Result<String, String> {
    let timeline = config.timeline().map_err(|e| e.to_string())?;

    let feeds: Vec<SourceFeed> = if feeds.is_empty() {
        github::collect_feeds(&config.sources, config.per_page)
    } else {
        feeds
            .iter()
            .map(|f| read_feed(&f.name, &f.path))
            .collect::<Result<_, _>>()
            .map_err(|e| e.to_string())?
    };

    let entries = timeline.build(&feeds);

    if json {
        serde_json::to_string_pretty(&entries)
            .map(|s| s + "\n")
            .map_err(|e| format!("failed to serialize timeline: {e}"))
    } else {
        Ok(format_timeline(&entries))
    }
}

fn cmd_contributors(config: &Config, from: Option<PathBuf>, json: bool) -> Result<String, String> {
    let raw = match from {
        Some(path) => fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
        None => github::fetch_contributors(&config.contributors_repo)
            .map_err(|e| format!("failed to fetch contributors: {e}"))?,
    };

    let contributors = decode_contributors(&raw, &config.filter_rules())
        .map_err(|e| format!("invalid contributors listing: {e}"))?;

    if json {
        serde_json::to_string_pretty(&contributors)
            .map(|s| s + "\n")
            .map_err(|e| format!("failed to serialize contributors: {e}"))
    } else {
        Ok(format_contributors(&contributors))
    }
}
