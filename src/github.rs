//! GitHub collaborator: fetches the raw listings the merge consumes.
//!
//! Talks to the REST API through the `gh` CLI, which owns authentication.
//! Each source is fetched on its own thread and the merge only starts once
//! all of them have returned. A source that cannot be fetched or decoded
//! becomes an empty feed.

use std::io;
use std::process::Command;
use std::thread;

use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::decode::{decode_feed, feed_or_empty};
use crate::model::SourceFeed;

/// Errors from running `gh`.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to run gh: {0}")]
    Spawn(#[from] io::Error),

    #[error("gh api {endpoint} failed: {stderr}")]
    Failed { endpoint: String, stderr: String },
}

pub type Result<T> = core::result::Result<T, FetchError>;

/// The closed pull requests of `repo`, newest first, as raw JSON.
pub fn fetch_pull_requests(repo: &str, per_page: u32) -> Result<String> {
    gh_api(&pulls_endpoint(repo, per_page))
}

/// The contributors of `repo`, as raw JSON.
pub fn fetch_contributors(repo: &str) -> Result<String> {
    gh_api(&format!("repos/{repo}/contributors"))
}

/// Fetch and decode every source concurrently, in configuration order.
pub fn collect_feeds(sources: &[SourceConfig], per_page: u32) -> Vec<SourceFeed> {
    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || fetch_feed(source, per_page)))
            .collect();

        handles
            .into_iter()
            .zip(sources)
            .map(|(handle, source)| {
                handle.join().unwrap_or_else(|_| {
                    warn!(source = %source.name, "fetch thread panicked; treating source as empty");
                    SourceFeed::empty(&source.name)
                })
            })
            .collect()
    })
}

fn fetch_feed(source: &SourceConfig, per_page: u32) -> SourceFeed {
    info!(source = %source.name, repo = %source.repo, "fetching pull requests");

    let json = match fetch_pull_requests(&source.repo, per_page) {
        Ok(json) => json,
        Err(e) => {
            warn!(source = %source.name, error = %e, "fetch failed; treating source as empty");
            return SourceFeed::empty(&source.name);
        }
    };

    feed_or_empty(&source.name, decode_feed(&source.name, &json))
}

fn pulls_endpoint(repo: &str, per_page: u32) -> String {
    format!("repos/{repo}/pulls?state=closed&sort=created&direction=desc&per_page={per_page}")
}

/// Run `gh api <endpoint>` and return stdout.
fn gh_api(endpoint: &str) -> Result<String> {
    let output = Command::new("gh").args(["api", endpoint]).output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(FetchError::Failed {
            endpoint: endpoint.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_endpoint_asks_for_closed_newest_first() {
        assert_eq!(
            pulls_endpoint("BUGS-NYU/schedge", 30),
            "repos/BUGS-NYU/schedge/pulls?state=closed&sort=created&direction=desc&per_page=30"
        );
    }

    #[test]
    fn no_sources_no_feeds() {
        assert!(collect_feeds(&[], 30).is_empty());
    }
}
