//! Decoding GitHub pull-request listings into feeds.
//!
//! Input is the body of `GET /repos/{owner}/{repo}/pulls`. Records missing
//! a field the merge needs are skipped with a warning; they never reach a
//! feed. A listing that survives decoding but is not newest-first fails as
//! a whole, since merging it would produce a mis-ordered timeline.

use std::fs;
use std::path::Path;

use jiff::Timestamp;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::model::{Event, FeedError, SourceFeed};

/// JSON shape of one entry in the pulls listing.
#[derive(Deserialize)]
struct RawPullRequest {
    html_url: Option<String>,
    created_at: Option<String>,
    merged_at: Option<String>,
    user: Option<RawUser>,
}

#[derive(Deserialize)]
struct RawUser {
    login: Option<String>,
}

/// Why a single record was skipped.
#[derive(Debug, thiserror::Error)]
enum Malformed {
    #[error("unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid {field} '{value}': {error}")]
    Timestamp {
        field: &'static str,
        value: String,
        error: jiff::Error,
    },
}

/// Decode one source's listing into a feed.
pub fn decode_feed(name: &str, json: &str) -> Result<SourceFeed, FeedError> {
    let records: Vec<Value> = serde_json::from_str(json).map_err(|error| FeedError::Json {
        feed: name.to_string(),
        error,
    })?;

    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match decode_event(name, record) {
            Ok(event) => events.push(event),
            Err(problem) => {
                warn!(source = name, index, %problem, "skipping malformed pull request");
            }
        }
    }

    SourceFeed::new(name, events)
}

/// Read and decode a listing saved to disk.
pub fn read_feed(name: &str, path: &Path) -> Result<SourceFeed, FeedError> {
    let json = fs::read_to_string(path).map_err(|error| FeedError::Io {
        feed: name.to_string(),
        path: path.to_path_buf(),
        error,
    })?;
    decode_feed(name, &json)
}

/// Substitute an empty feed for a source that could not be decoded.
pub fn feed_or_empty(name: &str, result: Result<SourceFeed, FeedError>) -> SourceFeed {
    result.unwrap_or_else(|e| {
        warn!(source = name, error = %e, "source unavailable; treating it as empty");
        SourceFeed::empty(name)
    })
}

fn decode_event(source: &str, record: Value) -> Result<Event, Malformed> {
    let raw: RawPullRequest = serde_json::from_value(record)?;

    let actor = raw
        .user
        .and_then(|u| u.login)
        .ok_or(Malformed::Missing("user.login"))?;
    let url = raw.html_url.ok_or(Malformed::Missing("html_url"))?;
    let created_at = raw.created_at.ok_or(Malformed::Missing("created_at"))?;

    Ok(Event {
        actor,
        url,
        created_at: parse_timestamp("created_at", created_at)?,
        merged_at: raw
            .merged_at
            .map(|m| parse_timestamp("merged_at", m))
            .transpose()?,
        source: source.to_string(),
    })
}

fn parse_timestamp(field: &'static str, value: String) -> Result<Timestamp, Malformed> {
    match value.parse() {
        Ok(ts) => Ok(ts),
        Err(error) => Err(Malformed::Timestamp {
            field,
            value,
            error,
        }),
    }
}
