//! Source feeds: one source's events, newest first.

use std::{io, path::PathBuf};

use jiff::Timestamp;

use super::Event;

/// Errors raised while building a feed from collaborator data.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed '{feed}' is out of order at item {index}: {newer} follows {older}")]
    OutOfOrder {
        feed: String,
        index: usize,
        older: Timestamp,
        newer: Timestamp,
    },

    #[error("feed '{feed}' is not a JSON array of records: {error}")]
    Json {
        feed: String,
        error: serde_json::Error,
    },

    #[error("failed to read feed '{feed}' from {}: {error}", path.display())]
    Io {
        feed: String,
        path: PathBuf,
        error: io::Error,
    },
}

pub type Result<T> = core::result::Result<T, FeedError>;

/// The already-fetched events of one named source.
///
/// Items are ordered by descending `created_at`. The ordering is checked
/// once on construction; nothing downstream re-sorts a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFeed {
    name: String,
    items: Vec<Event>,
}

impl SourceFeed {
    /// Build a feed, rejecting items that are not newest-first.
    pub fn new(name: impl Into<String>, items: Vec<Event>) -> Result<Self> {
        let name = name.into();
        let misplaced = items
            .windows(2)
            .position(|pair| pair[0].created_at < pair[1].created_at);

        if let Some(i) = misplaced {
            return Err(FeedError::OutOfOrder {
                feed: name,
                index: i + 1,
                older: items[i].created_at,
                newer: items[i + 1].created_at,
            });
        }

        Ok(Self { name, items })
    }

    /// A feed with no events, used when a source could not be obtained.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[Event] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(seconds: i64) -> Event {
        Event {
            actor: "alice".into(),
            url: format!("https://github.com/o/r/pull/{seconds}"),
            created_at: Timestamp::from_second(seconds).unwrap(),
            merged_at: None,
            source: "r".into(),
        }
    }

    #[test]
    fn accepts_descending_items() {
        let feed = SourceFeed::new("r", vec![event(300), event(200), event(200), event(100)]).unwrap();
        assert_eq!(feed.len(), 4);
        assert_eq!(feed.name(), "r");
    }

    #[test]
    fn rejects_ascending_pair() {
        let err = SourceFeed::new("r", vec![event(300), event(100), event(200)]).unwrap_err();
        match err {
            FeedError::OutOfOrder { feed, index, .. } => {
                assert_eq!(feed, "r");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_feed_has_no_items() {
        let feed = SourceFeed::empty("Schedge");
        assert!(feed.is_empty());
        assert_eq!(feed.name(), "Schedge");
    }
}
