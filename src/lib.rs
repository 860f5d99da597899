//! Merged pull-request timelines.
//!
//! Several repositories each supply their closed pull requests newest-first.
//! [`MergeEngine`] interleaves them into one newest-first sequence, dropping
//! unmerged and bot-authored entries, and [`Timeline`] pins a call to action
//! in front. Fetching lives in [`github`]; everything else is in-process.

pub mod cli;
pub mod config;
pub mod contributors;
pub mod cursor;
pub mod decode;
pub mod filter;
pub mod github;
pub mod label;
pub mod merge;
pub mod model;
pub mod timeline;

pub use cursor::{Cursor, SourceCursor, StreamCursor};
pub use filter::{FilterRules, Rejection};
pub use label::TimestampLabeler;
pub use merge::MergeEngine;
pub use model::{Contributor, Event, FeedError, MergedEvent, SourceFeed};
pub use timeline::{CallToAction, Timeline};
