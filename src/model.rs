//! Core data model for the timeline.
//!
//! Events arrive from sources grouped into feeds; merged events leave
//! for display. Contributors are listed alongside the timeline.

mod contributor;
mod event;
mod feed;
mod merged;

pub use contributor::Contributor;
pub use event::Event;
pub use feed::{FeedError, SourceFeed};
pub use merged::MergedEvent;
