//! Event: one time-stamped entry from a source.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A single pull request as seen by the merge.
///
/// Immutable once received from a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Login of the account that opened the pull request.
    pub actor: String,

    /// Link to the pull request.
    pub url: String,

    /// When the pull request was opened. Feeds are ordered by this.
    pub created_at: Timestamp,

    /// When the pull request was merged, if it ever was.
    pub merged_at: Option<Timestamp>,

    /// Name of the source this event came from.
    pub source: String,
}

impl Event {
    /// Whether the event reached the merged state.
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}
