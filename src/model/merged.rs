//! Merged events: what the timeline displays.

use jiff::Timestamp;
use serde::Serialize;

use super::Event;

/// One timeline entry, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEvent {
    pub actor_name: String,
    pub url: String,
    pub timestamp_label: String,
    pub source_name: String,
    pub display_text: String,

    /// Creation time of the underlying event.
    /// `None` for the call-to-action entry, which has no real timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl MergedEvent {
    /// Build the entry for an accepted event of the named source.
    pub fn from_event(event: &Event, source_name: &str, timestamp_label: String) -> Self {
        Self {
            actor_name: event.actor.clone(),
            url: event.url.clone(),
            timestamp_label,
            source_name: source_name.to_string(),
            display_text: format!("{} merged a Pull Request into {source_name}!", event.actor),
            created_at: Some(event.created_at),
        }
    }

    /// Whether this entry was injected rather than derived from a source.
    pub fn is_synthetic(&self) -> bool {
        self.created_at.is_none()
    }
}
