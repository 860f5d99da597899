//! Timeline assembly: the merged feed behind a fixed call to action.

use serde::Deserialize;

use crate::merge::MergeEngine;
use crate::model::{MergedEvent, SourceFeed};

/// The entry pinned to the top of every timeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CallToAction {
    pub text: String,
    pub url: String,

    /// Shown where a real entry shows its timestamp.
    pub label: String,
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            text: "Make this your contribution!".to_string(),
            url: "https://github.com/BUGS-NYU".to_string(),
            label: "NOW".to_string(),
        }
    }
}

impl CallToAction {
    pub fn to_merged_event(&self) -> MergedEvent {
        MergedEvent {
            actor_name: String::new(),
            url: self.url.clone(),
            timestamp_label: self.label.clone(),
            source_name: String::new(),
            display_text: self.text.clone(),
            created_at: None,
        }
    }
}

/// Runs the merge and pins the call to action in front of the result.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    engine: MergeEngine,
    call_to_action: CallToAction,
}

impl Timeline {
    pub fn new(engine: MergeEngine, call_to_action: CallToAction) -> Self {
        Self {
            engine,
            call_to_action,
        }
    }

    pub fn engine(&self) -> &MergeEngine {
        &self.engine
    }

    /// The display sequence: call to action first, then merged events newest-first.
    pub fn build(&self, feeds: &[SourceFeed]) -> Vec<MergedEvent> {
        let merged = self.engine.merge(feeds);

        let mut timeline = Vec::with_capacity(merged.len() + 1);
        timeline.push(self.call_to_action.to_merged_event());
        timeline.extend(merged);
        timeline
    }
}
