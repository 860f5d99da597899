//! The k-way merge: many newest-first feeds in, one newest-first timeline out.
//!
//! A max-heap holds one entry per live cursor, keyed by the creation time of
//! that cursor's current event. Each step pops the globally newest event,
//! filters it, advances its cursor and re-queues the cursor if anything is
//! left. Every event is popped exactly once, at `O(log k)` per pop for `k`
//! sources.
//!
//! Events with equal timestamps from different sources come out in
//! whatever order the heap produces. No stable tie-break is imposed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use jiff::Timestamp;
use tracing::debug;

use crate::cursor::{Cursor, SourceCursor};
use crate::filter::FilterRules;
use crate::label::TimestampLabeler;
use crate::model::{MergedEvent, SourceFeed};

/// A cursor waiting in the queue.
///
/// Compared by `key` alone; `slot` indexes the cursor slice.
#[derive(Debug)]
struct Pending {
    key: Timestamp,
    slot: usize,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Merges source feeds into one filtered, time-ordered sequence.
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    rules: FilterRules,
    labeler: TimestampLabeler,
}

impl MergeEngine {
    pub fn new(rules: FilterRules, labeler: TimestampLabeler) -> Self {
        Self { rules, labeler }
    }

    pub fn rules(&self) -> &FilterRules {
        &self.rules
    }

    /// Merge already-fetched feeds.
    ///
    /// One cursor is created per feed and dropped when the merge returns.
    pub fn merge(&self, feeds: &[SourceFeed]) -> Vec<MergedEvent> {
        let mut cursors: Vec<SourceCursor<'_>> = feeds.iter().map(SourceCursor::new).collect();
        self.merge_cursors(&mut cursors)
    }

    /// Merge from caller-owned cursors, leaving every one of them exhausted.
    pub fn merge_cursors<C: Cursor>(&self, cursors: &mut [C]) -> Vec<MergedEvent> {
        let mut queue: BinaryHeap<Pending> = cursors
            .iter()
            .enumerate()
            .filter_map(|(slot, cursor)| {
                cursor.current().map(|event| Pending {
                    key: event.created_at,
                    slot,
                })
            })
            .collect();

        let mut merged = Vec::new();
        let mut rejected = 0_usize;

        while let Some(Pending { slot, .. }) = queue.pop() {
            let cursor = &mut cursors[slot];

            // Only cursors with a current event are ever queued.
            let Some(event) = cursor.current() else {
                continue;
            };

            match self.rules.check(event) {
                Ok(()) => merged.push(MergedEvent::from_event(
                    event,
                    cursor.source_name(),
                    self.labeler.label(event.created_at),
                )),
                Err(reason) => {
                    rejected += 1;
                    debug!(
                        source = cursor.source_name(),
                        actor = %event.actor,
                        url = %event.url,
                        %reason,
                        "dropping event"
                    );
                }
            }

            cursor.advance();
            if let Some(next) = cursor.current() {
                queue.push(Pending {
                    key: next.created_at,
                    slot,
                });
            }
        }

        debug!(
            sources = cursors.len(),
            emitted = merged.len(),
            rejected,
            "merge complete"
        );
        merged
    }
}
