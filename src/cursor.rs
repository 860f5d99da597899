//! Cursors: movable read positions into one source's events.
//!
//! The merge engine only ever asks a cursor for its current event and then
//! tells it to move on. [`SourceCursor`] walks an already-fetched
//! [`SourceFeed`]; [`StreamCursor`] pulls from any iterator on demand, so the
//! engine does not care whether a source is materialized or lazy.

use tracing::warn;

use crate::model::{Event, SourceFeed};

/// The capability the merge engine needs from a source.
pub trait Cursor {
    /// Name of the source this cursor reads.
    fn source_name(&self) -> &str;

    /// The current unconsumed event, or `None` once the source is used up.
    fn current(&self) -> Option<&Event>;

    /// Move past the current event.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already exhausted. Callers must inspect
    /// [`Cursor::current`] before advancing.
    fn advance(&mut self);

    fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }
}

/// A cursor over a borrowed, already-fetched feed.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    feed: &'a SourceFeed,
    position: usize,
}

impl<'a> SourceCursor<'a> {
    pub fn new(feed: &'a SourceFeed) -> Self {
        Self { feed, position: 0 }
    }

    /// Index of the current item within the feed.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Cursor for SourceCursor<'_> {
    fn source_name(&self) -> &str {
        self.feed.name()
    }

    fn current(&self) -> Option<&Event> {
        self.feed.items().get(self.position)
    }

    fn advance(&mut self) {
        assert!(
            !self.is_exhausted(),
            "advanced exhausted cursor for '{}'",
            self.feed.name()
        );
        self.position += 1;
    }

    fn is_exhausted(&self) -> bool {
        self.position >= self.feed.len()
    }
}

/// A cursor that pulls events lazily from an iterator.
///
/// The iterator must yield newest-first. If it yields an event newer than
/// the one before it, the rest of the source is dropped with a warning and
/// the cursor reports exhausted.
pub struct StreamCursor<I> {
    name: String,
    events: I,
    current: Option<Event>,
}

impl<I: Iterator<Item = Event>> StreamCursor<I> {
    pub fn new<T>(name: impl Into<String>, events: T) -> Self
    where
        T: IntoIterator<Item = Event, IntoIter = I>,
    {
        let mut events = events.into_iter();
        let current = events.next();
        Self {
            name: name.into(),
            events,
            current,
        }
    }
}

impl<I: Iterator<Item = Event>> Cursor for StreamCursor<I> {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn current(&self) -> Option<&Event> {
        self.current.as_ref()
    }

    fn advance(&mut self) {
        let Some(previous) = self.current.take() else {
            panic!("advanced exhausted cursor for '{}'", self.name);
        };

        self.current = match self.events.next() {
            Some(next) if next.created_at > previous.created_at => {
                warn!(
                    source = %self.name,
                    previous = %previous.created_at,
                    next = %next.created_at,
                    "source yielded an event out of order; dropping the rest of it"
                );
                None
            }
            next => next,
        };
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn event(seconds: i64) -> Event {
        Event {
            actor: "alice".into(),
            url: format!("https://github.com/o/r/pull/{seconds}"),
            created_at: Timestamp::from_second(seconds).unwrap(),
            merged_at: Some(Timestamp::from_second(seconds + 10).unwrap()),
            source: "r".into(),
        }
    }

    #[test]
    fn walks_feed_then_exhausts() {
        let feed = SourceFeed::new("r", vec![event(200), event(100)]).unwrap();
        let mut cursor = SourceCursor::new(&feed);

        assert_eq!(cursor.current().unwrap().created_at.as_second(), 200);
        cursor.advance();
        assert_eq!(cursor.current().unwrap().created_at.as_second(), 100);
        assert_eq!(cursor.position(), 1);
        cursor.advance();

        assert!(cursor.current().is_none());
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn empty_feed_starts_exhausted() {
        let feed = SourceFeed::empty("r");
        let cursor = SourceCursor::new(&feed);
        assert!(cursor.is_exhausted());
        assert!(cursor.current().is_none());
    }

    #[test]
    #[should_panic(expected = "advanced exhausted cursor")]
    fn advancing_exhausted_feed_cursor_panics() {
        let feed = SourceFeed::empty("r");
        let mut cursor = SourceCursor::new(&feed);
        cursor.advance();
    }

    #[test]
    fn stream_cursor_pulls_lazily() {
        let mut cursor = StreamCursor::new("r", vec![event(30), event(20), event(10)]);
        let mut seen = Vec::new();
        while let Some(e) = cursor.current() {
            seen.push(e.created_at.as_second());
            cursor.advance();
        }
        assert_eq!(seen, vec![30, 20, 10]);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn stream_cursor_drops_out_of_order_tail() {
        let mut cursor = StreamCursor::new("r", vec![event(30), event(40), event(10)]);
        assert_eq!(cursor.current().unwrap().created_at.as_second(), 30);
        cursor.advance();
        assert!(cursor.is_exhausted());
    }

    #[test]
    #[should_panic(expected = "advanced exhausted cursor")]
    fn advancing_exhausted_stream_cursor_panics() {
        let mut cursor = StreamCursor::new("r", Vec::<Event>::new());
        cursor.advance();
    }
}
