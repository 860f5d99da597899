//! Timestamp labels shown next to each timeline entry.

use jiff::{Timestamp, tz::TimeZone};

/// Month/day/year and a 12-hour clock, seconds dropped: `10/5/2020 2:07 PM`.
const LABEL_FORMAT: &str = "%-m/%-d/%Y %-I:%M %p";

/// Renders event timestamps in a fixed time zone.
#[derive(Debug, Clone)]
pub struct TimestampLabeler {
    tz: TimeZone,
}

impl Default for TimestampLabeler {
    fn default() -> Self {
        Self::new(TimeZone::UTC)
    }
}

impl TimestampLabeler {
    pub fn new(tz: TimeZone) -> Self {
        Self { tz }
    }

    /// Labels in the zone of the machine running the merge.
    pub fn system() -> Self {
        Self::new(TimeZone::system())
    }

    pub fn label(&self, timestamp: Timestamp) -> String {
        timestamp
            .to_zoned(self.tz.clone())
            .strftime(LABEL_FORMAT)
            .to_string()
    }
}
