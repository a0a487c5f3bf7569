//! Session duration between two normalized timestamps.

use std::fmt;

use chrono::Duration;

use crate::timestamp::NormalizedTimestamp;

const SECONDS_PER_HOUR: u64 = 3_600;

/// Non-negative elapsed time with second resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionDuration {
    seconds: u64,
}

impl SessionDuration {
    pub const ZERO: SessionDuration = SessionDuration { seconds: 0 };

    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Whole seconds in the span.
    pub fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// The span in fractional hours, as plotted per session.
    pub fn as_hours(&self) -> f64 {
        self.seconds as f64 / SECONDS_PER_HOUR as f64
    }
}

/// `H:MM:SS`, hours unpadded.
impl fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / SECONDS_PER_HOUR;
        let minutes = (self.seconds % SECONDS_PER_HOUR) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Elapsed wall-clock time from `start` to `end`.
///
/// Returns `None` when either bound is absent.  When `end` is earlier than
/// `start` the session is assumed to have crossed midnight exactly once and a
/// full day is added to `end`.  Sessions longer than 24 hours therefore wrap
/// around and come out short; there is no way to tell from a time of day
/// alone.
pub fn calculate_time_difference(
    start: Option<NormalizedTimestamp>,
    end: Option<NormalizedTimestamp>,
) -> Option<SessionDuration> {
    let (start, end) = (start?, end?);

    let mut elapsed = end.time().signed_duration_since(start.time());
    if end < start {
        elapsed = elapsed + Duration::days(1);
    }

    Some(SessionDuration::from_seconds(elapsed.num_seconds().max(0) as u64))
}
