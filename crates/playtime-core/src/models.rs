use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::duration::SessionDuration;

/// One play session: a log file with at least one timestamp and a dated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// File name of the log, without its directory.
    pub file_name: String,
    /// Calendar date embedded in the file name.
    pub date: NaiveDate,
    /// First-to-last timestamp span of the file.
    pub duration: SessionDuration,
}

impl SessionRecord {
    /// Session length in fractional hours.
    pub fn hours(&self) -> f64 {
        self.duration.as_hours()
    }
}

/// Why a candidate log file did not produce a [`SessionRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file contains no recognisable timestamp.
    NoSession,
    /// The file name has no `DD Mon YY` date.
    NoDate,
    /// The file could not be opened or read.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoSession => write!(f, "no timestamps found"),
            SkipReason::NoDate => write!(f, "no session date in file name"),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
        }
    }
}

/// A candidate log file left out of the totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A number of seconds split into whole hours, minutes and seconds.
///
/// Each component is taken from the remainder left by the previous one, so
/// `minutes < 60` and `seconds < 60` always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaytimeBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl PlaytimeBreakdown {
    pub fn from_total_seconds(total: u64) -> Self {
        let hours = total / 3_600;
        let remainder = total % 3_600;
        let minutes = remainder / 60;
        let seconds = remainder % 60;
        Self {
            hours,
            minutes,
            seconds,
        }
    }
}

/// The aligned series handed to the chart: one entry per session, sorted by
/// date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub dates: Vec<NaiveDate>,
    /// Hours played in each session.
    pub session_hours: Vec<f64>,
    /// Running total of `session_hours`.
    pub cumulative_hours: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Largest single-session value, `0.0` when empty.
    pub fn max_session_hours(&self) -> f64 {
        self.session_hours.iter().copied().fold(0.0, f64::max)
    }

    /// Final cumulative value, `0.0` when empty.
    pub fn total_hours(&self) -> f64 {
        self.cumulative_hours.last().copied().unwrap_or(0.0)
    }
}
