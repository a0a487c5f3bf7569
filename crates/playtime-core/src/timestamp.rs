//! Timestamp extraction from game client log lines.
//!
//! Log lines carry a timestamp in one of two bracketed shapes:
//!
//! * short form `<HH:MM:SS>`
//! * ISO-8601 form `<YYYY-MM-DDTHH:MM:SS.mmmZ>`
//!
//! Both are reduced to a [`NormalizedTimestamp`] holding only the time of day.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use tracing::debug;

use crate::error::{PlaytimeError, Result};

/// `strftime` layout of a normalized timestamp.
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Byte range of the `HH:MM:SS` portion inside an ISO-8601 timestamp.
const ISO_CLOCK_RANGE: std::ops::Range<usize> = 11..19;

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"<([0-9]{2}:[0-9]{2}:[0-9]{2})>|<([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}Z)>",
        )
        .expect("regex is valid")
    })
}

// ── RawTimestamp ──────────────────────────────────────────────────────────────

/// A timestamp fragment as found in a log line, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTimestamp<'a> {
    /// `HH:MM:SS`, brackets stripped.
    Short(&'a str),
    /// `YYYY-MM-DDTHH:MM:SS.mmmZ`, brackets stripped.
    Iso(&'a str),
}

impl<'a> RawTimestamp<'a> {
    /// The `HH:MM:SS` text of this fragment.
    pub fn clock_text(&self) -> &'a str {
        match *self {
            RawTimestamp::Short(s) => s,
            RawTimestamp::Iso(s) => &s[ISO_CLOCK_RANGE],
        }
    }

    /// Reduce to a time of day.  Returns `None` when the fragment has the
    /// right shape but is not a valid 24-hour clock value.
    pub fn normalize(&self) -> Option<NormalizedTimestamp> {
        NormalizedTimestamp::parse(self.clock_text()).ok()
    }
}

/// Find the leftmost timestamp fragment in `line`.
pub fn find_raw_timestamp(line: &str) -> Option<RawTimestamp<'_>> {
    let caps = timestamp_regex().captures(line)?;
    if let Some(iso) = caps.get(2) {
        return Some(RawTimestamp::Iso(iso.as_str()));
    }
    caps.get(1).map(|short| RawTimestamp::Short(short.as_str()))
}

/// Extract the normalized timestamp from a single log line.
///
/// Absence is the common case (most lines carry no timestamp) and is not an
/// error.
pub fn extract_timestamp(line: &str) -> Option<NormalizedTimestamp> {
    let raw = find_raw_timestamp(line)?;
    let normalized = raw.normalize();
    if normalized.is_none() {
        debug!("Ignoring out-of-range timestamp {:?}", raw);
    }
    normalized
}

// ── NormalizedTimestamp ───────────────────────────────────────────────────────

/// A time of day with second resolution, displayed as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedTimestamp(NaiveTime);

impl NormalizedTimestamp {
    /// Parse `HH:MM:SS` text.
    pub fn parse(s: &str) -> Result<Self> {
        if s.len() != 8 {
            return Err(PlaytimeError::TimestampParse(s.to_string()));
        }
        // A leap second (`:60`) collapses onto `:59`.
        NaiveTime::parse_from_str(s, CLOCK_FORMAT)
            .map(|t| Self(t.with_nanosecond(0).unwrap_or(t)))
            .map_err(|_| PlaytimeError::TimestampParse(s.to_string()))
    }

    /// The underlying time of day.
    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for NormalizedTimestamp {
    type Err = PlaytimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NormalizedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLOCK_FORMAT))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
