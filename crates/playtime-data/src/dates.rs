//! Session dates embedded in log file names.
//!
//! Log backups are named after the moment they were rotated, e.g.
//! `Game Build(9123) 07 Mar 24 (20 01 02).log`.  The `DD Mon YY` part is the
//! session date.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use playtime_core::error::{PlaytimeError, Result};

const FILENAME_DATE_FORMAT: &str = "%d %b %y";

fn filename_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{2} \w+ [0-9]{2}").expect("regex is valid"))
}

/// Extract the `DD Mon YY` date from `file_name`.
///
/// Candidates are tried left to right; the first one that is a real calendar
/// date wins, so `(20 01 02)` time suffixes never shadow the date.  After a
/// rejected candidate the search resumes one character past its start, since
/// its tail may begin the real date.
pub fn extract_session_date(file_name: &str) -> Result<NaiveDate> {
    let re = filename_date_regex();
    let mut pos = 0;
    while let Some(m) = re.find_at(file_name, pos) {
        if let Ok(date) = NaiveDate::parse_from_str(m.as_str(), FILENAME_DATE_FORMAT) {
            return Ok(date);
        }
        // Candidates start with an ASCII digit, so `start + 1` is a char
        // boundary.
        pos = m.start() + 1;
    }
    Err(PlaytimeError::FilenameDate(file_name.to_string()))
}
