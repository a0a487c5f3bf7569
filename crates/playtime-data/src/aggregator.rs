//! Play time aggregation over a directory of log backups.

use std::path::{Path, PathBuf};

use playtime_core::error::Result;
use playtime_core::formatting::{format_session_line, format_total_line};
use playtime_core::models::{ChartSeries, PlaytimeBreakdown, SessionRecord, SkipReason, SkippedFile};
use playtime_core::settings::DEFAULT_LOG_EXTENSION;
use tracing::{debug, info, warn};

use crate::dates::extract_session_date;
use crate::reader::{find_log_files, read_session};

// ── AggregatorConfig ──────────────────────────────────────────────────────────

/// Where to look for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub log_dir: PathBuf,
    /// File extension without the leading dot.
    pub extension: String,
}

impl AggregatorConfig {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            extension: DEFAULT_LOG_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

// ── PlaytimeReport ────────────────────────────────────────────────────────────

/// Result of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct PlaytimeReport {
    /// Sessions in processing order.
    pub sessions: Vec<SessionRecord>,
    /// Candidate files that did not contribute.
    pub skipped: Vec<SkippedFile>,
    /// Sum of all session durations.
    pub total_seconds: u64,
}

impl PlaytimeReport {
    pub fn add_session(&mut self, record: SessionRecord) {
        self.total_seconds += record.duration.as_secs();
        self.sessions.push(record);
    }

    pub fn breakdown(&self) -> PlaytimeBreakdown {
        PlaytimeBreakdown::from_total_seconds(self.total_seconds)
    }

    /// Sessions ordered by date, ties broken by duration.
    pub fn sorted_sessions(&self) -> Vec<&SessionRecord> {
        let mut sorted: Vec<&SessionRecord> = self.sessions.iter().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.duration.cmp(&b.duration)));
        sorted
    }

    /// Dates, per-session hours and cumulative hours, all in date order.
    pub fn chart_series(&self) -> ChartSeries {
        let sorted = self.sorted_sessions();
        let mut series = ChartSeries {
            dates: Vec::with_capacity(sorted.len()),
            session_hours: Vec::with_capacity(sorted.len()),
            cumulative_hours: Vec::with_capacity(sorted.len()),
        };

        let mut running = 0.0;
        for record in sorted {
            let hours = record.hours();
            running += hours;
            series.dates.push(record.date);
            series.session_hours.push(hours);
            series.cumulative_hours.push(running);
        }
        series
    }

    /// One line per session followed by the total.
    pub fn console_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .sessions
            .iter()
            .map(|s| format_session_line(&s.file_name, &s.duration))
            .collect();
        lines.push(format_total_line(&self.breakdown()));
        lines
    }
}

// ── PlaytimeAggregator ────────────────────────────────────────────────────────

/// Stateless driver that turns a log directory into a [`PlaytimeReport`].
pub struct PlaytimeAggregator;

impl PlaytimeAggregator {
    /// Process every log in `config.log_dir`.
    ///
    /// Only a missing or unlistable directory is an error; individual files
    /// that cannot be used are recorded in [`PlaytimeReport::skipped`].
    pub fn aggregate_directory(config: &AggregatorConfig) -> Result<PlaytimeReport> {
        let files = find_log_files(&config.log_dir, &config.extension)?;
        if files.is_empty() {
            warn!(
                "No .{} files found in {}",
                config.extension,
                config.log_dir.display()
            );
        }

        let mut report = PlaytimeReport::default();
        for path in &files {
            match Self::process_file(path) {
                Ok(record) => report.add_session(record),
                Err(reason) => report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason,
                }),
            }
        }

        info!(
            "Processed {} files: {} sessions, {} skipped",
            files.len(),
            report.sessions.len(),
            report.skipped.len()
        );

        Ok(report)
    }

    /// Build the session record for a single log file.
    pub fn process_file(path: &Path) -> std::result::Result<SessionRecord, SkipReason> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let duration = match read_session(path) {
            Ok(Some(d)) => d,
            Ok(None) => {
                info!("Skipping {}: no timestamps found", file_name);
                return Err(SkipReason::NoSession);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                return Err(SkipReason::Unreadable(e.to_string()));
            }
        };

        let date = match extract_session_date(&file_name) {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                return Err(SkipReason::NoDate);
            }
        };

        debug!("{}: {} on {}", file_name, duration, date);

        Ok(SessionRecord {
            file_name,
            date,
            duration,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use playtime_core::duration::SessionDuration;
    use playtime_core::error::PlaytimeError;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(name: &str, date: NaiveDate, seconds: u64) -> SessionRecord {
        SessionRecord {
            file_name: name.to_string(),
            date,
            duration: SessionDuration::from_seconds(seconds),
        }
    }

    // ── End to end ────────────────────────────────────────────────────────────

    #[test]
    fn test_aggregate_two_sessions() {
        let dir = TempDir::new().unwrap();
        // Written out of date order on purpose.
        write_log(
            dir.path(),
            "02 Jan 24 evening.log",
            &[
                "<2024-01-02T20:00:00.000Z> Log started",
                "<2024-01-02T21:00:00.000Z> [Notice] join",
                "<2024-01-02T22:30:00.000Z> [Notice] quit",
            ],
        );
        write_log(
            dir.path(),
            "01 Jan 24 morning.log",
            &["<10:00:00> start", "chatter", "<11:00:00> quit"],
        );

        let report =
            PlaytimeAggregator::aggregate_directory(&AggregatorConfig::new(dir.path())).unwrap();

        assert_eq!(report.sessions.len(), 2);
        assert!(report.skipped.is_empty());
        assert_eq!(
            report.breakdown(),
            PlaytimeBreakdown {
                hours: 3,
                minutes: 30,
                seconds: 0
            }
        );

        let series = report.chart_series();
        assert_eq!(series.dates, vec![ymd(2024, 1, 1), ymd(2024, 1, 2)]);
        assert_eq!(series.session_hours, vec![1.0, 2.5]);
        assert_eq!(series.cumulative_hours, vec![1.0, 3.5]);
    }

    #[test]
    fn test_aggregate_skips_unusable_files() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "05 May 24.log", &["<08:00:00> a", "<08:30:00> b"]);
        write_log(dir.path(), "06 May 24.log", &["no timestamps at all"]);
        write_log(dir.path(), "undated.log", &["<08:00:00> a", "<09:00:00> b"]);
        write_log(dir.path(), "07 May 24.txt", &["<08:00:00> a", "<09:00:00> b"]);

        let report =
            PlaytimeAggregator::aggregate_directory(&AggregatorConfig::new(dir.path())).unwrap();

        assert_eq!(report.sessions.len(), 1);
        assert_eq!(report.total_seconds, 1800);

        let reasons: Vec<(&str, &SkipReason)> = report
            .skipped
            .iter()
            .map(|s| (s.path.file_name().unwrap().to_str().unwrap(), &s.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("06 May 24.log", &SkipReason::NoSession),
                ("undated.log", &SkipReason::NoDate),
            ]
        );
    }

    #[test]
    fn test_aggregate_custom_extension() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "07 May 24.txt", &["<08:00:00> a", "<09:00:00> b"]);
        write_log(dir.path(), "08 May 24.log", &["<08:00:00> a", "<09:00:00> b"]);

        let config = AggregatorConfig::new(dir.path()).with_extension("txt");
        let report = PlaytimeAggregator::aggregate_directory(&config).unwrap();
        assert_eq!(report.sessions.len(), 1);
        assert_eq!(report.sessions[0].date, ymd(2024, 5, 7));
    }

    #[test]
    fn test_aggregate_empty_directory() {
        let dir = TempDir::new().unwrap();
        let report =
            PlaytimeAggregator::aggregate_directory(&AggregatorConfig::new(dir.path())).unwrap();
        assert!(report.sessions.is_empty());
        assert_eq!(report.total_seconds, 0);
        assert!(report.chart_series().is_empty());
    }

    #[test]
    fn test_aggregate_missing_directory_is_error() {
        let config = AggregatorConfig::new("/tmp/does-not-exist-playtime-dir");
        let err = PlaytimeAggregator::aggregate_directory(&config).unwrap_err();
        assert!(matches!(err, PlaytimeError::LogDirNotFound(_)));
    }

    #[test]
    fn test_process_file_missing_is_unreadable() {
        let reason =
            PlaytimeAggregator::process_file(Path::new("/tmp/nope 01 Jan 24.log")).unwrap_err();
        assert!(matches!(reason, SkipReason::Unreadable(_)));
    }

    // ── Report views ──────────────────────────────────────────────────────────

    #[test]
    fn test_sorted_sessions_ties_ordered_by_duration() {
        let mut report = PlaytimeReport::default();
        report.add_session(record("c", ymd(2024, 2, 1), 7200));
        report.add_session(record("a", ymd(2024, 1, 1), 3600));
        report.add_session(record("b", ymd(2024, 2, 1), 1800));

        let names: Vec<&str> = report
            .sorted_sessions()
            .iter()
            .map(|r| r.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let series = report.chart_series();
        assert_eq!(series.session_hours, vec![1.0, 0.5, 2.0]);
        assert_eq!(series.cumulative_hours, vec![1.0, 1.5, 3.5]);
    }

    #[test]
    fn test_console_lines_in_processing_order() {
        let mut report = PlaytimeReport::default();
        report.add_session(record("02 Jan 24.log", ymd(2024, 1, 2), 9_000));
        report.add_session(record("01 Jan 24.log", ymd(2024, 1, 1), 3_600));

        assert_eq!(
            report.console_lines(),
            vec![
                "Played in 02 Jan 24.log: 2:30:00.".to_string(),
                "Played in 01 Jan 24.log: 1:00:00.".to_string(),
                "Total played: 3 hours, 30 minutes, 0 seconds.".to_string(),
            ]
        );
    }
}
