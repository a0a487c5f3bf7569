//! Log file discovery and session scanning.
//!
//! A session spans from the first to the last timestamp of a log file, taken
//! in file order.  Files are decoded leniently: bytes that are not valid UTF-8
//! are replaced, never fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use playtime_core::duration::{calculate_time_difference, SessionDuration};
use playtime_core::error::{PlaytimeError, Result};
use playtime_core::timestamp::{extract_timestamp, NormalizedTimestamp};
use tracing::{debug, warn};

// ── Discovery ─────────────────────────────────────────────────────────────────

/// List the files directly inside `log_dir` whose extension is `extension`,
/// sorted by path.
///
/// A missing directory is an error; unreadable entries inside it are skipped.
pub fn find_log_files(log_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !log_dir.is_dir() {
        return Err(PlaytimeError::LogDirNotFound(log_dir.to_path_buf()));
    }

    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(log_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => {
                return Err(PlaytimeError::DirectoryRead {
                    path: log_dir.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", log_dir.display(), e);
                continue;
            }
        };

        let matches_extension = entry
            .path()
            .extension()
            .map(|ext| ext == extension)
            .unwrap_or(false);
        if entry.file_type().is_file() && matches_extension {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

// ── Session scanning ──────────────────────────────────────────────────────────

/// Running first/last timestamp state over the lines of one log.
#[derive(Debug, Clone, Default)]
pub struct SessionScan {
    start: Option<NormalizedTimestamp>,
    end: Option<NormalizedTimestamp>,
    lines: u64,
    stamped: u64,
}

impl SessionScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line in file order.
    pub fn observe(&mut self, line: &str) {
        self.lines += 1;
        if let Some(ts) = extract_timestamp(line) {
            self.stamped += 1;
            self.start.get_or_insert(ts);
            self.end = Some(ts);
        }
    }

    /// First and last timestamp seen, `None` if no line carried one.
    pub fn bounds(&self) -> Option<(NormalizedTimestamp, NormalizedTimestamp)> {
        Some((self.start?, self.end?))
    }

    /// Feed a chunk read up to `\n`.  A bare `\r` also ends a line, and
    /// `\r\n` counts as a single break.
    pub fn observe_chunk(&mut self, chunk: &str) {
        for line in chunk.split('\r').filter(|l| !l.is_empty() && *l != "\n") {
            self.observe(line);
        }
    }

    pub fn duration(&self) -> Option<SessionDuration> {
        calculate_time_difference(self.start, self.end)
    }

    pub fn lines_read(&self) -> u64 {
        self.lines
    }

    pub fn timestamps_found(&self) -> u64 {
        self.stamped
    }
}

/// First and last timestamp of `lines`, in iteration order.
pub fn session_bounds<I, S>(lines: I) -> Option<(NormalizedTimestamp, NormalizedTimestamp)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan_lines(lines).bounds()
}

/// Session duration of `lines`, or `None` when no line carries a timestamp.
///
/// A single timestamp yields a zero-length session.
pub fn session_from_lines<I, S>(lines: I) -> Option<SessionDuration>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    scan_lines(lines).duration()
}

/// Read the log at `path` and compute its session duration.
///
/// Returns `Ok(None)` when the file carries no timestamp.  Only a failure to
/// open the file is reported as an error; a read error part-way through ends
/// the scan with what was read so far.
pub fn read_session(path: &Path) -> Result<Option<SessionDuration>> {
    let file = File::open(path).map_err(|source| PlaytimeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let mut scan = SessionScan::new();
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => scan.observe_chunk(&String::from_utf8_lossy(&buf)),
            Err(e) => {
                warn!(
                    "Read error in {} after {} lines: {}",
                    path.display(),
                    scan.lines_read(),
                    e
                );
                break;
            }
        }
    }

    debug!(
        "File {}: {} lines, {} timestamps",
        path.display(),
        scan.lines_read(),
        scan.timestamps_found()
    );

    Ok(scan.duration())
}

fn scan_lines<I, S>(lines: I) -> SessionScan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scan = SessionScan::new();
    for line in lines {
        scan.observe(line.as_ref());
    }
    scan
}

// ── Tests ─────────────────────────────────────────────────────────────────────
