use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the playtime crates.
#[derive(Error, Debug)]
pub enum PlaytimeError {
    /// A log file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured log directory does not exist.
    #[error("Log directory not found: {0}")]
    LogDirNotFound(PathBuf),

    /// The log directory exists but could not be listed.
    #[error("Failed to list directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timestamp string is not a valid `HH:MM:SS` clock value.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A log file name does not embed a `DD Mon YY` date.
    #[error("No session date in file name: {0}")]
    FilenameDate(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the playtime crates.
pub type Result<T> = std::result::Result<T, PlaytimeError>;
