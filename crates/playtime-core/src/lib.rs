//! Core types for SC Playtime.
//!
//! Timestamp extraction, session duration arithmetic, the shared error type,
//! report models, console formatting and CLI settings.

pub mod duration;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod timestamp;

pub use duration::{calculate_time_difference, SessionDuration};
pub use error::{PlaytimeError, Result};
pub use timestamp::{extract_timestamp, NormalizedTimestamp, RawTimestamp};
