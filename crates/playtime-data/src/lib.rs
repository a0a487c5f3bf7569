//! Data ingestion layer for SC Playtime.
//!
//! Discovers log backups, scans each one for its first and last timestamp,
//! reads the session date from the file name and aggregates the results into
//! a [`aggregator::PlaytimeReport`].

pub mod aggregator;
pub mod dates;
pub mod reader;

pub use playtime_core as core;
