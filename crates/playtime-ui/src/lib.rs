//! Terminal UI layer for SC Playtime.
//!
//! Provides themes, the header component, the two-axis chart view and the
//! application event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod themes;

pub use playtime_core as core;
