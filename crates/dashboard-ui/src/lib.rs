//! Terminal UI layer for the ride dashboard.
//!
//! Provides themes, the year/month pickers, the hour-coloured map, the
//! hourly histogram and table views, and the main application event loop
//! built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod histogram_view;
pub mod map_view;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
