//! Data layer for the ride dashboard.
//!
//! Discovers and parses the ride CSV files, holds the immutable dataset and
//! derives the per-hour histogram and the map layer for a selection.

pub mod dataset;
pub mod histogram;
pub mod map;
pub mod reader;

pub use dashboard_core as core;
pub use dataset::Dataset;
