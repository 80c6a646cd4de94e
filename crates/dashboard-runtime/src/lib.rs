//! Runtime layer for the ride dashboard.
//!
//! Turns picker changes into dashboard snapshots: the three derived views
//! (ride count, hourly histogram, map layer) recomputed for a selection.

pub mod controller;

pub use dashboard_core as core;
pub use dashboard_data as data;
