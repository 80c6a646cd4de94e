//! Core domain types for the ride dashboard.
//!
//! Holds the ride data model, the selection state shared by every view,
//! error types, command-line settings and display formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
