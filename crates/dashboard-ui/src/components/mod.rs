//! Reusable widgets for the dashboard screen.

pub mod colorbar;
pub mod header;
pub mod picker;
