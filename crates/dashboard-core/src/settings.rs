use clap::Parser;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};
use crate::models::Selection;

/// Default map centre latitude.
pub const DEFAULT_CENTER_LAT: f64 = -3.74;
/// Default map centre longitude.
pub const DEFAULT_CENTER_LON: f64 = -38.49;
/// Default map zoom level.
pub const DEFAULT_ZOOM: f64 = 12.0;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive dashboard for ride records
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ride-dashboard",
    about = "Filter ride records by year and month and explore them by hour and location",
    version
)]
pub struct Settings {
    /// Ride dataset: a CSV file or a directory of CSV files
    #[arg(long, env = "RIDES_DATA", default_value = "uber_filtro.csv")]
    pub data: PathBuf,

    /// View mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "table", "json"])]
    pub view: String,

    /// Years selected at startup (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "2019,2018")]
    pub years: Vec<u16>,

    /// Months selected at startup (comma separated, 1-12)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "6,7,8",
        value_parser = clap::value_parser!(u8).range(1..=12)
    )]
    pub months: Vec<u8>,

    /// Start with no year or month selected
    #[arg(long)]
    pub all: bool,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Map centre latitude
    #[arg(long, default_value_t = DEFAULT_CENTER_LAT, allow_negative_numbers = true)]
    pub center_lat: f64,

    /// Map centre longitude
    #[arg(long, default_value_t = DEFAULT_CENTER_LON, allow_negative_numbers = true)]
    pub center_lon: f64,

    /// Map zoom level (1-20)
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f64,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let settings = Settings::parse_from(args);
        settings.finalize()
    }

    /// Validate cross-field constraints and apply the `--debug` flag.
    fn finalize(mut self) -> Result<Self> {
        if !(1.0..=20.0).contains(&self.zoom) {
            return Err(DashboardError::Config(format!(
                "zoom must be between 1 and 20, got {}",
                self.zoom
            )));
        }
        if !(-90.0..=90.0).contains(&self.center_lat) {
            return Err(DashboardError::Config(format!(
                "center latitude {} outside -90..90",
                self.center_lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.center_lon) {
            return Err(DashboardError::Config(format!(
                "center longitude {} outside -180..180",
                self.center_lon
            )));
        }

        if self.debug {
            self.log_level = "DEBUG".to_string();
        }

        Ok(self)
    }

    /// The picker state the dashboard opens with.
    pub fn initial_selection(&self) -> Selection {
        if self.all {
            Selection::all()
        } else {
            Selection::new(self.years.iter().copied(), self.months.iter().copied())
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["ride-dashboard"]);

        assert_eq!(settings.data, PathBuf::from("uber_filtro.csv"));
        assert_eq!(settings.view, "dashboard");
        assert_eq!(settings.years, vec![2019, 2018]);
        assert_eq!(settings.months, vec![6, 7, 8]);
        assert!(!settings.all);
        assert_eq!(settings.theme, "auto");
        assert!((settings.center_lat - DEFAULT_CENTER_LAT).abs() < f64::EPSILON);
        assert!((settings.center_lon - DEFAULT_CENTER_LON).abs() < f64::EPSILON);
        assert!((settings.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_years_and_months() {
        let settings = Settings::parse_from([
            "ride-dashboard",
            "--years",
            "2017,2018",
            "--months",
            "1,12",
        ]);
        assert_eq!(settings.years, vec![2017, 2018]);
        assert_eq!(settings.months, vec![1, 12]);
    }

    #[test]
    fn test_settings_rejects_month_thirteen() {
        let result = Settings::try_parse_from(["ride-dashboard", "--months", "6,13"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_rejects_unknown_view() {
        let result = Settings::try_parse_from(["ride-dashboard", "--view", "chart"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_negative_center() {
        let settings = Settings::parse_from([
            "ride-dashboard",
            "--center-lat",
            "-23.55",
            "--center-lon",
            "-46.63",
        ]);
        assert!((settings.center_lat + 23.55).abs() < 1e-9);
        assert!((settings.center_lon + 46.63).abs() < 1e-9);
    }

    #[test]
    fn test_initial_selection_defaults() {
        let settings = Settings::parse_from(["ride-dashboard"]);
        let sel = settings.initial_selection();
        assert_eq!(sel, Selection::new([2018, 2019], [6, 7, 8]));
    }

    #[test]
    fn test_initial_selection_all_flag() {
        let settings = Settings::parse_from(["ride-dashboard", "--all"]);
        assert!(settings.initial_selection().is_unfiltered());
    }

    #[test]
    fn test_load_from_debug_overrides_log_level() {
        let settings = Settings::load_from(["ride-dashboard", "--debug"]).expect("load");
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_from_rejects_zoom_out_of_range() {
        let err = Settings::load_from(["ride-dashboard", "--zoom", "25"]).unwrap_err();
        assert!(err.to_string().contains("zoom"));
    }

    #[test]
    fn test_settings_cli_log_file() {
        let settings = Settings::parse_from(["ride-dashboard", "--log-file", "/tmp/rides.log"]);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/rides.log")));
    }
}
