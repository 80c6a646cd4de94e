use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the ride dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A snapshot could not be serialised to JSON.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A ride record carried an out-of-range or malformed value.
    #[error("Invalid ride record: {0}")]
    InvalidRecord(String),

    /// A CSV file lacks one of the columns every ride needs.
    #[error("{path} is missing required column {column}")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// The configured data path does not exist.
    #[error("Data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No CSV files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoDataFiles(PathBuf),

    /// Every record was rejected, or the files held no rows at all.
    #[error("No valid ride records in {0}")]
    EmptyDataset(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashboardError::FileRead {
            path: PathBuf::from("/some/rides.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/rides.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_invalid_record() {
        let err = DashboardError::InvalidRecord("hour 24 out of range".to_string());
        assert_eq!(err.to_string(), "Invalid ride record: hour 24 out of range");
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DashboardError::MissingColumn {
            path: PathBuf::from("rides.csv"),
            column: "Hour",
        };
        assert_eq!(err.to_string(), "rides.csv is missing required column Hour");
    }

    #[test]
    fn test_error_display_data_path_not_found() {
        let err = DashboardError::DataPathNotFound(PathBuf::from("/missing/rides.csv"));
        assert_eq!(err.to_string(), "Data path not found: /missing/rides.csv");
    }

    #[test]
    fn test_error_display_no_data_files() {
        let err = DashboardError::NoDataFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No CSV files found in /empty/dir");
    }

    #[test]
    fn test_error_display_empty_dataset() {
        let err = DashboardError::EmptyDataset(PathBuf::from("rides.csv"));
        assert_eq!(err.to_string(), "No valid ride records in rides.csv");
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("zoom must be positive".to_string());
        assert_eq!(err.to_string(), "Configuration error: zoom must be positive");
    }

    #[test]
    fn test_error_from_csv() {
        let data = "Year,Month\n2019,abc\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let csv_err = rdr
            .deserialize::<(u16, u8)>()
            .next()
            .expect("one row")
            .unwrap_err();
        let err: DashboardError = csv_err.into();
        assert!(err.to_string().contains("Failed to parse CSV"));
    }
}
