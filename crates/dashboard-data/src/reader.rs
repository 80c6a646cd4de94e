//! CSV discovery and loading for the ride dashboard.
//!
//! Accepts either a single CSV file or a directory that is searched
//! recursively for `*.csv` files, and turns every valid row into a
//! [`Ride`]. Malformed rows are logged and skipped; the dataset is only
//! rejected when nothing usable remains.

use std::path::{Path, PathBuf};

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::Ride;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;

/// Columns a CSV must carry for rides to be plotted. `BeginAddress` and
/// `pedido` only feed the hover label and default to empty.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Year", "Month", "Hour", "LatBegin", "LngBegin"];

/// Row counters for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files: usize,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Resolve `data_path` to the list of CSV files to read, sorted by path.
///
/// A file path is returned as-is whatever its extension; a directory is
/// walked recursively for `*.csv` files.
pub fn find_csv_files(data_path: &Path) -> Result<Vec<PathBuf>> {
    if !data_path.exists() {
        return Err(DashboardError::DataPathNotFound(data_path.to_path_buf()));
    }
    if data_path.is_file() {
        return Ok(vec![data_path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    if files.is_empty() {
        return Err(DashboardError::NoDataFiles(data_path.to_path_buf()));
    }

    files.sort();
    Ok(files)
}

/// Load every ride under `data_path` into an immutable [`Dataset`].
pub fn load_dataset(data_path: &Path) -> Result<Dataset> {
    load_dataset_with_stats(data_path).map(|(dataset, _)| dataset)
}

/// Like [`load_dataset`] but also returns the row counters.
pub fn load_dataset_with_stats(data_path: &Path) -> Result<(Dataset, LoadStats)> {
    let files = find_csv_files(data_path)?;
    let mut stats = LoadStats {
        files: files.len(),
        ..LoadStats::default()
    };
    let mut rides: Vec<Ride> = Vec::new();

    for file_path in &files {
        let file_stats = process_single_file(file_path, &mut rides)?;
        stats.rows_read += file_stats.rows_read;
        stats.rows_skipped += file_stats.rows_skipped;
    }

    if rides.is_empty() {
        return Err(DashboardError::EmptyDataset(data_path.to_path_buf()));
    }

    info!(
        files = stats.files,
        rides = rides.len(),
        skipped = stats.rows_skipped,
        "ride dataset loaded from {}",
        data_path.display()
    );

    Ok((Dataset::new(rides), stats))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse one CSV file, appending valid rides to `out`.
fn process_single_file(file_path: &Path, out: &mut Vec<Ride>) -> Result<LoadStats> {
    let file = std::fs::File::open(file_path).map_err(|source| DashboardError::FileRead {
        path: file_path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn {
                path: file_path.to_path_buf(),
                column,
            });
        }
    }

    let mut stats = LoadStats {
        files: 1,
        ..LoadStats::default()
    };

    for result in rdr.records() {
        stats.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable row in {}: {}", file_path.display(), e);
                stats.rows_skipped += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let ride: Ride = match record.deserialize(Some(&headers)) {
            Ok(r) => r,
            Err(e) => {
                warn!(line, "Skipping malformed row in {}: {}", file_path.display(), e);
                stats.rows_skipped += 1;
                continue;
            }
        };

        if let Err(e) = ride.validate() {
            warn!(line, "Skipping row in {}: {}", file_path.display(), e);
            stats.rows_skipped += 1;
            continue;
        }

        out.push(ride);
    }

    debug!(
        "File {}: {} read, {} skipped",
        file_path.display(),
        stats.rows_read,
        stats.rows_skipped,
    );

    Ok(stats)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
