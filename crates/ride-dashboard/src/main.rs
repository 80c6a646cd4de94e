mod bootstrap;

use std::sync::Arc;

use anyhow::Result;
use dashboard_core::settings::Settings;
use dashboard_data::map::MapView;
use dashboard_data::reader::load_dataset_with_stats;
use dashboard_runtime::controller::DashboardController;
use dashboard_ui::app::{restore_terminal, App, ViewMode};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;

    bootstrap::ensure_directories()?;
    let log_file = bootstrap::log_target(settings.log_file.as_deref(), &settings.view);
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Ride Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, View: {}, Theme: {}",
        settings.data.display(),
        settings.view,
        settings.theme
    );

    let (dataset, stats) = load_dataset_with_stats(&settings.data)?;
    if stats.rows_skipped > 0 {
        tracing::warn!(
            skipped = stats.rows_skipped,
            "some rows were skipped; see earlier warnings"
        );
    }

    let selection = settings.initial_selection();
    let mut controller = DashboardController::new(Arc::new(dataset));
    let source = settings.data.display().to_string();
    let map_view = MapView::new(settings.center_lat, settings.center_lon, settings.zoom);

    match settings.view.as_str() {
        "json" => {
            let snapshot = controller.update(&selection);
            println!("{}", snapshot.to_json_pretty()?);
        }

        "table" => {
            tracing::info!("Running table view...");
            let app = App::new(
                &settings.theme,
                ViewMode::Table,
                controller,
                selection,
                map_view,
                source,
            );
            tokio::select! {
                result = app.run_table() => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                    restore_terminal()?;
                }
            }
        }

        "dashboard" => {
            tracing::info!("Starting interactive dashboard...");
            let app = App::new(
                &settings.theme,
                ViewMode::Dashboard,
                controller,
                selection,
                map_view,
                source,
            );

            // The loop exits on 'q' / Ctrl+C inside the TUI. Ctrl+C is also
            // handled at the OS level for signals that bypass raw mode.
            tokio::select! {
                result = app.run_dashboard() => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                    restore_terminal()?;
                }
            }
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
