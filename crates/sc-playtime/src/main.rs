mod bootstrap;

use anyhow::Result;
use playtime_core::settings::Settings;
use playtime_data::aggregator::{AggregatorConfig, PlaytimeAggregator};
use playtime_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("SC Playtime v{} starting", env!("CARGO_PKG_VERSION"));

    let log_dir = bootstrap::resolve_log_dir(&settings)?;
    tracing::info!(
        "Reading .{} files from {}",
        settings.extension,
        log_dir.display()
    );

    let config = AggregatorConfig::new(&log_dir).with_extension(settings.extension.clone());
    let report = PlaytimeAggregator::aggregate_directory(&config)?;

    if let Err(e) = settings.remember_log_dir(&log_dir) {
        tracing::debug!("Could not persist log directory: {}", e);
    }

    for line in report.console_lines() {
        println!("{line}");
    }

    if settings.no_chart {
        return Ok(());
    }

    let app = App::new(&settings.theme, log_dir.display().to_string());
    app.run_chart(report.chart_series(), report.breakdown())?;

    Ok(())
}
