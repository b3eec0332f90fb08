//! Bike Sharing Dashboard - Rental data analysis with interactive charts

use anyhow::Context;
use bikeshare_dashboard::config::{Cli, Commands, DashboardConfig};
use bikeshare_dashboard::gui::DashboardApp;
use bikeshare_dashboard::report;
use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run_gui(config: DashboardConfig) -> anyhow::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Dashboard Analisis Data Bike Sharing"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DashboardConfig::from(&cli);
    info!(?config, "Starting");

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => run_gui(config),
        Commands::Export {
            out_dir,
            width,
            height,
        } => {
            let report = report::export(&config, &out_dir, (width, height))
                .with_context(|| format!("Export to {} failed", out_dir.display()))?;

            println!(
                "Exported {} view(s) to {} ({} failed)",
                report.views.len(),
                out_dir.display(),
                report.failures()
            );
            Ok(())
        }
    }
}
