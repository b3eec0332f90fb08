//! Command line and environment configuration.

use crate::data::DataPaths;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bikeshare-dashboard")]
#[command(about = "Bike sharing rental analysis dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        long,
        global = true,
        env = "BIKESHARE_HOUR_PATH",
        default_value = "hour.csv",
        help = "Hourly rentals CSV"
    )]
    pub hour_path: PathBuf,

    #[arg(
        long,
        global = true,
        env = "BIKESHARE_DAY_PATH",
        default_value = "day.csv",
        help = "Daily rentals CSV"
    )]
    pub day_path: PathBuf,

    #[arg(
        long,
        global = true,
        help = "Initial analysis label, e.g. \"Per Jam\" or \"Musim\""
    )]
    pub view: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Open the interactive dashboard (default)
    Gui,

    /// Render the charts to PNG files and write a JSON summary
    Export {
        #[arg(short, long, default_value = "report", help = "Output directory")]
        out_dir: PathBuf,

        #[arg(long, default_value_t = 1200)]
        width: u32,

        #[arg(long, default_value_t = 720)]
        height: u32,
    },
}

/// Settings shared by the dashboard and the headless report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardConfig {
    pub paths: DataPaths,
    /// Raw selector label; unknown labels select no view.
    pub initial_view: Option<String>,
}

impl From<&Cli> for DashboardConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            paths: DataPaths::new(cli.hour_path.clone(), cli.day_path.clone()),
            initial_view: cli.view.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_subcommand_with_paths() {
        let cli = Cli::try_parse_from([
            "bikeshare-dashboard",
            "export",
            "--out-dir",
            "out",
            "--hour-path",
            "data/hour.csv",
            "--view",
            "Musim",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Export {
                out_dir: PathBuf::from("out"),
                width: 1200,
                height: 720,
            })
        );
        let config = DashboardConfig::from(&cli);
        assert_eq!(config.paths.hour_path, PathBuf::from("data/hour.csv"));
        assert_eq!(config.initial_view.as_deref(), Some("Musim"));
    }
}
