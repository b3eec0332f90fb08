//! Headless report export
//! Renders the selected views to PNG files and writes their aggregates as JSON.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{DatasetCache, LoaderError};
use crate::views::{ChartKind, View, ViewData};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Cannot write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of one view in the report.
#[derive(Debug, Clone, Serialize)]
pub struct ViewReport {
    pub view: View,
    pub label: &'static str,
    pub chart_kind: ChartKind,
    /// PNG written for this view, if rendering succeeded.
    pub chart: Option<PathBuf>,
    /// Transform or rendering failure, if any.
    pub error: Option<String>,
    pub data: Option<ViewData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub hour_path: PathBuf,
    pub day_path: PathBuf,
    pub hour_rows: usize,
    pub day_rows: usize,
    pub views: Vec<ViewReport>,
}

impl Report {
    pub fn failures(&self) -> usize {
        self.views.iter().filter(|v| v.error.is_some()).count()
    }
}

/// Views requested by the configuration: all four, or the single labelled one.
pub fn requested_views(config: &DashboardConfig) -> Vec<View> {
    match config.initial_view.as_deref() {
        None => View::ALL.to_vec(),
        Some(label) => match View::from_label(label) {
            Some(view) => vec![view],
            None => {
                warn!(label, "Unknown analysis label, nothing to export");
                Vec::new()
            }
        },
    }
}

/// Load the data, compute each requested view and write the report files.
///
/// A load failure aborts the export. A failing view is recorded in the
/// summary and does not stop the others.
pub fn export(
    config: &DashboardConfig,
    out_dir: &Path,
    size: (u32, u32),
) -> Result<Report, ReportError> {
    let mut cache = DatasetCache::new();
    let data = cache.get_or_load(&config.paths)?;
    fs::create_dir_all(out_dir)?;

    let views = requested_views(config)
        .into_iter()
        .map(|view| {
            let mut entry = ViewReport {
                view,
                label: view.label(),
                chart_kind: view.chart_kind(),
                chart: None,
                error: None,
                data: None,
            };

            match view.compute(&data) {
                Ok(result) => {
                    let path = out_dir.join(format!("{}.png", view.slug()));
                    match StaticChartRenderer::render_to_file(view, &result, &path, size) {
                        Ok(()) => {
                            info!(view = view.label(), path = %path.display(), "Chart written");
                            entry.chart = Some(path);
                        }
                        Err(e) => {
                            error!(view = view.label(), "Render failed: {}", e);
                            entry.error = Some(e.to_string());
                        }
                    }
                    entry.data = Some(result);
                }
                Err(e) => {
                    error!(view = view.label(), "Transform failed: {}", e);
                    entry.error = Some(e.to_string());
                }
            }
            entry
        })
        .collect();

    let report = Report {
        hour_path: config.paths.hour_path.clone(),
        day_path: config.paths.day_path.clone(),
        hour_rows: data.hour.height(),
        day_rows: data.day.height(),
        views,
    };

    let summary_path = out_dir.join(SUMMARY_FILE);
    fs::write(&summary_path, serde_json::to_string_pretty(&report)?)?;
    info!(path = %summary_path.display(), "Summary written");

    Ok(report)
}
