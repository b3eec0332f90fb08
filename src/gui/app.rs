//! Bike Sharing Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{BikeData, DataPaths, DatasetCache, Snapshot};
use crate::gui::chart_viewer::{ChartState, PREVIEW_ROWS};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::views::View;
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

const EXPORT_SIZE: (u32, u32) = (1200, 720);

/// CSV loading result from background thread
enum LoadResult {
    Complete {
        paths: DataPaths,
        snapshot: Snapshot,
    },
    Error { paths: DataPaths, message: String },
}

/// Which input file a browse action replaces.
#[derive(Debug, Clone, Copy)]
enum InputFile {
    Hour,
    Day,
}

/// Main application window.
pub struct DashboardApp {
    cache: DatasetCache,
    data: Option<Arc<BikeData>>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let selected_view = match config.initial_view.as_deref() {
            None => Some(View::HourlyAverage),
            Some(label) => {
                let view = View::from_label(label);
                if view.is_none() {
                    warn!(label, "Unknown analysis label, no chart will be shown");
                }
                view
            }
        };

        let mut app = Self {
            cache: DatasetCache::new(),
            data: None,
            control_panel: ControlPanel::new(config.paths, selected_view),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        app.refresh();
        app
    }

    /// Serve the tables from the cache, or reload them if missing or stale.
    fn refresh(&mut self) {
        match self.cache.get_fresh(&self.control_panel.paths) {
            Some(data) => self.use_data(data),
            None => self.start_loading(),
        }
    }

    /// Load both CSV files in a background thread
    fn start_loading(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        let paths = self.control_panel.paths.clone();
        self.control_panel.set_status("Loading CSV files...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match Snapshot::load(&paths) {
                Ok(snapshot) => LoadResult::Complete { paths, snapshot },
                Err(e) => LoadResult::Error {
                    paths,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { paths, snapshot }) => {
                self.is_loading = false;
                let data = Arc::clone(&snapshot.data);
                self.cache.store(paths.clone(), snapshot);

                if paths == self.control_panel.paths {
                    self.chart_viewer.load_error = None;
                    self.use_data(data);
                } else {
                    // Paths changed while loading
                    self.refresh();
                }
            }
            Ok(LoadResult::Error { paths, message }) => {
                self.is_loading = false;
                error!("Load failed: {}", message);

                if paths == self.control_panel.paths {
                    self.data = None;
                    self.chart_viewer.clear();
                    self.chart_viewer.load_error = Some(message.clone());
                    self.control_panel.export_enabled = false;
                    self.control_panel.set_error(&format!("Error: {}", message));
                } else {
                    self.refresh();
                }
            }
            Err(_) => {
                // Put receiver back if still needed
                self.load_rx = Some(rx);
            }
        }
    }

    /// Show freshly served tables and recompute the selected view.
    fn use_data(&mut self, data: Arc<BikeData>) {
        let changed = self
            .data
            .as_ref()
            .map_or(true, |current| !Arc::ptr_eq(current, &data));

        if changed {
            self.chart_viewer.hour_preview = data.hour_preview(PREVIEW_ROWS);
            self.chart_viewer.day_preview = data.day_preview(PREVIEW_ROWS);
            self.control_panel.set_status(&format!(
                "Loaded {} hourly rows, {} daily rows",
                data.hour.height(),
                data.day.height()
            ));
        }

        self.data = Some(data);
        self.compute_view();
    }

    /// Run the selected view's transform over the current tables.
    fn compute_view(&mut self) {
        let Some(data) = &self.data else {
            return;
        };

        self.chart_viewer.state = match self.control_panel.selected_view {
            None => ChartState::Empty,
            Some(view) => match view.compute(data) {
                Ok(result) => ChartState::Ready { view, data: result },
                Err(e) => {
                    error!(view = view.label(), "Transform failed: {}", e);
                    ChartState::Failed {
                        view,
                        message: e.to_string(),
                    }
                }
            },
        };
        self.control_panel.export_enabled = self.chart_viewer.current_chart().is_some();
    }

    /// Handle CSV file selection for one input
    fn handle_browse(&mut self, input: InputFile) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        info!(?input, path = %path.display(), "Input file changed");
        match input {
            InputFile::Hour => self.control_panel.paths.hour_path = path,
            InputFile::Day => self.control_panel.paths.day_path = path,
        }
        self.chart_viewer.load_error = None;
        self.refresh();
    }

    fn handle_reload(&mut self) {
        self.cache.invalidate(&self.control_panel.paths);
        self.chart_viewer.load_error = None;
        self.start_loading();
    }

    /// Save the chart currently shown as PNG and open it
    fn handle_export_chart(&mut self) {
        let Some((view, data)) = self.chart_viewer.current_chart() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", view.slug()))
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_to_file(view, data, &output_path, EXPORT_SIZE) {
            Ok(()) => {
                info!(path = %output_path.display(), "Chart exported");
                if let Err(e) = open::that(&output_path) {
                    warn!("Cannot open exported chart: {}", e);
                }
                self.control_panel
                    .set_status(&format!("Chart saved to {}", output_path.display()));
            }
            Err(e) => {
                error!("Chart export failed: {}", e);
                self.control_panel.set_error(&format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::ViewChanged => self.refresh(),
                        ControlPanelAction::BrowseHour => self.handle_browse(InputFile::Hour),
                        ControlPanelAction::BrowseDay => self.handle_browse(InputFile::Day),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard page
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
