//! Control Panel Widget
//! Left side panel with the analysis selector and data source controls.

use crate::data::DataPaths;
use crate::views::View;
use egui::{Color32, ComboBox, RichText};
use std::path::Path;

/// Left side control panel with view selection and file controls.
pub struct ControlPanel {
    pub paths: DataPaths,
    /// `None` when the configured label matched no analysis.
    pub selected_view: Option<View>,
    pub status: String,
    pub is_error: bool,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(paths: DataPaths, selected_view: Option<View>) -> Self {
        Self {
            paths,
            selected_view,
            status: "Ready".to_string(),
            is_error: false,
            export_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Sharing")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Dashboard Analisis Data")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Analysis Selector =====
        ui.label(RichText::new("⚙️ Pengaturan Dashboard").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("Pilih Analisis:");

        let selected_text = self.selected_view.map(View::label).unwrap_or("-");
        ComboBox::from_id_salt("analysis_option")
            .width(230.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for view in View::ALL {
                    if ui
                        .selectable_label(self.selected_view == Some(view), view.label())
                        .clicked()
                        && self.selected_view != Some(view)
                    {
                        self.selected_view = Some(view);
                        action = ControlPanelAction::ViewChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        if Self::file_row(ui, "Hour:", &self.paths.hour_path) {
            action = ControlPanelAction::BrowseHour;
        }
        ui.add_space(4.0);
        if Self::file_row(ui, "Day:", &self.paths.day_path) {
            action = ControlPanelAction::BrowseDay;
        }

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🔄 Reload Data").size(14.0))
                .min_size(egui::vec2(180.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Reload;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Save Chart PNG").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportChart;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// One labelled file path with a browse button. Returns true when clicked.
    fn file_row(ui: &mut egui::Ui, label: &str, path: &Path) -> bool {
        let mut clicked = false;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(label).size(12.0).strong());
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());
                    ui.label(RichText::new(name).size(12.0))
                        .on_hover_text(path.display().to_string());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            clicked = true;
                        }
                    });
                });
            });
        clicked
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ViewChanged,
    BrowseHour,
    BrowseDay,
    Reload,
    ExportChart,
}
