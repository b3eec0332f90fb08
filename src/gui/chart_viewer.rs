//! Chart Viewer Widget
//! Central scrollable page: data previews, the selected chart with its
//! commentary, and the closing summary.

use crate::charts::ChartPlotter;
use crate::data::TablePreview;
use crate::views::narrative::{self, Line};
use crate::views::{View, ViewData};
use egui::{Color32, RichText, ScrollArea};

/// Rows shown in each data preview table.
pub const PREVIEW_ROWS: usize = 5;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// What the chart area currently shows.
#[derive(Debug, Clone)]
pub enum ChartState {
    /// No analysis selected, or the label matched none.
    Empty,
    Ready { view: View, data: ViewData },
    /// The view's transform failed; other views may still work.
    Failed { view: View, message: String },
}

/// Scrollable dashboard page.
pub struct ChartViewer {
    pub hour_preview: TablePreview,
    pub day_preview: TablePreview,
    pub state: ChartState,
    /// Session-level load failure, shown instead of everything data-driven.
    pub load_error: Option<String>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            hour_preview: TablePreview::default(),
            day_preview: TablePreview::default(),
            state: ChartState::Empty,
            load_error: None,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything derived from the loaded data
    pub fn clear(&mut self) {
        self.hour_preview = TablePreview::default();
        self.day_preview = TablePreview::default();
        self.state = ChartState::Empty;
    }

    /// Chart shown right now, if any.
    pub fn current_chart(&self) -> Option<(View, &ViewData)> {
        match &self.state {
            ChartState::Ready { view, data } => Some((*view, data)),
            _ => None,
        }
    }

    /// Draw the dashboard page
    pub fn show(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(error) = &self.load_error {
                    Self::draw_load_error(ui, error);
                } else {
                    Self::draw_preview(
                        ui,
                        "Tinjauan Data Hour",
                        "hour_preview",
                        &self.hour_preview,
                    );
                    ui.add_space(10.0);
                    Self::draw_preview(ui, "Tinjauan Data Day", "day_preview", &self.day_preview);
                    ui.add_space(15.0);
                    Self::draw_chart_state(ui, &self.state);
                }

                ui.add_space(20.0);
                ui.separator();
                ui.label(RichText::new(narrative::CONCLUSION_TITLE).size(20.0).strong());
                Self::draw_narrative(ui, narrative::CONCLUSION);
                ui.add_space(10.0);
            });
    }

    fn draw_load_error(ui: &mut egui::Ui, error: &str) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, ERROR_COLOR))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("⚠ Data gagal dimuat")
                        .size(18.0)
                        .strong()
                        .color(ERROR_COLOR),
                );
                ui.add_space(4.0);
                ui.label(RichText::new(error).size(12.0));
            });
    }

    fn draw_preview(ui: &mut egui::Ui, title: &str, id: &str, preview: &TablePreview) {
        ui.label(RichText::new(title).size(18.0).strong());
        ui.add_space(4.0);

        if preview.columns.is_empty() {
            ui.label(RichText::new("Loading...").color(Color32::GRAY));
            return;
        }

        ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
            egui::Grid::new(id)
                .striped(true)
                .min_col_width(40.0)
                .spacing([10.0, 4.0])
                .show(ui, |ui| {
                    for column in &preview.columns {
                        ui.label(RichText::new(column).strong().size(11.0));
                    }
                    ui.end_row();

                    for row in &preview.rows {
                        for cell in row {
                            ui.label(RichText::new(cell).size(11.0));
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn draw_chart_state(ui: &mut egui::Ui, state: &ChartState) {
        match state {
            ChartState::Empty => {}
            ChartState::Ready { view, data } => {
                ui.label(RichText::new(view.heading()).size(18.0).strong());
                ui.add_space(6.0);
                ChartPlotter::draw(ui, &view.labels(), data);
                ui.add_space(10.0);
                Self::draw_narrative(ui, view.narrative());
            }
            ChartState::Failed { view, message } => {
                ui.label(RichText::new(view.heading()).size(18.0).strong());
                ui.add_space(6.0);
                ui.label(
                    RichText::new(format!("⚠ Analisis tidak dapat ditampilkan: {}", message))
                        .color(ERROR_COLOR),
                );
            }
        }
    }

    /// Render commentary text with bullets and bold spans.
    fn draw_narrative(ui: &mut egui::Ui, text: &str) {
        for Line { bullet, spans } in narrative::parse(text) {
            if spans.is_empty() {
                ui.add_space(6.0);
                continue;
            }
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                if bullet {
                    ui.label("  •  ");
                }
                for span in spans {
                    let text = RichText::new(span.text).size(13.0);
                    ui.label(if span.bold { text.strong() } else { text });
                }
            });
        }
    }
}
