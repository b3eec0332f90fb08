//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::{gradient, SCATTER, SEASONS, WEEKDAY, WEEKEND};
use crate::data::{DayType, DayTypeAverage, HourlyAverage, SeasonalBreakdown, TemperaturePoint};
use crate::stats::GroupStats;
use crate::views::{ChartLabels, ViewData};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Plot, PlotPoints, Points};

const CHART_HEIGHT: f32 = 380.0;

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the chart matching a view's aggregate.
    pub fn draw(ui: &mut egui::Ui, labels: &ChartLabels, data: &ViewData) {
        ui.label(RichText::new(labels.title).size(15.0).strong());
        ui.add_space(4.0);

        match data {
            ViewData::Hourly(rows) => Self::draw_hourly_chart(ui, labels, rows),
            ViewData::Temperature(points) => Self::draw_temperature_chart(ui, labels, points),
            ViewData::Seasonal(breakdown) => {
                Self::draw_seasonal_chart(ui, labels, breakdown);
                ui.add_space(8.0);
                Self::draw_season_table(ui, breakdown);
            }
            ViewData::DayType(rows) => Self::draw_day_type_chart(ui, labels, rows),
        }
    }

    /// One bar per hour of the day.
    pub fn draw_hourly_chart(ui: &mut egui::Ui, labels: &ChartLabels, rows: &[HourlyAverage]) {
        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(row.hour as f64, row.mean_count)
                    .width(0.8)
                    .fill(Color32::from(gradient(i, rows.len())))
                    .name(format!("Jam {}", row.hour))
            })
            .collect();

        Plot::new("hourly_average")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(labels.x_label)
            .y_axis_label(labels.y_label)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Every day as one point, translucent so dense areas stand out.
    pub fn draw_temperature_chart(
        ui: &mut egui::Ui,
        labels: &ChartLabels,
        points: &[TemperaturePoint],
    ) {
        let plot_points: PlotPoints = points
            .iter()
            .map(|p| [p.temp_celsius, p.count])
            .collect();

        Plot::new("temperature_effect")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(labels.x_label)
            .y_axis_label(labels.y_label)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(plot_points)
                        .radius(3.0)
                        .color(Color32::from(SCATTER).gamma_multiply(0.5))
                        .name("Hari"),
                );
            });
    }

    /// Boxplot of hourly counts per season with outliers as points.
    pub fn draw_seasonal_chart(
        ui: &mut egui::Ui,
        labels: &ChartLabels,
        breakdown: &SeasonalBreakdown,
    ) {
        let codes: Vec<i64> = breakdown.seasons.iter().map(|g| g.season.code()).collect();

        Plot::new("seasonal")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(labels.x_label)
            .y_axis_label(labels.y_label)
            .x_axis_formatter(move |mark, _range| {
                let code = mark.value.round() as i64;
                if (mark.value - code as f64).abs() < 1e-6 && codes.contains(&code) {
                    code.to_string()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for group in &breakdown.seasons {
                    let x = group.season.code() as f64;
                    let color = Color32::from(SEASONS[(group.season.code() - 1) as usize]);
                    let stats = &group.stats;

                    let box_elem = BoxElem::new(
                        x,
                        BoxSpread::new(
                            stats.whisker_low,
                            stats.q1,
                            stats.median,
                            stats.q3,
                            stats.whisker_high,
                        ),
                    )
                    .box_width(0.6)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color))
                    .name(group.season.to_string());

                    plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(group.season.name()));

                    if !stats.outliers.is_empty() {
                        let outliers: PlotPoints =
                            stats.outliers.iter().map(|&y| [x, y]).collect();
                        plot_ui.points(
                            Points::new(outliers)
                                .radius(2.0)
                                .color(color.gamma_multiply(0.7))
                                .name(format!("{} outliers", group.season.name())),
                        );
                    }
                }
            });

        if breakdown.unmatched > 0 {
            ui.label(
                RichText::new(format!(
                    "⚠ {} baris per jam tanpa data musim harian tidak ditampilkan",
                    breakdown.unmatched
                ))
                .size(11.0)
                .color(Color32::from_rgb(220, 53, 69)),
            );
        }
    }

    /// Two bars: weekday then weekend.
    pub fn draw_day_type_chart(ui: &mut egui::Ui, labels: &ChartLabels, rows: &[DayTypeAverage]) {
        let names: Vec<&'static str> = rows.iter().map(|r| r.day_type.label()).collect();

        let bars: Vec<Bar> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let color = match row.day_type {
                    DayType::Weekday => WEEKDAY,
                    DayType::Weekend => WEEKEND,
                };
                Bar::new(i as f64, row.mean_count)
                    .width(0.6)
                    .fill(Color32::from(color))
                    .name(row.day_type.label())
            })
            .collect();

        Plot::new("weekday_weekend")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(labels.x_label)
            .y_axis_label(labels.y_label)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    names.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Descriptive statistics per season.
    pub fn draw_season_table(ui: &mut egui::Ui, breakdown: &SeasonalBreakdown) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("season_stats_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Musim", "N", "Mean", "Median", "Std", "Q1", "Q3"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for group in &breakdown.seasons {
                            let color = Color32::from(SEASONS[(group.season.code() - 1) as usize]);
                            ui.label(
                                RichText::new(group.season.to_string())
                                    .size(11.0)
                                    .color(color),
                            );
                            Self::stats_cells(ui, &group.stats);
                            ui.end_row();
                        }
                    });
            });
    }

    fn stats_cells(ui: &mut egui::Ui, stats: &GroupStats) {
        ui.label(RichText::new(stats.count.to_string()).size(11.0));
        for value in [stats.mean, stats.median, stats.std, stats.q1, stats.q3] {
            ui.label(RichText::new(format!("{:.1}", value)).size(11.0));
        }
    }
}
