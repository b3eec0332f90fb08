//! Static Chart Renderer
//! Draws the dashboard charts to PNG files with plotters.
//!
//! Layout per chart:
//! 1. Title centered on top
//! 2. Plot area with axis descriptions
//! 3. For the seasonal view, one box per season with outliers as dots

use crate::charts::{gradient, SCATTER, SEASONS, WEEKDAY, WEEKEND};
use crate::data::{DayType, DayTypeAverage, HourlyAverage, SeasonalBreakdown, TemperaturePoint};
use crate::views::{ChartLabels, View, ViewData};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Plot(String),
    #[error("Nothing to draw for {0}")]
    Empty(View),
}

fn plot_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Plot(e.to_string())
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one view's chart to a PNG file.
    pub fn render_to_file(
        view: View,
        data: &ViewData,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        debug!(view = view.label(), path = %path.display(), "Rendering static chart");

        if Self::is_empty(data) {
            return Err(RenderError::Empty(view));
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let labels = view.labels();
        match data {
            ViewData::Hourly(rows) => Self::draw_hourly(&root, &labels, rows)?,
            ViewData::Temperature(points) => Self::draw_temperature(&root, &labels, points)?,
            ViewData::Seasonal(breakdown) => Self::draw_seasonal(&root, &labels, breakdown)?,
            ViewData::DayType(rows) => Self::draw_day_type(&root, &labels, rows)?,
        }

        root.present().map_err(plot_err)
    }

    fn is_empty(data: &ViewData) -> bool {
        match data {
            ViewData::Hourly(rows) => rows.is_empty(),
            ViewData::Temperature(points) => points.is_empty(),
            ViewData::Seasonal(breakdown) => breakdown.seasons.is_empty(),
            ViewData::DayType(rows) => rows.is_empty(),
        }
    }

    fn draw_hourly(
        root: &Area<'_>,
        labels: &ChartLabels,
        rows: &[HourlyAverage],
    ) -> Result<(), RenderError> {
        let first = rows.iter().map(|r| r.hour).min().unwrap_or(0) as f64;
        let last = rows.iter().map(|r| r.hour).max().unwrap_or(23) as f64;
        let y_max = Self::bar_top(rows.iter().map(|r| r.mean_count));

        let mut chart = ChartBuilder::on(root)
            .caption(labels.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(first - 0.5..last + 0.5, 0.0..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len())
            .x_label_formatter(&|x: &f64| format!("{:.0}", x))
            .x_desc(labels.x_label)
            .y_desc(labels.y_label)
            .draw()
            .map_err(plot_err)?;

        let count = rows.len();
        chart
            .draw_series(rows.iter().enumerate().map(|(i, row)| {
                let x = row.hour as f64;
                let color = RGBColor::from(gradient(i, count));
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, row.mean_count)], color.filled())
            }))
            .map_err(plot_err)?;

        Ok(())
    }

    fn draw_temperature(
        root: &Area<'_>,
        labels: &ChartLabels,
        points: &[TemperaturePoint],
    ) -> Result<(), RenderError> {
        let x_range = Self::padded_range(points.iter().map(|p| p.temp_celsius));
        let y_range = Self::padded_range(points.iter().map(|p| p.count));

        let mut chart = ChartBuilder::on(root)
            .caption(labels.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc(labels.x_label)
            .y_desc(labels.y_label)
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(points.iter().map(|p| {
                Circle::new((p.temp_celsius, p.count), 3, RGBColor::from(SCATTER).mix(0.5).filled())
            }))
            .map_err(plot_err)?;

        Ok(())
    }

    fn draw_seasonal(
        root: &Area<'_>,
        labels: &ChartLabels,
        breakdown: &SeasonalBreakdown,
    ) -> Result<(), RenderError> {
        let y_range = Self::padded_range(
            breakdown
                .seasons
                .iter()
                .flat_map(|g| [g.stats.min, g.stats.max]),
        );

        let mut chart = ChartBuilder::on(root)
            .caption(labels.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(0.5..4.5, y_range)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(4)
            .x_label_formatter(&|x: &f64| {
                if (x - x.round()).abs() < 1e-6 {
                    format!("{:.0}", x)
                } else {
                    String::new()
                }
            })
            .x_desc(labels.x_label)
            .y_desc(labels.y_label)
            .draw()
            .map_err(plot_err)?;

        for group in &breakdown.seasons {
            let x = group.season.code() as f64;
            let color = RGBColor::from(SEASONS[(group.season.code() - 1) as usize]);
            let s = &group.stats;
            let half = 0.3;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - half, s.q1), (x + half, s.q3)],
                    color.mix(0.35).filled(),
                )))
                .map_err(plot_err)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - half, s.q1), (x + half, s.q3)],
                    color.stroke_width(2),
                )))
                .map_err(plot_err)?;

            let segments = [
                vec![(x - half, s.median), (x + half, s.median)],
                vec![(x, s.q3), (x, s.whisker_high)],
                vec![(x, s.q1), (x, s.whisker_low)],
                vec![(x - half / 2.0, s.whisker_high), (x + half / 2.0, s.whisker_high)],
                vec![(x - half / 2.0, s.whisker_low), (x + half / 2.0, s.whisker_low)],
            ];
            chart
                .draw_series(
                    segments
                        .into_iter()
                        .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
                )
                .map_err(plot_err)?;

            chart
                .draw_series(
                    s.outliers
                        .iter()
                        .map(|&y| Circle::new((x, y), 2, color.mix(0.7).filled())),
                )
                .map_err(plot_err)?;
        }

        Ok(())
    }

    fn draw_day_type(
        root: &Area<'_>,
        labels: &ChartLabels,
        rows: &[DayTypeAverage],
    ) -> Result<(), RenderError> {
        let names: Vec<&str> = rows.iter().map(|r| r.day_type.label()).collect();
        let y_max = Self::bar_top(rows.iter().map(|r| r.mean_count));

        let mut chart = ChartBuilder::on(root)
            .caption(labels.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5..rows.len() as f64 - 0.5, 0.0..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len())
            .x_label_formatter(&|x: &f64| {
                let idx = x.round();
                if (x - idx).abs() < 1e-6 && idx >= 0.0 {
                    names.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .x_desc(labels.x_label)
            .y_desc(labels.y_label)
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(rows.iter().enumerate().map(|(i, row)| {
                let x = i as f64;
                let color = RGBColor::from(match row.day_type {
                    DayType::Weekday => WEEKDAY,
                    DayType::Weekend => WEEKEND,
                });
                Rectangle::new([(x - 0.3, 0.0), (x + 0.3, row.mean_count)], color.filled())
            }))
            .map_err(plot_err)?;

        Ok(())
    }

    /// Upper y bound for bars starting at zero.
    fn bar_top(values: impl Iterator<Item = f64>) -> f64 {
        let max = values.filter(|v| v.is_finite()).fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    /// Data range widened by 5% on both sides.
    fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min.is_infinite() {
            return 0.0..1.0;
        }
        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        (min - pad)..(max + pad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = StaticChartRenderer::padded_range([0.0, 100.0].into_iter());
        assert_eq!(range, -5.0..105.0);
    }

    #[test]
    fn test_padded_range_single_value() {
        let range = StaticChartRenderer::padded_range([7.0].into_iter());
        assert_eq!(range, 6.0..8.0);
    }

    #[test]
    fn test_padded_range_ignores_nan() {
        let range = StaticChartRenderer::padded_range([f64::NAN].into_iter());
        assert_eq!(range, 0.0..1.0);
    }

    #[test]
    fn test_bar_top_leaves_headroom() {
        let top = StaticChartRenderer::bar_top([50.0, 100.0].into_iter());
        assert!((top - 110.0).abs() < 1e-9);
        assert_eq!(StaticChartRenderer::bar_top(std::iter::empty()), 1.0);
    }

    #[test]
    fn test_empty_data_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.png");
        let result = StaticChartRenderer::render_to_file(
            View::HourlyAverage,
            &ViewData::Hourly(Vec::new()),
            &path,
            (400, 300),
        );
        assert!(matches!(result, Err(RenderError::Empty(View::HourlyAverage))));
        assert!(!path.exists());
    }
}
