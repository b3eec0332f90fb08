//! Views module - The four dashboard analyses
//!
//! Each [`View`] variant owns its transform, chart kind, chart labels and
//! commentary, so every selectable label maps to a complete visualization.

pub mod narrative;

use crate::data::{
    BikeData, DataProcessor, DayTypeAverage, HourlyAverage, SeasonalBreakdown, TemperaturePoint,
    TransformError,
};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Chart shape used to display a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Bar,
    Scatter,
    Box,
}

/// Title and axis labels of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

/// One of the four analyses offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    HourlyAverage,
    TemperatureEffect,
    Seasonal,
    WeekdayWeekend,
}

impl View {
    /// Selector order.
    pub const ALL: [View; 4] = [
        View::HourlyAverage,
        View::TemperatureEffect,
        View::Seasonal,
        View::WeekdayWeekend,
    ];

    /// Label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            View::HourlyAverage => "Per Jam",
            View::TemperatureEffect => "Pengaruh Suhu",
            View::Seasonal => "Musim",
            View::WeekdayWeekend => "Akhir Pekan vs Hari Kerja",
        }
    }

    /// Look up a view by its selector label. Unknown labels select nothing.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.label() == label)
    }

    /// File-name friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            View::HourlyAverage => "hourly_average",
            View::TemperatureEffect => "temperature_effect",
            View::Seasonal => "seasonal",
            View::WeekdayWeekend => "weekday_weekend",
        }
    }

    /// Section heading above the chart.
    pub fn heading(self) -> &'static str {
        match self {
            View::HourlyAverage => "Rata-Rata Penyewaan Sepeda per Jam",
            View::TemperatureEffect => "Pengaruh Suhu (Celsius) terhadap Penyewaan Sepeda",
            View::Seasonal => "Penyewaan Sepeda Berdasarkan Musim",
            View::WeekdayWeekend => "Penyewaan Sepeda: Akhir Pekan vs Hari Kerja",
        }
    }

    pub fn chart_kind(self) -> ChartKind {
        match self {
            View::HourlyAverage | View::WeekdayWeekend => ChartKind::Bar,
            View::TemperatureEffect => ChartKind::Scatter,
            View::Seasonal => ChartKind::Box,
        }
    }

    pub fn labels(self) -> ChartLabels {
        match self {
            View::HourlyAverage => ChartLabels {
                title: "Rata-Rata Penyewaan Sepeda per Jam dalam Sehari",
                x_label: "Jam",
                y_label: "Rata-Rata Penyewaan",
            },
            View::TemperatureEffect => ChartLabels {
                title: "Pengaruh Suhu (Celsius) terhadap Penyewaan Sepeda",
                x_label: "Suhu (°C)",
                y_label: "Jumlah Penyewaan",
            },
            View::Seasonal => ChartLabels {
                title: "Penyewaan Sepeda Berdasarkan Musim",
                x_label: "Musim",
                y_label: "Jumlah Penyewaan",
            },
            View::WeekdayWeekend => ChartLabels {
                title: "Rata-Rata Penyewaan Sepeda: Akhir Pekan vs Hari Kerja",
                x_label: "Tipe Hari",
                y_label: "Rata-Rata Penyewaan",
            },
        }
    }

    /// Commentary shown under the chart.
    pub fn narrative(self) -> &'static str {
        match self {
            View::HourlyAverage => narrative::HOURLY,
            View::TemperatureEffect => narrative::TEMPERATURE,
            View::Seasonal => narrative::SEASONAL,
            View::WeekdayWeekend => narrative::WEEKDAY_WEEKEND,
        }
    }

    /// Run this view's transform over the loaded tables.
    pub fn compute(self, data: &BikeData) -> Result<ViewData, TransformError> {
        debug!(view = self.label(), "Computing view");
        let result = match self {
            View::HourlyAverage => ViewData::Hourly(DataProcessor::hourly_average(data)?),
            View::TemperatureEffect => {
                ViewData::Temperature(DataProcessor::temperature_effect(data)?)
            }
            View::Seasonal => ViewData::Seasonal(DataProcessor::seasonal(data)?),
            View::WeekdayWeekend => ViewData::DayType(DataProcessor::weekday_weekend(data)?),
        };
        Ok(result)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate produced by a view's transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum ViewData {
    Hourly(Vec<HourlyAverage>),
    Temperature(Vec<TemperaturePoint>),
    Seasonal(SeasonalBreakdown),
    DayType(Vec<DayTypeAverage>),
}

/// Everything needed to draw one selected view.
#[derive(Debug, Clone)]
pub struct RenderedView {
    pub view: View,
    pub data: ViewData,
}

/// Resolve a selector label and compute its view.
///
/// Returns `Ok(None)` for an unrecognized label: no chart and no commentary.
pub fn render_selection(
    label: &str,
    data: &BikeData,
) -> Result<Option<RenderedView>, TransformError> {
    let Some(view) = View::from_label(label) else {
        debug!(label, "No view for label");
        return Ok(None);
    };
    let data = view.compute(data)?;
    Ok(Some(RenderedView { view, data }))
}
