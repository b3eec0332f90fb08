//! Charts module - Interactive and static chart rendering
//!
//! Both renderers draw from the palette below and convert it into their
//! own colour type.

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

/// Library-neutral RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for egui::Color32 {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        egui::Color32::from_rgb(r, g, b)
    }
}

impl From<Rgb> for plotters::style::RGBColor {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        plotters::style::RGBColor(r, g, b)
    }
}

/// Weekday bar, #3498db
pub const WEEKDAY: Rgb = Rgb(52, 152, 219);
/// Weekend bar, #2ecc71
pub const WEEKEND: Rgb = Rgb(46, 204, 113);
pub const SCATTER: Rgb = Rgb(31, 119, 180);

/// Season colors, indexed by season code - 1
pub const SEASONS: [Rgb; 4] = [
    Rgb(52, 152, 219), // Blue
    Rgb(46, 204, 113), // Green
    Rgb(243, 156, 18), // Orange
    Rgb(231, 76, 60),  // Red
];

// Ends of the hourly "Blues_d" style gradient
const BLUE_LIGHT: Rgb = Rgb(158, 202, 225);
const BLUE_DARK: Rgb = Rgb(8, 48, 107);

/// Color of the bar at `index` out of `count` along a light-to-dark blue ramp.
pub fn gradient(index: usize, count: usize) -> Rgb {
    let t = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.5
    };
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgb(
        mix(BLUE_LIGHT.0, BLUE_DARK.0),
        mix(BLUE_LIGHT.1, BLUE_DARK.1),
        mix(BLUE_LIGHT.2, BLUE_DARK.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_runs_light_to_dark() {
        assert_eq!(gradient(0, 24), BLUE_LIGHT);
        assert_eq!(gradient(23, 24), BLUE_DARK);
    }

    #[test]
    fn test_gradient_single_bar() {
        assert_eq!(gradient(0, 1), Rgb(83, 125, 166));
    }

    #[test]
    fn test_palette_converts_to_both_backends() {
        assert_eq!(
            egui::Color32::from(WEEKDAY),
            egui::Color32::from_rgb(52, 152, 219)
        );
        assert_eq!(
            plotters::style::RGBColor::from(WEEKEND),
            plotters::style::RGBColor(46, 204, 113)
        );
    }
}
