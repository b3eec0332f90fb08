//! Stats module - Descriptive statistics for rental distributions

mod calculator;

pub use calculator::{GroupStats, StatsCalculator, WHISKER_IQR_FACTOR};
