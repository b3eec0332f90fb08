//! Bike Sharing Dashboard - Rental data analysis with interactive charts
//!
//! Loads the hourly and daily bike rental tables and offers four
//! descriptive analyses: hourly averages, temperature effect, seasonal
//! distribution and weekday vs weekend.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;
pub mod stats;
pub mod views;

pub use data::{BikeData, DataLoader, DataPaths, DatasetCache};
pub use views::{View, ViewData};
