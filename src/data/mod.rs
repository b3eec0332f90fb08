//! Data module - CSV loading, caching and view transforms

mod cache;
mod loader;
mod processor;

pub use cache::{DatasetCache, Snapshot};
pub use loader::{BikeData, DataLoader, DataPaths, Fingerprint, LoaderError, TablePreview};
pub use processor::{
    DataProcessor, DayType, DayTypeAverage, HourlyAverage, Season, SeasonGroup, SeasonalBreakdown,
    TemperaturePoint, TransformError, CELSIUS_SCALE,
};
