//! CSV Data Loader Module
//! Loads the hourly and daily rental tables using Polars.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, info};

/// Date column shared by both tables.
pub const DATE_COLUMN: &str = "dteday";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} has no 'dteday' column", path.display())]
    MissingDateColumn { path: PathBuf },
    #[error("{} has {rows} row(s) with an empty 'dteday'", path.display())]
    InvalidDate { path: PathBuf, rows: usize },
}

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataPaths {
    pub hour_path: PathBuf,
    pub day_path: PathBuf,
}

impl DataPaths {
    pub fn new(hour_path: impl Into<PathBuf>, day_path: impl Into<PathBuf>) -> Self {
        Self {
            hour_path: hour_path.into(),
            day_path: day_path.into(),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new("hour.csv", "day.csv")
    }
}

/// Modification times of both input files at the moment they were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub hour_modified: SystemTime,
    pub day_modified: SystemTime,
}

impl Fingerprint {
    pub fn of(paths: &DataPaths) -> Result<Self, LoaderError> {
        Ok(Self {
            hour_modified: modified_time(&paths.hour_path)?,
            day_modified: modified_time(&paths.day_path)?,
        })
    }
}

fn modified_time(path: &Path) -> Result<SystemTime, LoaderError> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Both rental tables, immutable after load.
#[derive(Debug, Clone)]
pub struct BikeData {
    pub hour: DataFrame,
    pub day: DataFrame,
}

impl BikeData {
    /// Build from frames whose `dteday` column is still text.
    pub fn from_frames(hour: DataFrame, day: DataFrame) -> PolarsResult<Self> {
        Ok(Self {
            hour: parse_dates(hour.lazy()).collect()?,
            day: parse_dates(day.lazy()).collect()?,
        })
    }

    pub fn hour_preview(&self, rows: usize) -> TablePreview {
        TablePreview::from_dataframe(&self.hour, rows)
    }

    pub fn day_preview(&self, rows: usize) -> TablePreview {
        TablePreview::from_dataframe(&self.day, rows)
    }
}

/// First rows of a table, already formatted for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TablePreview {
    pub fn from_dataframe(df: &DataFrame, rows: usize) -> Self {
        let head = df.head(Some(rows));
        let columns = head
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = (0..head.height())
            .map(|i| {
                head.get_columns()
                    .iter()
                    .map(|column| match column.get(i) {
                        Ok(val) if !val.is_null() => val.to_string().trim_matches('"').to_string(),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }
}

/// Coerce the text date column into a calendar date.
fn parse_dates(lf: LazyFrame) -> LazyFrame {
    lf.with_column(col(DATE_COLUMN).str().to_date(StrptimeOptions {
        format: Some(DATE_FORMAT.into()),
        strict: true,
        ..Default::default()
    }))
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load both tables, reading the two files in parallel.
    pub fn load(paths: &DataPaths) -> Result<BikeData, LoaderError> {
        info!(
            hour = %paths.hour_path.display(),
            day = %paths.day_path.display(),
            "Loading rental data"
        );

        let (hour, day) = rayon::join(
            || Self::load_csv(&paths.hour_path),
            || Self::load_csv(&paths.day_path),
        );
        let data = BikeData {
            hour: hour?,
            day: day?,
        };

        info!(
            hour_rows = data.hour.height(),
            day_rows = data.day.height(),
            "Rental data loaded"
        );
        Ok(data)
    }

    /// Load one CSV file and coerce its date column.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let csv_error = |source| LoaderError::Csv {
            path: path.to_path_buf(),
            source,
        };

        // Read eagerly first so a missing date column is reported as such
        // instead of as a generic column-not-found error.
        let raw = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(csv_error)?;

        if raw.column(DATE_COLUMN).is_err() {
            return Err(LoaderError::MissingDateColumn {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), rows = raw.height(), "Parsing dates");
        let df = parse_dates(raw.lazy()).collect().map_err(csv_error)?;

        // Strict parsing rejects malformed text but passes empty cells through as null
        let rows = df.column(DATE_COLUMN).map_err(csv_error)?.null_count();
        if rows > 0 {
            return Err(LoaderError::InvalidDate {
                path: path.to_path_buf(),
                rows,
            });
        }
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("dteday".into(), &["2011-01-01", "2011-01-02"]),
            Column::new("cnt".into(), &[985i64, 801]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_frames_parses_dates() {
        let data = BikeData::from_frames(text_frame(), text_frame()).unwrap();
        assert_eq!(data.hour.column("dteday").unwrap().dtype(), &DataType::Date);
        assert_eq!(data.day.column("dteday").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_unparseable_date_is_an_error() {
        let bad = DataFrame::new(vec![Column::new("dteday".into(), &["01/02/2011"])]).unwrap();
        assert!(BikeData::from_frames(bad, text_frame()).is_err());
    }

    #[test]
    fn test_preview_limits_rows() {
        let data = BikeData::from_frames(text_frame(), text_frame()).unwrap();
        let preview = data.day_preview(1);
        assert_eq!(preview.columns, vec!["dteday", "cnt"]);
        assert_eq!(preview.rows, vec![vec!["2011-01-01".to_string(), "985".to_string()]]);
    }

    #[test]
    fn test_blank_date_is_a_load_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("day.csv");
        std::fs::write(&path, "dteday,cnt\n2011-01-01,100\n,150\n2011-01-03,200\n").unwrap();

        match DataLoader::load_csv(&path) {
            Err(LoaderError::InvalidDate { rows, .. }) => assert_eq!(rows, 1),
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let paths = DataPaths::new("/nonexistent/hour.csv", "/nonexistent/day.csv");
        assert!(matches!(
            Fingerprint::of(&paths),
            Err(LoaderError::Io { .. })
        ));
    }
}
