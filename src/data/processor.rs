//! Data Processor Module
//! Derives the aggregate tables behind each dashboard view.

use crate::data::loader::{BikeData, DATE_COLUMN};
use crate::stats::{GroupStats, StatsCalculator};
use polars::prelude::*;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Factor that de-normalizes the dataset's `temp` column into degrees Celsius.
pub const CELSIUS_SCALE: f64 = 41.0;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Table '{table}' has no '{column}' column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

/// Mean rentals for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyAverage {
    pub hour: i64,
    pub mean_count: f64,
}

/// One day's temperature in Celsius paired with its rental count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperaturePoint {
    pub temp_celsius: f64,
    pub count: f64,
}

/// Meteorological season as coded in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Winter = 1,
    Spring = 2,
    Summer = 3,
    Fall = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Winter),
            2 => Some(Season::Spring),
            3 => Some(Season::Summer),
            4 => Some(Season::Fall),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

/// Hourly rental counts split by the season of their calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeasonalBreakdown {
    /// Seasons in code order; seasons without any hourly rows are left out.
    pub seasons: Vec<SeasonGroup>,
    /// Hourly rows whose date had no daily record or an unknown season code.
    pub unmatched: usize,
    /// Hourly rows with an empty `cnt`.
    pub missing_counts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonGroup {
    pub season: Season,
    #[serde(skip)]
    pub counts: Vec<f64>,
    pub stats: GroupStats,
}

impl SeasonalBreakdown {
    /// Every hourly row lands in exactly one season, `unmatched` or `missing_counts`.
    pub fn total_rows(&self) -> usize {
        self.seasons.iter().map(|g| g.counts.len()).sum::<usize>()
            + self.unmatched
            + self.missing_counts
    }

    pub fn get(&self, season: Season) -> Option<&SeasonGroup> {
        self.seasons.iter().find(|g| g.season == season)
    }
}

/// Whether a calendar day falls on the weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// Axis label used on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekday => "Hari Kerja",
            DayType::Weekend => "Akhir Pekan",
        }
    }
}

/// Mean daily rentals for weekdays or weekends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTypeAverage {
    pub day_type: DayType,
    pub mean_count: f64,
    pub days: u64,
}

fn require(
    df: &DataFrame,
    table: &'static str,
    column: &'static str,
) -> Result<(), TransformError> {
    if df.column(column).is_err() {
        return Err(TransformError::MissingColumn { table, column });
    }
    Ok(())
}

/// Handles the group-by, join and derived-column transforms.
pub struct DataProcessor;

impl DataProcessor {
    /// Mean `cnt` per `hr`, ascending by hour.
    pub fn hourly_average(data: &BikeData) -> Result<Vec<HourlyAverage>, TransformError> {
        require(&data.hour, "hour", "hr")?;
        require(&data.hour, "hour", "cnt")?;

        let grouped = data
            .hour
            .clone()
            .lazy()
            .group_by([col("hr")])
            .agg([col("cnt").cast(DataType::Float64).mean().alias("mean_cnt")])
            .sort(["hr"], Default::default())
            .collect()?;

        let hours = grouped.column("hr")?.cast(&DataType::Int64)?;
        let means = grouped.column("mean_cnt")?.cast(&DataType::Float64)?;

        let rows = hours
            .i64()?
            .into_iter()
            .zip(means.f64()?.into_iter())
            .filter_map(|(hour, mean)| {
                Some(HourlyAverage {
                    hour: hour?,
                    mean_count: mean?,
                })
            })
            .collect();

        Ok(rows)
    }

    /// `temp × 41` paired row-wise with `cnt`, one point per day.
    pub fn temperature_effect(data: &BikeData) -> Result<Vec<TemperaturePoint>, TransformError> {
        require(&data.day, "day", "temp")?;
        require(&data.day, "day", "cnt")?;

        let derived = data
            .day
            .clone()
            .lazy()
            .select([
                (col("temp").cast(DataType::Float64) * lit(CELSIUS_SCALE)).alias("temp_celsius"),
                col("cnt").cast(DataType::Float64),
            ])
            .collect()?;

        let temps = derived.column("temp_celsius")?.f64()?;
        let counts = derived.column("cnt")?.f64()?;

        let points = temps
            .into_iter()
            .zip(counts.into_iter())
            .filter_map(|(temp, count)| {
                Some(TemperaturePoint {
                    temp_celsius: temp?,
                    count: count?,
                })
            })
            .collect();

        Ok(points)
    }

    /// Left join of hourly rows with the daily season, grouped by season.
    pub fn seasonal(data: &BikeData) -> Result<SeasonalBreakdown, TransformError> {
        require(&data.hour, "hour", "cnt")?;
        require(&data.day, "day", "season")?;

        // `hour` carries its own `season` column; renaming the daily one keeps
        // the joined column unambiguous.
        let day_seasons = data
            .day
            .clone()
            .lazy()
            .select([col(DATE_COLUMN), col("season").alias("day_season")]);

        let merged = data
            .hour
            .clone()
            .lazy()
            .select([col(DATE_COLUMN), col("cnt")])
            .join(
                day_seasons,
                [col(DATE_COLUMN)],
                [col(DATE_COLUMN)],
                JoinArgs::new(JoinType::Left),
            )
            .collect()?;

        let seasons = merged.column("day_season")?.cast(&DataType::Int64)?;
        let counts = merged.column("cnt")?.cast(&DataType::Float64)?;

        let mut by_season: Vec<(Season, Vec<f64>)> =
            Season::ALL.iter().map(|&s| (s, Vec::new())).collect();
        let mut unmatched = 0;
        let mut missing_counts = 0;

        for (code, count) in seasons.i64()?.into_iter().zip(counts.f64()?.into_iter()) {
            let Some(count) = count else {
                missing_counts += 1;
                continue;
            };
            match code.and_then(Season::from_code) {
                Some(season) => by_season[season as usize - 1].1.push(count),
                None => unmatched += 1,
            }
        }

        by_season.retain(|(_, counts)| !counts.is_empty());
        let stats = StatsCalculator::compute_all_parallel(&by_season);

        let seasons = by_season
            .into_iter()
            .zip(stats)
            .map(|((season, counts), (_, stats))| SeasonGroup {
                season,
                counts,
                stats,
            })
            .collect();

        if missing_counts > 0 {
            warn!(rows = missing_counts, "Hourly rows without a count left out of seasons");
        }

        Ok(SeasonalBreakdown {
            seasons,
            unmatched,
            missing_counts,
        })
    }

    /// Mean daily `cnt` for weekdays and weekends (Saturday or Sunday).
    pub fn weekday_weekend(data: &BikeData) -> Result<Vec<DayTypeAverage>, TransformError> {
        require(&data.day, "day", "cnt")?;

        // ISO weekday: Monday = 1 ... Sunday = 7
        let grouped = data
            .day
            .clone()
            .lazy()
            .with_column(col(DATE_COLUMN).dt().weekday().gt_eq(lit(6)).alias("is_weekend"))
            .group_by([col("is_weekend")])
            .agg([
                col("cnt").cast(DataType::Float64).mean().alias("mean_cnt"),
                col(DATE_COLUMN).count().alias("days"),
            ])
            .sort(["is_weekend"], Default::default())
            .collect()?;

        let flags = grouped.column("is_weekend")?;
        let means = grouped.column("mean_cnt")?.cast(&DataType::Float64)?;
        let days = grouped.column("days")?.cast(&DataType::UInt64)?;

        let rows = flags
            .bool()?
            .into_iter()
            .zip(means.f64()?.into_iter())
            .zip(days.u64()?.into_iter())
            .filter_map(|((is_weekend, mean), days)| {
                let day_type = if is_weekend? {
                    DayType::Weekend
                } else {
                    DayType::Weekday
                };
                Some(DayTypeAverage {
                    day_type,
                    mean_count: mean?,
                    days: days.unwrap_or(0),
                })
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour_frame(dates: &[&str], hours: &[i64], counts: &[i64]) -> DataFrame {
        DataFrame::new(vec![
            Column::new("dteday".into(), dates),
            Column::new("hr".into(), hours),
            Column::new("cnt".into(), counts),
            Column::new("season".into(), vec![9i64; dates.len()]),
        ])
        .unwrap()
    }

    fn day_frame(dates: &[&str], temps: &[f64], counts: &[i64], seasons: &[i64]) -> DataFrame {
        DataFrame::new(vec![
            Column::new("dteday".into(), dates),
            Column::new("temp".into(), temps),
            Column::new("cnt".into(), counts),
            Column::new("season".into(), seasons),
        ])
        .unwrap()
    }

    fn sample() -> BikeData {
        let hour = hour_frame(
            &["2011-01-01", "2011-01-01", "2011-01-03", "2011-07-04"],
            &[8, 8, 17, 17],
            &[50, 150, 300, 7],
        );
        let day = day_frame(
            &["2011-01-01", "2011-01-03"],
            &[0.5, 0.25],
            &[100, 200],
            &[1, 1],
        );
        BikeData::from_frames(hour, day).unwrap()
    }

    #[test]
    fn test_hourly_average_groups_and_sorts() {
        let hour = hour_frame(
            &["2011-01-01", "2011-01-01", "2011-01-01"],
            &[17, 8, 8],
            &[300, 50, 150],
        );
        let day = day_frame(&["2011-01-01"], &[0.5], &[500], &[1]);
        let data = BikeData::from_frames(hour, day).unwrap();

        let rows = DataProcessor::hourly_average(&data).unwrap();
        assert_eq!(
            rows,
            vec![
                HourlyAverage {
                    hour: 8,
                    mean_count: 100.0,
                },
                HourlyAverage {
                    hour: 17,
                    mean_count: 300.0,
                },
            ]
        );
    }

    #[test]
    fn test_temperature_is_exact_multiple() {
        let rows = DataProcessor::temperature_effect(&sample()).unwrap();
        assert_eq!(rows[0].temp_celsius, 20.5);
        assert_eq!(rows[1].temp_celsius, 0.25 * CELSIUS_SCALE);
        assert_eq!(rows[1].count, 200.0);
    }

    #[test]
    fn test_seasonal_uses_daily_season_and_counts_unmatched() {
        let breakdown = DataProcessor::seasonal(&sample()).unwrap();

        // hour's own season column (9) never leaks into the output
        assert_eq!(breakdown.seasons.len(), 1);
        let winter = breakdown.get(Season::Winter).unwrap();
        let mut counts = winter.counts.clone();
        counts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(counts, vec![50.0, 150.0, 300.0]);

        // 2011-07-04 has no daily record
        assert_eq!(breakdown.unmatched, 1);
        assert_eq!(breakdown.total_rows(), 4);
    }

    #[test]
    fn test_unknown_season_code_is_unmatched() {
        let hour = hour_frame(&["2011-01-01"], &[0], &[5]);
        let day = day_frame(&["2011-01-01"], &[0.1], &[5], &[7]);
        let data = BikeData::from_frames(hour, day).unwrap();

        let breakdown = DataProcessor::seasonal(&data).unwrap();
        assert!(breakdown.seasons.is_empty());
        assert_eq!(breakdown.unmatched, 1);
    }

    #[test]
    fn test_null_count_is_accounted_for() {
        let hour = DataFrame::new(vec![
            Column::new("dteday".into(), &["2011-01-01", "2011-01-01"]),
            Column::new("cnt".into(), &[Some(5i64), None]),
        ])
        .unwrap();
        let day = day_frame(&["2011-01-01"], &[0.1], &[5], &[1]);
        let data = BikeData::from_frames(hour, day).unwrap();

        let breakdown = DataProcessor::seasonal(&data).unwrap();
        assert_eq!(breakdown.get(Season::Winter).unwrap().counts, vec![5.0]);
        assert_eq!(breakdown.unmatched, 0);
        assert_eq!(breakdown.missing_counts, 1);
        assert_eq!(breakdown.total_rows(), data.hour.height());
    }

    #[test]
    fn test_weekday_weekend_means() {
        // 2011-01-01 is a Saturday, 2011-01-03 a Monday
        let rows = DataProcessor::weekday_weekend(&sample()).unwrap();
        assert_eq!(
            rows,
            vec![
                DayTypeAverage {
                    day_type: DayType::Weekday,
                    mean_count: 200.0,
                    days: 1,
                },
                DayTypeAverage {
                    day_type: DayType::Weekend,
                    mean_count: 100.0,
                    days: 1,
                },
            ]
        );
    }

    #[test]
    fn test_single_category_when_only_weekdays() {
        let hour = hour_frame(&["2011-01-03"], &[0], &[1]);
        let day = day_frame(&["2011-01-03", "2011-01-04"], &[0.1, 0.2], &[10, 30], &[1, 1]);
        let data = BikeData::from_frames(hour, day).unwrap();

        let rows = DataProcessor::weekday_weekend(&data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].day_type, DayType::Weekday);
        assert_eq!(rows[0].mean_count, 20.0);
        assert_eq!(rows[0].days, 2);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let hour = DataFrame::new(vec![Column::new("dteday".into(), &["2011-01-01"])]).unwrap();
        let day = day_frame(&["2011-01-01"], &[0.1], &[5], &[1]);
        let data = BikeData::from_frames(hour, day).unwrap();

        let err = DataProcessor::hourly_average(&data).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingColumn {
                table: "hour",
                column: "hr",
            }
        ));
        // Views that only need the daily table still work
        assert!(DataProcessor::weekday_weekend(&data).is_ok());
    }

    #[test]
    fn test_season_codes_round_trip() {
        for season in Season::ALL {
            assert_eq!(Season::from_code(season.code()), Some(season));
        }
        assert_eq!(Season::from_code(0), None);
        assert_eq!(Season::from_code(5), None);
    }
}
