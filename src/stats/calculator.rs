//! Statistics Calculator Module
//! Descriptive statistics and boxplot geometry for rental count distributions.

use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Whisker reach as a multiple of the interquartile range.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Descriptive statistics and box geometry for one group of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Values beyond the whiskers, drawn as individual points.
    pub outliers: Vec<f64>,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
            whisker_low: f64::NAN,
            whisker_high: f64::NAN,
            outliers: Vec::new(),
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_group_stats(values: &[f64]) -> GroupStats {
        let n = values.len();
        if n == 0 {
            return GroupStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        // Whiskers end at the furthest observation still inside the fence
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        let std = if n > 1 { values.iter().std_dev() } else { 0.0 };

        GroupStats {
            count: n,
            mean: values.iter().mean(),
            std,
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[n - 1],
            whisker_low,
            whisker_high,
            outliers,
        }
    }

    /// Compute statistics for several groups in parallel, keeping input order.
    pub fn compute_all_parallel<K>(groups: &[(K, Vec<f64>)]) -> Vec<(K, GroupStats)>
    where
        K: Clone + Send + Sync,
    {
        groups
            .par_iter()
            .map(|(key, values)| (key.clone(), Self::compute_group_stats(values)))
            .collect()
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(StatsCalculator::percentile(&sorted, 25.0), 1.75);
        assert_eq!(StatsCalculator::percentile(&sorted, 50.0), 2.5);
        assert_eq!(StatsCalculator::percentile(&sorted, 75.0), 3.25);
    }

    #[test]
    fn test_outlier_outside_whiskers() {
        let values = [10.0, 12.0, 11.0, 13.0, 12.0, 100.0];
        let stats = StatsCalculator::compute_group_stats(&values);

        assert_eq!(stats.count, 6);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.whisker_high, 13.0);
        assert_eq!(stats.whisker_low, 10.0);
        assert_eq!(stats.max, 100.0);
    }

    #[test]
    fn test_single_value() {
        let stats = StatsCalculator::compute_group_stats(&[42.0]);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.std, 0.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_empty_group_is_nan() {
        let stats = StatsCalculator::compute_group_stats(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }

    #[test]
    fn test_parallel_keeps_order() {
        let groups = vec![(1u8, vec![1.0, 2.0]), (2u8, vec![5.0]), (3u8, vec![])];
        let stats = StatsCalculator::compute_all_parallel(&groups);
        let keys: Vec<u8> = stats.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(stats[0].1.mean, 1.5);
    }
}
