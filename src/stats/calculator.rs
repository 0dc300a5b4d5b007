//! Statistics Calculator Module
//! Descriptive statistics used by box plots, histograms and page summaries.

use statrs::statistics::Statistics;

/// Five-number summary plus mean, as drawn by a box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub mean: f64,
}

impl BoxSummary {
    /// Summarize `values`, ignoring NaN. Returns `None` when nothing is left.
    ///
    /// Whiskers reach the most extreme values within 1.5 IQR of the box.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = StatsCalculator::sorted_finite(values);
        if sorted.is_empty() {
            return None;
        }

        let q1 = StatsCalculator::percentile(&sorted, 25.0);
        let median = StatsCalculator::percentile(&sorted, 50.0);
        let q3 = StatsCalculator::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        Some(Self {
            count: sorted.len(),
            whisker_low,
            q1,
            median,
            q3,
            whisker_high,
            mean: sorted.iter().mean(),
        })
    }
}

/// One histogram bucket covering `[start, end)`; the last bucket is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Finite values in ascending order.
    pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
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

    /// Mean of the non-NaN values; NaN when there are none.
    pub fn mean(values: &[f64]) -> f64 {
        values.iter().filter(|v| !v.is_nan()).mean()
    }

    /// Split finite values into `bins` equal-width buckets.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = Statistics::min(finite.iter());
        let max = Statistics::max(finite.iter());
        let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

        let mut counts = vec![0usize; bins];
        for v in &finite {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(StatsCalculator::percentile(&sorted, 50.0), 2.5);
        assert_eq!(StatsCalculator::percentile(&sorted, 25.0), 1.75);
        assert_eq!(StatsCalculator::percentile(&sorted, 100.0), 4.0);
        assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn box_summary_clips_whiskers_at_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0, f64::NAN];
        let summary = BoxSummary::from_values(&values).unwrap();
        assert_eq!(summary.count, 6);
        assert_eq!(summary.median, 3.5);
        assert_eq!(summary.q1, 2.25);
        assert_eq!(summary.q3, 4.75);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
        assert!((summary.mean - 115.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn box_summary_of_nothing() {
        assert!(BoxSummary::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn mean_ignores_nan() {
        assert_eq!(StatsCalculator::mean(&[4.0, f64::NAN, 5.0]), 4.5);
        assert!(StatsCalculator::mean(&[]).is_nan());
    }

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let bins = StatsCalculator::histogram(&[1.0, 2.0, 3.0, 4.0, 5.0], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 1, 2]);
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[3].end, 5.0);
    }

    #[test]
    fn histogram_of_constant_values() {
        let bins = StatsCalculator::histogram(&[3.0, 3.0], 5);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }
}
