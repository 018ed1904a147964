//! Summary statistics with explicit zero defaults

use serde::{Deserialize, Serialize};

/// Average, minimum and maximum of a set of values
///
/// An empty set summarizes to all zeros so callers never see NaN or
/// infinities in a report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Arithmetic mean
    pub avg: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl SummaryStats {
    /// Summarize a sequence of values in a single pass
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut avg = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            // Running mean; both terms are bounded by the inputs, so finite
            // values never overflow
            let n = count as f64;
            avg += value / n - avg / n;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            avg,
            min,
            max,
        }
    }
}

impl FromIterator<f64> for SummaryStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_all_zero() {
        let stats = SummaryStats::from_values(Vec::new());
        assert_eq!(stats, SummaryStats { avg: 0.0, min: 0.0, max: 0.0 });
    }

    #[test]
    fn single_pass_summary() {
        let stats: SummaryStats = [80.0, 0.0, 40.0].into_iter().collect();
        assert_eq!(stats.avg, 40.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 80.0);
    }

    #[test]
    fn extreme_values_stay_finite() {
        let stats = SummaryStats::from_values([1e308, 1e308]);
        assert!(stats.avg.is_finite());
        assert_eq!(stats.avg, 1e308);
        assert_eq!(stats.max, 1e308);

        let stats = SummaryStats::from_values([f64::MAX, -f64::MAX]);
        assert_eq!(stats.avg, 0.0);
    }
}
