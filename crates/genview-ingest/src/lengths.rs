//! Gene length filtering and distribution summary
//!
//! The extractor returns every length; before charting, lengths above a fixed
//! threshold are dropped so a handful of huge spans do not flatten the box
//! plot. The threshold is inclusive: a length equal to it is kept.

use genview_common::manifest::DEFAULT_MAX_GENE_LENGTH;
use serde::{Deserialize, Serialize};

/// Inclusive upper bound filter on gene lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthFilter {
    pub max_length: u64,
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_GENE_LENGTH,
        }
    }
}

impl LengthFilter {
    pub fn new(max_length: u64) -> Self {
        Self { max_length }
    }

    /// Filter that keeps everything
    pub fn unbounded() -> Self {
        Self {
            max_length: u64::MAX,
        }
    }

    pub fn keeps(&self, length: u64) -> bool {
        length <= self.max_length
    }

    /// Split lengths into the charted series and a count of excluded values
    pub fn apply(&self, lengths: &[u64]) -> LengthDistribution {
        let kept: Vec<u64> = lengths.iter().copied().filter(|l| self.keeps(*l)).collect();
        let excluded = lengths.len() - kept.len();
        let summary = BoxPlotSummary::from_lengths(&kept);

        LengthDistribution {
            kept,
            excluded,
            threshold: self.max_length,
            summary,
        }
    }
}

/// Filtered lengths ready for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthDistribution {
    /// Lengths at or below the threshold, in file order
    pub kept: Vec<u64>,
    /// How many lengths were above the threshold
    pub excluded: usize,
    pub threshold: u64,
    /// None when nothing was kept
    pub summary: Option<BoxPlotSummary>,
}

/// Five-number summary plus Tukey whiskers for a box plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSummary {
    pub count: usize,
    pub min: u64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: u64,
    pub mean: f64,
    /// Smallest value not below `q1 - 1.5 * IQR`
    pub lower_whisker: u64,
    /// Largest value not above `q3 + 1.5 * IQR`
    pub upper_whisker: u64,
    /// Values outside the whiskers, in input order
    pub outliers: Vec<u64>,
}

impl BoxPlotSummary {
    pub fn from_lengths(lengths: &[u64]) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }

        let mut sorted = lengths.to_vec();
        sorted.sort_unstable();

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let inside = |v: &u64| (*v as f64) >= lower_fence && (*v as f64) <= upper_fence;

        // The median always lies inside the fences, so both searches succeed.
        let lower_whisker = sorted.iter().copied().find(inside).unwrap_or(sorted[0]);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(inside)
            .unwrap_or(sorted[sorted.len() - 1]);

        let outliers = lengths.iter().copied().filter(|v| !inside(v)).collect();
        let mean = lengths.iter().map(|&v| v as f64).sum::<f64>() / lengths.len() as f64;

        Some(Self {
            count: lengths.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            mean,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear interpolation between closest ranks on sorted, non-empty data
fn quantile(sorted: &[u64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] as f64 + (sorted[hi] as f64 - sorted[lo] as f64) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = LengthFilter::default();
        assert!(filter.keeps(100_000));
        assert!(!filter.keeps(100_001));

        let dist = filter.apply(&[300, 100_001, 251, 100_000]);
        assert_eq!(dist.kept, vec![300, 251, 100_000]);
        assert_eq!(dist.excluded, 1);
        assert_eq!(dist.threshold, 100_000);
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let dist = LengthFilter::unbounded().apply(&[u64::MAX, 1]);
        assert_eq!(dist.excluded, 0);
        assert_eq!(dist.kept.len(), 2);
    }

    #[test]
    fn test_empty_has_no_summary() {
        let dist = LengthFilter::default().apply(&[]);
        assert!(dist.summary.is_none());
        assert!(dist.kept.is_empty());
    }

    #[test]
    fn test_quartiles_interpolate() {
        let summary = BoxPlotSummary::from_lengths(&[4, 1, 3, 2]).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.min, 1);
        assert_eq!(summary.max, 4);
        assert!((summary.q1 - 1.75).abs() < 1e-9);
        assert!((summary.median - 2.5).abs() < 1e-9);
        assert!((summary.q3 - 3.25).abs() < 1e-9);
        assert!((summary.mean - 2.5).abs() < 1e-9);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_outliers_and_whiskers() {
        let lengths = [900, 1000, 1100, 1200, 1300, 50_000];
        let summary = BoxPlotSummary::from_lengths(&lengths).unwrap();

        assert_eq!(summary.outliers, vec![50_000]);
        assert_eq!(summary.lower_whisker, 900);
        assert_eq!(summary.upper_whisker, 1300);
        assert_eq!(summary.max, 50_000);
    }

    #[test]
    fn test_single_value() {
        let summary = BoxPlotSummary::from_lengths(&[42]).unwrap();
        assert_eq!(summary.q1, 42.0);
        assert_eq!(summary.q3, 42.0);
        assert_eq!(summary.lower_whisker, 42);
        assert_eq!(summary.upper_whisker, 42);
        assert_eq!(summary.iqr(), 0.0);
    }
}
