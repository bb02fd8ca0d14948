//! Outlier detection over numeric columns.
//!
//! Each numeric column is scanned independently. The sample is formed by
//! coercing values to `f64` and dropping nulls and non-coercible entries;
//! membership is then evaluated per row against the computed bounds, so a
//! row whose value failed coercion is excluded by construction.

use crate::config::{AnalysisConfig, OutlierMethod};
use crate::error::Result;
use crate::profiler::ColumnProfiler;
use crate::types::OutlierBounds;
use crate::utils::coerce_any_value;
use polars::prelude::*;

/// Outlier findings for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOutliers {
    pub column: String,
    /// Bounds used for flagging; `None` when the column was degenerate
    /// (fewer than 2 valid values).
    pub bounds: Option<OutlierBounds>,
    /// Indices of flagged rows, in row order.
    pub flagged_rows: Vec<usize>,
}

impl ColumnOutliers {
    /// Number of flagged rows.
    pub fn count(&self) -> usize {
        self.flagged_rows.len()
    }
}

/// Detector flagging out-of-range values in numeric columns.
pub struct OutlierDetector {
    method: OutlierMethod,
    small_sample_threshold: usize,
    iqr_multiplier: f64,
    sigma_multiplier: f64,
}

impl OutlierDetector {
    /// Create a detector for the given method, taking thresholds and
    /// multipliers from the analysis configuration.
    pub fn new(method: OutlierMethod, config: &AnalysisConfig) -> Self {
        Self {
            method,
            small_sample_threshold: config.small_sample_threshold,
            iqr_multiplier: config.iqr_multiplier,
            sigma_multiplier: config.sigma_multiplier,
        }
    }

    /// Scan every numeric column of the dataset, in column order.
    pub fn detect(&self, df: &DataFrame) -> Result<Vec<ColumnOutliers>> {
        let mut results = Vec::new();
        for name in df.get_column_names() {
            let series = df.column(name.as_str())?.as_materialized_series();
            if ColumnProfiler::is_numeric_column(series)? {
                results.push(self.detect_column(series)?);
            }
        }
        Ok(results)
    }

    /// Scan a single column.
    pub fn detect_column(&self, series: &Series) -> Result<ColumnOutliers> {
        let mut coerced: Vec<Option<f64>> = Vec::with_capacity(series.len());
        for row in 0..series.len() {
            let value = series.get(row)?;
            coerced.push(coerce_any_value(&value).filter(|v| v.is_finite()));
        }

        let sample: Vec<f64> = coerced.iter().flatten().copied().collect();
        let bounds = self.compute_bounds(&sample);

        let flagged_rows = match bounds {
            Some(bounds) => coerced
                .iter()
                .enumerate()
                .filter_map(|(row, value)| {
                    value.is_some_and(|v| bounds.is_outlier(v)).then_some(row)
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(ColumnOutliers {
            column: series.name().to_string(),
            bounds,
            flagged_rows,
        })
    }

    /// Compute bounds for the analysis sample, or `None` when the sample is
    /// degenerate. Quartiles and deviations of fewer than 2 points are
    /// meaningless, so such columns report zero outliers.
    fn compute_bounds(&self, sample: &[f64]) -> Option<OutlierBounds> {
        if sample.len() < 2 {
            return None;
        }

        let use_iqr = self.method == OutlierMethod::AdaptiveIqrOrSigma
            && sample.len() < self.small_sample_threshold;

        if use_iqr {
            let mut sorted = sample.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let q1 = quantile(&sorted, 0.25);
            let q3 = quantile(&sorted, 0.75);
            let iqr = q3 - q1;
            Some(OutlierBounds::Iqr {
                lower: q1 - self.iqr_multiplier * iqr,
                upper: q3 + self.iqr_multiplier * iqr,
            })
        } else {
            let n = sample.len() as f64;
            let mean = sample.iter().sum::<f64>() / n;
            let std = sample_std(sample, mean);
            if !std.is_finite() {
                return None;
            }
            Some(OutlierBounds::Sigma {
                mean,
                std,
                threshold: self.sigma_multiplier * std,
            })
        }
    }
}

/// Linear-interpolation quantile over a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let idx = q * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Sample standard deviation (n−1 denominator).
fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adaptive() -> OutlierDetector {
        OutlierDetector::new(OutlierMethod::AdaptiveIqrOrSigma, &AnalysisConfig::default())
    }

    fn fixed() -> OutlierDetector {
        OutlierDetector::new(OutlierMethod::FixedSigma, &AnalysisConfig::default())
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 100.0];
        assert!((quantile(&sorted, 0.25) - 3.5).abs() < 1e-9);
        assert!((quantile(&sorted, 0.75) - 8.5).abs() < 1e-9);
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 100.0);
    }

    #[test]
    fn test_sample_std_basic() {
        // Values: 1..5, mean 3, variance 10/4 = 2.5
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let std = sample_std(&values, 3.0);
        assert!((std - 2.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_iqr_flags_extreme_value() {
        let series = Series::new(
            "v".into(),
            &[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 100.0],
        );
        let result = adaptive().detect_column(&series).unwrap();

        // Q1 = 3.5, Q3 = 8.5, IQR = 5 -> bounds [-4, 16]
        assert_eq!(
            result.bounds,
            Some(OutlierBounds::Iqr {
                lower: -4.0,
                upper: 16.0
            })
        );
        assert_eq!(result.flagged_rows, vec![10]);
    }

    #[test]
    fn test_sigma_flags_extreme_value() {
        let mut values = vec![10.0f64; 20];
        values.push(500.0);
        let series = Series::new("v".into(), values);

        let result = fixed().detect_column(&series).unwrap();
        assert!(matches!(result.bounds, Some(OutlierBounds::Sigma { .. })));
        assert_eq!(result.flagged_rows, vec![20]);
    }

    #[test]
    fn test_fixed_sigma_ignores_sample_size() {
        // 11 values: well under the small-sample threshold, but the fixed
        // method must still use the dispersion rule.
        let series = Series::new(
            "v".into(),
            &[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 100.0],
        );
        let result = fixed().detect_column(&series).unwrap();
        assert!(matches!(result.bounds, Some(OutlierBounds::Sigma { .. })));
    }

    #[test]
    fn test_adaptive_method_selection_boundary() {
        // 49 valid values: distribution-bound method.
        let mut values = vec![10.0f64; 48];
        values.push(1000.0);
        let series = Series::new("v".into(), values);
        let result = adaptive().detect_column(&series).unwrap();
        assert!(matches!(result.bounds, Some(OutlierBounds::Iqr { .. })));
        assert_eq!(result.count(), 1);

        // 50 valid values: dispersion-based method.
        let mut values = vec![10.0f64; 49];
        values.push(1000.0);
        let series = Series::new("v".into(), values);
        let result = adaptive().detect_column(&series).unwrap();
        assert!(matches!(result.bounds, Some(OutlierBounds::Sigma { .. })));
        assert_eq!(result.count(), 1);
    }

    #[test]
    fn test_degenerate_column_has_no_bounds() {
        let single = Series::new("v".into(), &[42.0f64]);
        let result = adaptive().detect_column(&single).unwrap();
        assert_eq!(result.bounds, None);
        assert_eq!(result.count(), 0);

        let nulls = Series::new("v".into(), &[None::<f64>, None, Some(7.0)]);
        let result = adaptive().detect_column(&nulls).unwrap();
        assert_eq!(result.bounds, None);
        assert_eq!(result.count(), 0);
    }

    #[test]
    fn test_identical_values_flag_nothing() {
        let series = Series::new("v".into(), &[5.0f64, 5.0, 5.0, 5.0, 5.0]);
        let result = adaptive().detect_column(&series).unwrap();
        assert_eq!(result.count(), 0);
    }

    #[test]
    fn test_non_coercible_values_dropped_from_sample() {
        let series = Series::new("v".into(), &["10", "9", "11", "abc", "200"]);
        let result = adaptive().detect_column(&series).unwrap();

        // Sample is [10, 9, 11, 200]; "abc" can never be flagged.
        assert_eq!(result.flagged_rows, vec![4]);
    }

    #[test]
    fn test_detect_skips_non_numeric_columns() {
        let df = df![
            "id" => [1, 2, 3],
            "label" => ["a", "b", "c"],
            "mixed" => ["1", "x", "3"],
        ]
        .unwrap();

        let results = adaptive().detect(&df).unwrap();
        let columns: Vec<&str> = results.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(columns, vec!["id"]);
    }

    #[test]
    fn test_nulls_excluded_from_flagging() {
        let series = Series::new(
            "v".into(),
            &[
                Some(10.0f64),
                Some(11.0),
                Some(10.0),
                Some(11.0),
                None,
                Some(100.0),
            ],
        );
        let result = adaptive().detect_column(&series).unwrap();
        assert_eq!(result.flagged_rows, vec![5]);
    }
}
