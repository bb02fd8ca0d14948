//! Core report and finding types shared across the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder rendered in row-level findings when the display column is
/// absent from the dataset (or null for a particular row).
pub const NAME_PLACEHOLDER: &str = "unknown";

/// Aggregate quality report: dataset-wide counts for dashboards and
/// machine consumers.
///
/// Maps are keyed by column name in sorted order so repeated runs on the
/// same dataset serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Columns with at least one missing entry, with their null counts.
    pub missing_values: BTreeMap<String, usize>,
    /// Number of rows participating in a duplicate group.
    pub duplicates: usize,
    /// Declared type label per column.
    pub data_types: BTreeMap<String, String>,
    /// Outlier count per numeric column (zero counts included).
    pub outliers: BTreeMap<String, usize>,
}

impl AggregateReport {
    /// True when no check flagged anything.
    pub fn is_clean(&self) -> bool {
        self.missing_values.is_empty()
            && self.duplicates == 0
            && self.outliers.values().all(|&count| count == 0)
    }

    /// Total number of missing entries across all columns.
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }
}

/// Bounds computed for one numeric column during outlier detection.
///
/// Ephemeral: recomputed on every analysis run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum OutlierBounds {
    /// Interquartile bounds: values outside `[lower, upper]` are outliers.
    Iqr { lower: f64, upper: f64 },
    /// Dispersion bounds: values deviating from `mean` by more than
    /// `threshold` (the configured multiple of `std`) are outliers.
    Sigma { mean: f64, std: f64, threshold: f64 },
}

impl OutlierBounds {
    /// Check whether a value falls outside the bounds.
    ///
    /// Non-finite values never qualify; comparisons against NaN are false
    /// by construction.
    pub fn is_outlier(&self, value: f64) -> bool {
        match *self {
            OutlierBounds::Iqr { lower, upper } => value < lower || value > upper,
            OutlierBounds::Sigma {
                mean, threshold, ..
            } => (value - mean).abs() > threshold,
        }
    }
}

/// Reference to one record in row-level findings: the identifier plus the
/// optional display name, both resolved once per analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    pub id: String,
    pub name: Option<String>,
}

impl RecordRef {
    /// Display name, falling back to the placeholder token.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(NAME_PLACEHOLDER)
    }
}
