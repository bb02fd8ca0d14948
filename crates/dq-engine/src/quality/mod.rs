//! Quality checks over the dataset.
//!
//! This module provides the duplicate and outlier scanners. Each scanner is
//! an independent pass over the dataset; neither depends on the other's
//! output.

mod duplicates;
mod outliers;

pub use duplicates::{DuplicateDetector, DuplicateFindings};
pub use outliers::{ColumnOutliers, OutlierDetector};
