//! Column profiling: missingness counts and declared type labels.
//!
//! The profiler is one of the three independent scans over the dataset.
//! It never mutates its input and has no error conditions of its own; an
//! empty dataset yields empty mappings.

use crate::utils::{is_boolean_dtype, is_datetime_dtype, is_numeric_dtype, is_numeric_string};
use polars::prelude::*;
use std::collections::BTreeMap;

use crate::error::Result;

/// Profiler for per-column missingness and declared types.
pub struct ColumnProfiler;

impl ColumnProfiler {
    /// Count null entries per column, keeping only columns with at least
    /// one missing value.
    pub fn missing_counts(df: &DataFrame) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for name in df.get_column_names() {
            if let Ok(col) = df.column(name.as_str()) {
                let null_count = col.as_materialized_series().null_count();
                if null_count > 0 {
                    counts.insert(name.to_string(), null_count);
                }
            }
        }
        counts
    }

    /// Declared type label per column.
    pub fn data_types(df: &DataFrame) -> Result<BTreeMap<String, String>> {
        let mut types = BTreeMap::new();
        for name in df.get_column_names() {
            let series = df.column(name.as_str())?.as_materialized_series();
            types.insert(
                name.to_string(),
                Self::column_type_label(series)?.to_string(),
            );
        }
        Ok(types)
    }

    /// Infer the declared type label of one column.
    ///
    /// A string-typed column whose non-null values all coerce to a number
    /// is declared numeric; a column with no non-null values is `unknown`.
    pub fn column_type_label(series: &Series) -> Result<&'static str> {
        if series.null_count() == series.len() {
            return Ok("unknown");
        }

        let dtype = series.dtype();
        if is_numeric_dtype(dtype) {
            return Ok("numeric");
        }
        if is_boolean_dtype(dtype) {
            return Ok("binary");
        }
        if is_datetime_dtype(dtype) {
            return Ok("datetime");
        }

        if dtype == &DataType::String {
            let values = series.str()?;
            let mut saw_value = false;
            for value in values.into_iter().flatten() {
                saw_value = true;
                if !is_numeric_string(value.trim()) {
                    return Ok("string");
                }
            }
            if saw_value {
                return Ok("numeric");
            }
        }

        Ok("string")
    }

    /// Whether outlier detection should consider this column.
    pub fn is_numeric_column(series: &Series) -> Result<bool> {
        Ok(Self::column_type_label(series)? == "numeric")
    }

    /// Row indices holding a null in this column, in row order.
    pub fn null_rows(series: &Series) -> Vec<usize> {
        series
            .is_null()
            .into_iter()
            .enumerate()
            .filter_map(|(row, is_null)| is_null.unwrap_or(false).then_some(row))
            .collect()
    }
}
