//! Duplicate-row detection by exact multi-column equality.

use crate::error::{QualityError, Result};
use crate::utils::any_value_to_string;
use polars::prelude::*;
use std::collections::HashMap;

/// Cell separator and null marker for row keys. Nulls at the same position
/// compare equal, and a null must never collide with a real string value.
const KEY_SEPARATOR: char = '\u{1f}';
const NULL_MARKER: char = '\u{1e}';

/// Result of a duplicate scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFindings {
    /// Number of rows participating in a duplicate group. A row counts if
    /// at least one other row is identical across the compared columns, so
    /// a duplicated pair contributes 2.
    pub participating_rows: usize,
    /// Indices of participating rows, in row order.
    pub row_indices: Vec<usize>,
}

impl DuplicateFindings {
    fn empty() -> Self {
        Self {
            participating_rows: 0,
            row_indices: Vec::new(),
        }
    }
}

/// Detector for full-row duplicates over a configurable column subset.
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Scan the dataset for duplicate rows.
    ///
    /// `compare_columns` restricts the equality check to an explicit subset;
    /// `None` compares all columns. A compared column absent from the
    /// dataset is a configuration error.
    pub fn detect(
        df: &DataFrame,
        compare_columns: Option<&[String]>,
    ) -> Result<DuplicateFindings> {
        let names: Vec<String> = match compare_columns {
            Some(columns) => columns.to_vec(),
            None => df
                .get_column_names()
                .into_iter()
                .map(|n| n.to_string())
                .collect(),
        };

        if df.height() == 0 || names.is_empty() {
            return Ok(DuplicateFindings::empty());
        }

        let mut series = Vec::with_capacity(names.len());
        for name in &names {
            let col = df
                .column(name)
                .map_err(|_| QualityError::ColumnNotFound(name.clone()))?;
            series.push(col.as_materialized_series().clone());
        }

        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for row in 0..df.height() {
            let mut key = String::new();
            for s in &series {
                let value = s.get(row)?;
                if matches!(value, AnyValue::Null) {
                    key.push(NULL_MARKER);
                } else {
                    key.push_str(&any_value_to_string(&value));
                }
                key.push(KEY_SEPARATOR);
            }
            groups.entry(key).or_default().push(row);
        }

        let mut flagged = vec![false; df.height()];
        for rows in groups.values() {
            if rows.len() > 1 {
                for &row in rows {
                    flagged[row] = true;
                }
            }
        }

        let row_indices: Vec<usize> = flagged
            .iter()
            .enumerate()
            .filter_map(|(row, &is_dup)| is_dup.then_some(row))
            .collect();

        Ok(DuplicateFindings {
            participating_rows: row_indices.len(),
            row_indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicates() {
        let df = df![
            "id" => [1, 2, 3],
            "score" => [10, 20, 30],
        ]
        .unwrap();

        let findings = DuplicateDetector::detect(&df, None).unwrap();
        assert_eq!(findings.participating_rows, 0);
        assert!(findings.row_indices.is_empty());
    }

    #[test]
    fn test_duplicate_pair_counts_both_rows() {
        let df = df![
            "a" => [1, 1, 2],
            "b" => ["x", "x", "y"],
        ]
        .unwrap();

        let findings = DuplicateDetector::detect(&df, None).unwrap();
        assert_eq!(findings.participating_rows, 2);
        assert_eq!(findings.row_indices, vec![0, 1]);
    }

    #[test]
    fn test_triplet_counts_all_rows() {
        let df = df!["a" => [5, 5, 5, 6]].unwrap();

        let findings = DuplicateDetector::detect(&df, None).unwrap();
        assert_eq!(findings.participating_rows, 3);
        assert_eq!(findings.row_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_nulls_at_same_position_are_equal() {
        let df = df![
            "a" => [Some(1), Some(1), Some(2)],
            "b" => [None::<&str>, None, Some("y")],
        ]
        .unwrap();

        let findings = DuplicateDetector::detect(&df, None).unwrap();
        assert_eq!(findings.participating_rows, 2);
        assert_eq!(findings.row_indices, vec![0, 1]);
    }

    #[test]
    fn test_null_does_not_match_literal_null_string() {
        let df = df!["a" => [None::<&str>, Some("null")]].unwrap();

        let findings = DuplicateDetector::detect(&df, None).unwrap();
        assert_eq!(findings.participating_rows, 0);
    }

    #[test]
    fn test_subset_comparison() {
        let df = df![
            "id" => [1, 2, 3],
            "score" => [10, 10, 1000],
        ]
        .unwrap();

        // Full-row comparison: ids differ, nothing duplicated.
        let full = DuplicateDetector::detect(&df, None).unwrap();
        assert_eq!(full.participating_rows, 0);

        // Restricted to score: first two rows form a group.
        let subset = vec!["score".to_string()];
        let findings = DuplicateDetector::detect(&df, Some(&subset)).unwrap();
        assert_eq!(findings.participating_rows, 2);
        assert_eq!(findings.row_indices, vec![0, 1]);
    }

    #[test]
    fn test_missing_compare_column_is_error() {
        let df = df!["a" => [1, 2]].unwrap();

        let subset = vec!["missing".to_string()];
        let err = DuplicateDetector::detect(&df, Some(&subset)).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_empty_dataset() {
        let df = DataFrame::empty();
        let findings = DuplicateDetector::detect(&df, None).unwrap();
        assert_eq!(findings.participating_rows, 0);
    }
}
