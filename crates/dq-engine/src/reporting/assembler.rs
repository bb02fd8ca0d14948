use crate::config::{AnalysisConfig, OutlierMethod};
use crate::error::{QualityError, Result};
use crate::profiler::ColumnProfiler;
use crate::quality::{DuplicateDetector, OutlierDetector};
use crate::types::{AggregateReport, RecordRef};
use crate::utils::any_value_to_string;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Assembles scanner findings into the requested report shape.
pub struct ReportAssembler;

impl ReportAssembler {
    /// Build the aggregate report.
    ///
    /// Uses the fixed dispersion rule for outliers regardless of sample
    /// size; the adaptive selection is a row-level-only refinement.
    pub fn aggregate(df: &DataFrame, config: &AnalysisConfig) -> Result<AggregateReport> {
        let missing_values = ColumnProfiler::missing_counts(df);
        let data_types = ColumnProfiler::data_types(df)?;
        let duplicates =
            DuplicateDetector::detect(df, config.duplicate_columns.as_deref())?.participating_rows;

        let detector = OutlierDetector::new(OutlierMethod::FixedSigma, config);
        let outliers = detector
            .detect(df)?
            .into_iter()
            .map(|result| {
                let count = result.flagged_rows.len();
                (result.column, count)
            })
            .collect();

        let report = AggregateReport {
            missing_values,
            duplicates,
            data_types,
            outliers,
        };

        debug!(
            rows = df.height(),
            columns = df.width(),
            duplicates = report.duplicates,
            missing = report.total_missing(),
            "aggregate report assembled"
        );

        Ok(report)
    }

    /// Build the row-level narrative report.
    ///
    /// Fails with a configuration error when the identifier column is
    /// absent; no partial report is produced. Sections appear in fixed
    /// order: missing values, duplicates, outliers.
    pub fn row_level(df: &DataFrame, config: &AnalysisConfig) -> Result<String> {
        let id_series = df
            .column(&config.id_column)
            .map_err(|_| QualityError::ColumnNotFound(config.id_column.clone()))?
            .as_materialized_series()
            .clone();

        // The display column is optional; resolve it once, not per row.
        let name_series = df
            .column(&config.name_column)
            .ok()
            .map(|col| col.as_materialized_series().clone());

        let mut lines: Vec<String> = Vec::new();

        lines.push("Missing Values:".to_string());
        let section_start = lines.len();
        for col_name in df.get_column_names() {
            let series = df.column(col_name.as_str())?.as_materialized_series();
            for row in ColumnProfiler::null_rows(series) {
                let record = record_at(&id_series, name_series.as_ref(), row)?;
                lines.push(format!(
                    "- '{}' missing for id: {} ({})",
                    col_name,
                    record.id,
                    record.display_name()
                ));
            }
        }
        if lines.len() == section_start {
            lines.push("- No missing values detected".to_string());
        }

        lines.push(String::new());
        lines.push("Duplicates:".to_string());
        let findings = DuplicateDetector::detect(df, config.duplicate_columns.as_deref())?;
        // One line per distinct duplicated identifier, not per occurrence.
        let mut seen_ids = HashSet::new();
        let mut any_duplicates = false;
        for &row in &findings.row_indices {
            let id = any_value_to_string(&id_series.get(row)?);
            if seen_ids.insert(id.clone()) {
                lines.push(format!("- Duplicate record found for id: {}", id));
                any_duplicates = true;
            }
        }
        if !any_duplicates {
            lines.push("- No duplicate records found".to_string());
        }

        lines.push(String::new());
        lines.push("Outliers:".to_string());
        let detector = OutlierDetector::new(OutlierMethod::AdaptiveIqrOrSigma, config);
        for result in detector.detect(df)? {
            if result.flagged_rows.is_empty() {
                lines.push(format!("- No outliers detected in '{}'", result.column));
                continue;
            }
            let series = df.column(&result.column)?.as_materialized_series();
            for &row in &result.flagged_rows {
                let record = record_at(&id_series, name_series.as_ref(), row)?;
                let value = any_value_to_string(&series.get(row)?);
                lines.push(format!(
                    "- Outlier detected in '{}' for id: {} ({}) -> {}",
                    result.column,
                    record.id,
                    record.display_name(),
                    value
                ));
            }
        }

        debug!(rows = df.height(), lines = lines.len(), "row-level report assembled");

        Ok(lines.join("\n"))
    }
}

/// Resolve the identifier and optional display name for one row.
fn record_at(
    id_series: &Series,
    name_series: Option<&Series>,
    row: usize,
) -> Result<RecordRef> {
    let id = any_value_to_string(&id_series.get(row)?);
    let name = match name_series {
        Some(series) => {
            let value = series.get(row)?;
            if matches!(value, AnyValue::Null) {
                None
            } else {
                Some(any_value_to_string(&value))
            }
        }
        None => None,
    };
    Ok(RecordRef { id, name })
}
