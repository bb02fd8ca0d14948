//! Configuration types for the quality-analysis engine.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic analysis setup.

use serde::{Deserialize, Serialize};

/// Method used to flag outliers in a numeric column.
///
/// Both variants are deliberate: the fixed rule gives a cheap, predictable
/// scan for aggregate consumers, while the adaptive rule switches to
/// interquartile bounds on small samples where the three-sigma assumption
/// is unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutlierMethod {
    /// Always use the dispersion-based rule (mean ± k·std).
    FixedSigma,
    /// Use interquartile bounds below the small-sample threshold,
    /// the dispersion-based rule at or above it.
    #[default]
    AdaptiveIqrOrSigma,
}

/// Configuration for a quality-analysis run.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with the fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use dq_engine::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .id_column("customer_id")
///     .duplicate_columns(vec!["email".to_string()])
///     .sigma_multiplier(2.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Column holding the record identifier used by row-level reports.
    /// Row-level mode fails with a configuration error if it is absent.
    /// Default: "id"
    pub id_column: String,

    /// Optional display column named in row-level findings. When the column
    /// is absent from the dataset a placeholder token is rendered instead.
    /// Default: "name"
    pub name_column: String,

    /// Columns compared for duplicate detection. `None` compares all columns.
    /// Default: None
    pub duplicate_columns: Option<Vec<String>>,

    /// Sample-size boundary for the adaptive outlier method: samples with
    /// fewer values use interquartile bounds, larger ones the sigma rule.
    /// Default: 50
    pub small_sample_threshold: usize,

    /// Multiplier applied to the interquartile range when deriving bounds.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Number of standard deviations beyond which a value is an outlier.
    /// Default: 3.0
    pub sigma_multiplier: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            name_column: "name".to_string(),
            duplicate_columns: None,
            small_sample_threshold: 50,
            iqr_multiplier: 1.5,
            sigma_multiplier: 3.0,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.id_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("id_column"));
        }

        if self.name_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("name_column"));
        }

        if let Some(columns) = &self.duplicate_columns {
            if columns.is_empty() {
                return Err(ConfigValidationError::EmptyDuplicateColumns);
            }
            if columns.iter().any(|c| c.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyColumnName("duplicate_columns"));
            }
        }

        if self.small_sample_threshold < 2 {
            return Err(ConfigValidationError::InvalidSampleThreshold(
                self.small_sample_threshold,
            ));
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier {
                field: "iqr_multiplier",
                value: self.iqr_multiplier,
            });
        }

        if !self.sigma_multiplier.is_finite() || self.sigma_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidMultiplier {
                field: "sigma_multiplier",
                value: self.sigma_multiplier,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(&'static str),

    #[error("duplicate_columns must name at least one column when set")]
    EmptyDuplicateColumns,

    #[error("Invalid small_sample_threshold: {0} (must be at least 2)")]
    InvalidSampleThreshold(usize),

    #[error("Invalid multiplier for '{field}': {value} (must be finite and positive)")]
    InvalidMultiplier { field: &'static str, value: f64 },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    id_column: Option<String>,
    name_column: Option<String>,
    duplicate_columns: Option<Vec<String>>,
    small_sample_threshold: Option<usize>,
    iqr_multiplier: Option<f64>,
    sigma_multiplier: Option<f64>,
}

impl AnalysisConfigBuilder {
    /// Set the identifier column used by row-level reports.
    pub fn id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = Some(column.into());
        self
    }

    /// Set the optional display column named in row-level findings.
    pub fn name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = Some(column.into());
        self
    }

    /// Restrict duplicate detection to an explicit column subset.
    ///
    /// When not set, all columns are compared.
    pub fn duplicate_columns(mut self, columns: Vec<String>) -> Self {
        self.duplicate_columns = Some(columns);
        self
    }

    /// Set the sample-size boundary for the adaptive outlier method.
    pub fn small_sample_threshold(mut self, threshold: usize) -> Self {
        self.small_sample_threshold = Some(threshold);
        self
    }

    /// Set the interquartile-range multiplier.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the standard-deviation multiplier.
    pub fn sigma_multiplier(mut self, multiplier: f64) -> Self {
        self.sigma_multiplier = Some(multiplier);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            id_column: self.id_column.unwrap_or(defaults.id_column),
            name_column: self.name_column.unwrap_or(defaults.name_column),
            duplicate_columns: self.duplicate_columns,
            small_sample_threshold: self
                .small_sample_threshold
                .unwrap_or(defaults.small_sample_threshold),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            sigma_multiplier: self.sigma_multiplier.unwrap_or(defaults.sigma_multiplier),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.id_column, "id");
        assert_eq!(config.name_column, "name");
        assert!(config.duplicate_columns.is_none());
        assert_eq!(config.small_sample_threshold, 50);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.sigma_multiplier, 3.0);
    }

    #[test]
    fn test_builder_defaults() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config.id_column, "id");
        assert_eq!(config.small_sample_threshold, 50);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .id_column("record_id")
            .name_column("label")
            .duplicate_columns(vec!["email".to_string(), "phone".to_string()])
            .small_sample_threshold(30)
            .iqr_multiplier(2.0)
            .sigma_multiplier(2.5)
            .build()
            .unwrap();

        assert_eq!(config.id_column, "record_id");
        assert_eq!(config.name_column, "label");
        assert_eq!(
            config.duplicate_columns,
            Some(vec!["email".to_string(), "phone".to_string()])
        );
        assert_eq!(config.small_sample_threshold, 30);
        assert_eq!(config.iqr_multiplier, 2.0);
        assert_eq!(config.sigma_multiplier, 2.5);
    }

    #[test]
    fn test_validation_empty_id_column() {
        let result = AnalysisConfig::builder().id_column("  ").build();

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyColumnName("id_column")
        ));
    }

    #[test]
    fn test_validation_empty_duplicate_columns() {
        let result = AnalysisConfig::builder().duplicate_columns(vec![]).build();

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyDuplicateColumns
        ));
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = AnalysisConfig::builder().small_sample_threshold(1).build();

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSampleThreshold(1)
        ));
    }

    #[test]
    fn test_validation_invalid_multiplier() {
        let result = AnalysisConfig::builder().sigma_multiplier(-1.0).build();

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMultiplier {
                field: "sigma_multiplier",
                ..
            }
        ));

        let result = AnalysisConfig::builder().iqr_multiplier(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AnalysisConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.id_column, deserialized.id_column);
        assert_eq!(
            config.small_sample_threshold,
            deserialized.small_sample_threshold
        );
        assert_eq!(config.sigma_multiplier, deserialized.sigma_multiplier);
    }

    #[test]
    fn test_outlier_method_default_is_adaptive() {
        assert_eq!(OutlierMethod::default(), OutlierMethod::AdaptiveIqrOrSigma);
    }
}
