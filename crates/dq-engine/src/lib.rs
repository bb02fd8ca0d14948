//! Data Quality Analysis Engine
//!
//! A quality-analysis library for tabular datasets built with Rust and
//! Polars. The engine scans a dataset for missing values, duplicate rows,
//! and statistical outliers, then assembles the findings into either an
//! aggregate summary or a row-level narrative.
//!
//! # Overview
//!
//! - **Column profiling**: per-column missingness counts and declared type
//!   labels
//! - **Duplicate detection**: full-row duplicate groups by exact
//!   multi-column equality over a configurable subset
//! - **Outlier detection**: per numeric column, interquartile bounds on
//!   small samples and a dispersion (sigma) rule on large ones, selected
//!   by an explicit [`OutlierMethod`]
//! - **Report assembly**: an [`AggregateReport`] for dashboards and
//!   machine consumers, or a newline-delimited row-level narrative for
//!   human analysts
//! - **AI explanations (optional)**: a provider trait plus an OpenAI
//!   implementation that turns the finished report into plain English
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dq_engine::{AnalysisConfig, ReportAssembler};
//! use polars::prelude::*;
//!
//! let df = CsvReader::from_path("data.csv")?.finish()?;
//! let config = AnalysisConfig::builder()
//!     .id_column("customer_id")
//!     .build()?;
//!
//! // Aggregate counts (fixed three-sigma outlier rule)
//! let report = ReportAssembler::aggregate(&df, &config)?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Row-level narrative (adaptive IQR-or-sigma outlier rule)
//! let narrative = ReportAssembler::row_level(&df, &config)?;
//! println!("{narrative}");
//! ```
//!
//! The engine is single-threaded and pure: repeated runs on an unchanged
//! dataset produce byte-identical reports, and separate datasets can be
//! analyzed from separate threads without coordination.

pub mod ai;
pub mod config;
pub mod error;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, OutlierMethod};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use profiler::ColumnProfiler;
pub use quality::{ColumnOutliers, DuplicateDetector, DuplicateFindings, OutlierDetector};
pub use reporting::ReportAssembler;
pub use types::{AggregateReport, NAME_PLACEHOLDER, OutlierBounds, RecordRef};
