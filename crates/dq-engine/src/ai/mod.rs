//! AI module for LLM-generated report explanations.
//!
//! This module provides a trait-based abstraction over AI backends that
//! turn a finished [`AggregateReport`] into a plain-English explanation
//! with suggested fixes. The explanation step is strictly downstream of
//! the engine: by the time it runs, the analysis has already completed,
//! and a failure here must never abort it (see [`explain_or_warn`]).
//!
//! # Feature Flag
//!
//! The concrete provider requires the `ai` feature (enabled by default).
//! The [`ExplanationProvider`] trait is always available for custom
//! implementations.
//!
//! ```toml
//! # Enable AI support (default)
//! dq-engine = { version = "0.1", features = ["ai"] }
//!
//! # Disable AI support for smaller binary
//! dq-engine = { version = "0.1", default-features = false }
//! ```
//!
//! [`AggregateReport`]: crate::types::AggregateReport

use crate::types::AggregateReport;
use tracing::warn;

// Provider trait is always available (for custom implementations)
mod provider;
pub use provider::ExplanationProvider;

// Concrete provider requires the "ai" feature
#[cfg(feature = "ai")]
mod openai;

#[cfg(feature = "ai")]
pub use openai::{OpenAiConfig, OpenAiConfigBuilder, OpenAiProvider};

/// Generate an explanation, degrading failures to a warning string.
///
/// The quality-analysis engine has already completed when this runs, so an
/// explanation failure is surfaced to the user instead of propagated.
pub fn explain_or_warn(provider: &dyn ExplanationProvider, report: &AggregateReport) -> String {
    match provider.explain_report(report) {
        Ok(text) => text,
        Err(e) => {
            warn!(provider = provider.name(), "explanation generation failed: {e}");
            format!("Warning: could not generate AI explanation: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::BTreeMap;

    struct StubProvider {
        fail: bool,
    }

    impl ExplanationProvider for StubProvider {
        fn explain_report(&self, report: &AggregateReport) -> anyhow::Result<String> {
            if self.fail {
                Err(anyhow!("connection refused"))
            } else {
                Ok(format!("{} duplicate rows found", report.duplicates))
            }
        }

        fn name(&self) -> &str {
            "Stub"
        }
    }

    fn report() -> AggregateReport {
        AggregateReport {
            missing_values: BTreeMap::new(),
            duplicates: 2,
            data_types: BTreeMap::new(),
            outliers: BTreeMap::new(),
        }
    }

    #[test]
    fn test_explain_or_warn_success() {
        let provider = StubProvider { fail: false };
        let text = explain_or_warn(&provider, &report());
        assert_eq!(text, "2 duplicate rows found");
    }

    #[test]
    fn test_explain_or_warn_failure_becomes_warning() {
        let provider = StubProvider { fail: true };
        let text = explain_or_warn(&provider, &report());
        assert!(text.starts_with("Warning: could not generate AI explanation"));
        assert!(text.contains("connection refused"));
    }
}
