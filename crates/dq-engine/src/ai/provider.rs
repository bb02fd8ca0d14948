//! Explanation provider trait for abstracting LLM interactions.
//!
//! This module defines the [`ExplanationProvider`] trait that enables
//! support for multiple AI backends without changing the engine. The
//! provider consumes the finished aggregate report; it never influences
//! the analysis itself.
//!
//! # Implementing a New Provider
//!
//! 1. Create a new file in `src/ai/` (e.g., `anthropic.rs`)
//! 2. Implement the [`ExplanationProvider`] trait for your provider struct
//! 3. Export the provider in `src/ai/mod.rs`

use crate::types::AggregateReport;
use anyhow::Result;

/// Trait for AI providers that can explain a quality report.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow usage across threads.
///
/// # Error Handling
///
/// Implementations should return meaningful errors via `anyhow::Result`.
/// Callers that must never fail use [`explain_or_warn`] to turn errors
/// into a warning string.
///
/// [`explain_or_warn`]: crate::ai::explain_or_warn
pub trait ExplanationProvider: Send + Sync {
    /// Generate a plain-English explanation for the given report.
    ///
    /// The implementation should:
    /// 1. Serialize the report into the prompt
    /// 2. Call the provider's API
    /// 3. Return the generated explanation text
    fn explain_report(&self, report: &AggregateReport) -> Result<String>;

    /// Get the provider name for logging and debugging.
    fn name(&self) -> &str;

    /// Get the model being used by this provider.
    ///
    /// Returns `None` if the provider doesn't expose model information.
    fn model(&self) -> Option<&str> {
        None
    }
}

static_assertions::assert_obj_safe!(ExplanationProvider);
