//! Display-ready digests of engine results.
//!
//! The summary layer is a thin pass-through to the excluded UI: it turns
//! a typed result into strings and carries no business logic.

use serde::Serialize;

/// Human-readable digest of one run's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// One-line outcome, e.g. `"minimum spanning tree of weight 3"`.
    pub headline: String,
    /// Supporting lines, one display row each.
    pub details: Vec<String>,
}

/// Conversion from a typed engine result to its display summary.
pub trait Summarize {
    fn summarize(&self) -> RunSummary;
}
