//! Error taxonomy for engine runs.
//!
//! Three tiers, matching how a failing run is handled downstream:
//!
//! - [`ValidationReport`]: malformed or inconsistent input. Recoverable;
//!   the user corrects the payload and resubmits. Every violation found is
//!   collected, not just the first, so an input form can highlight all
//!   problems at once.
//! - [`Precondition`]: well-formed input that violates a requirement of
//!   the selected algorithm (disconnected graph, negative cycle, ...).
//! - `Internal`: states the algorithms themselves guarantee unreachable.
//!   Surfaced as a defect, not user-recoverable.
//!
//! A failing run returns an [`EngineError`] and nothing else: no partial
//! trace, no partial result.

use serde::Serialize;
use thiserror::Error;

/// Kind of a single validation violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A node label appears more than once.
    DuplicateNode,
    /// An edge endpoint references a node that does not exist.
    DanglingEdge,
    /// An edge weight is negative where the algorithm requires it non-negative.
    NegativeWeight,
    /// Anything else structurally wrong with the payload.
    Malformed,
}

/// One violation found while validating an input payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation. Validation keeps going after this.
    pub fn push(&mut self, kind: ViolationKind, message: impl Into<String>) {
        self.violations.push(Violation::new(kind, message));
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// `Ok(())` when nothing was collected, the full report otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Well-formed input that still violates an algorithm precondition.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "precondition", rename_all = "kebab-case")]
pub enum Precondition {
    /// A spanning tree requires every node to be reachable.
    #[error("graph is disconnected; no spanning tree exists")]
    DisconnectedGraph,
    /// All-pairs distances are undefined in the presence of a negative cycle.
    #[error("graph contains a negative cycle")]
    NegativeCycle,
    /// Exact tour search is exponential; inputs above the cap are refused
    /// rather than silently approximated.
    #[error("instance has {cities} cities; exact search is capped at {max}")]
    InstanceTooLarge { cities: usize, max: usize },
    /// The classification input names a feature absent from training.
    #[error("feature `{feature}` was never seen during training")]
    UnknownFeature { feature: String },
}

/// Errors surfaced by engine runs.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Validation(ValidationReport),

    #[error("precondition violated: {0}")]
    Precondition(#[from] Precondition),

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

impl EngineError {
    /// Shorthand for a validation failure with a single violation.
    pub fn validation(kind: ViolationKind, message: impl Into<String>) -> Self {
        let mut report = ValidationReport::new();
        report.push(kind, message);
        EngineError::Validation(report)
    }

    /// Stable machine-readable tag for the wire contract.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "validation",
            EngineError::Precondition(_) => "precondition",
            EngineError::Internal(_) => "internal",
        }
    }

    /// Structured `{kind, message, details?}` body. The boundary never
    /// renders a bare string.
    pub fn to_wire(&self) -> WireError {
        let details = match self {
            EngineError::Validation(report) => serde_json::to_value(report).ok(),
            EngineError::Precondition(pre) => serde_json::to_value(pre).ok(),
            EngineError::Internal(_) => None,
        };
        WireError {
            kind: self.kind().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

/// Wire-shaped error body.
#[derive(Debug, Clone, Serialize)]
pub struct WireError {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_collects_everything() {
        let mut report = ValidationReport::new();
        report.push(ViolationKind::DuplicateNode, "node `A` appears twice");
        report.push(ViolationKind::DanglingEdge, "edge references `Z`");
        assert_eq!(report.len(), 2);

        let err = report.into_result().unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("appears twice"));
        assert!(err.to_string().contains("references `Z`"));
    }

    #[test]
    fn test_empty_report_is_ok() {
        assert!(ValidationReport::new().into_result().is_ok());
    }

    #[test]
    fn test_wire_shape() {
        let err = EngineError::Precondition(Precondition::InstanceTooLarge {
            cities: 20,
            max: 12,
        });
        let wire = err.to_wire();
        assert_eq!(wire.kind, "precondition");

        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["details"]["precondition"], "instance-too-large");
        assert_eq!(json["details"]["cities"], 20);
    }

    #[test]
    fn test_internal_has_no_details() {
        let wire = EngineError::Internal("frontier drained early".into()).to_wire();
        assert!(wire.details.is_none());
        assert_eq!(wire.kind, "internal");
    }
}
