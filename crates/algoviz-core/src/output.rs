//! The envelope a completed run hands to the boundary.

use serde::Serialize;

use crate::trace::Trace;

/// Everything one run delivers: the full step trace and the typed result.
/// Serializes as `{"trace": [...], "result": {...}}`. Delivery is
/// all-or-nothing; a failed run produces an error instead of a partial
/// envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutput<R> {
    pub trace: Trace,
    pub result: R,
}

impl<R> RunOutput<R> {
    pub fn new(trace: Trace, result: R) -> Self {
        Self { trace, result }
    }
}
