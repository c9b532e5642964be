//! Shared foundation for the algoviz teaching engines.
//!
//! This crate holds everything the six algorithm engines have in common:
//!
//! - **Domain models**: validated graphs, bipartite graphs, distance
//!   matrices, and probability tables ([`models`])
//! - **Trace recording**: ordered, immutable step logs for stepwise
//!   playback ([`trace`])
//! - **Error taxonomy**: validation reports, algorithm preconditions,
//!   and internal invariants ([`error`])
//! - **Run envelope and summaries**: the `{trace, result}` output shape
//!   and its display digest ([`output`], [`summary`])
//!
//! No algorithm logic lives here; the engines are in `algoviz-engines`.

pub mod error;
pub mod models;
pub mod output;
pub mod summary;
pub mod trace;

pub use error::{EngineError, Precondition, Result, ValidationReport, ViolationKind, WireError};
pub use output::RunOutput;
pub use summary::{RunSummary, Summarize};
pub use trace::{StepEvent, Trace, TraceCursor, TraceRecorder};
