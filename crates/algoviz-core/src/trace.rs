//! Step events and the trace they accumulate into.
//!
//! Every engine records the visualization-relevant state changes of its
//! run into a [`TraceRecorder`] owned by that run. When the run completes
//! the recorder is sealed into an immutable [`Trace`]; the animation layer
//! then walks it with a [`TraceCursor`] at its own pace. Computation and
//! playback never share mutable state.

use serde::Serialize;

/// One visualization-relevant state change during a run.
///
/// Each variant carries enough payload (labels, numeric values) for the
/// playback layer to reconstruct the algorithm's visible state at that
/// point without re-running anything. Serialized with a kebab-case `type`
/// tag: `{"type": "edge-accepted", "from": "A", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StepEvent {
    /// A frontier edge was examined while growing the spanning tree.
    EdgeConsidered { from: String, to: String, weight: f64 },
    /// An edge was added to the spanning tree.
    EdgeAccepted { from: String, to: String, weight: f64 },
    /// A tentative shortest distance strictly improved.
    DistanceUpdated {
        node: String,
        via: String,
        distance: f64,
    },
    /// A node's shortest distance became final.
    NodeFinalized { node: String, distance: f64 },
    /// An all-pairs matrix cell improved through an intermediate node.
    CellUpdated {
        from: String,
        to: String,
        via: String,
        distance: f64,
    },
    /// One candidate class was scored during classification.
    ClassScoreComputed { class: String, log_score: f64 },
    /// An augmenting-path search started from an unmatched left node.
    MatchAttempted { left: String },
    /// A left-right pairing was adopted along the current path.
    MatchAccepted { left: String, right: String },
    /// A candidate right node could not be claimed for this left node.
    MatchRejected { left: String, right: String },
    /// An augmenting path was flipped, growing the matching.
    AugmentationApplied {
        left: String,
        right: String,
        length: usize,
    },
    /// One (visited-set, last-city) tour transition was considered.
    /// `visited` is the bitmask over city indices in payload order.
    StateEvaluated {
        visited: u32,
        last: String,
        next: String,
        cost: f64,
    },
    /// The reported tour was extended by one city.
    PathExtended { city: String, position: usize },
}

/// Append-only accumulator owned by a single run.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    events: Vec<StepEvent>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event. Ordering is significant; there is no removal.
    pub fn record(&mut self, event: StepEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Seal the recording. The trace is immutable from here on.
    pub fn into_trace(self) -> Trace {
        Trace {
            events: self.events,
        }
    }
}

/// Ordered, immutable sequence of step events from one completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    events: Vec<StepEvent>,
}

impl Trace {
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepEvent> {
        self.events.get(index)
    }

    /// Start user-paced navigation at step zero.
    pub fn cursor(&self) -> TraceCursor<'_> {
        TraceCursor {
            trace: self,
            position: 0,
        }
    }
}

/// Forward/backward/jump navigation over a materialized trace.
///
/// `position` counts applied steps: 0 means nothing applied yet,
/// `trace.len()` means the run has been fully replayed. No navigation
/// re-executes anything.
#[derive(Debug)]
pub struct TraceCursor<'a> {
    trace: &'a Trace,
    position: usize,
}

impl<'a> TraceCursor<'a> {
    /// Number of steps applied so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The most recently applied event, if any.
    pub fn current(&self) -> Option<&'a StepEvent> {
        if self.position == 0 {
            None
        } else {
            self.trace.get(self.position - 1)
        }
    }

    /// Apply the next step and return it, or `None` at the end.
    pub fn forward(&mut self) -> Option<&'a StepEvent> {
        let event = self.trace.get(self.position)?;
        self.position += 1;
        Some(event)
    }

    /// Undo the last applied step and return it, or `None` at the start.
    pub fn backward(&mut self) -> Option<&'a StepEvent> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.trace.get(self.position)
    }

    /// Jump to an absolute position, clamped to the trace length.
    pub fn jump_to(&mut self, position: usize) {
        self.position = position.min(self.trace.len());
    }
}
