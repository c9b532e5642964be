//! Prim's minimum spanning tree with step recording.
//!
//! Grows the tree from a start node using a min-priority frontier of
//! edges crossing the cut between selected and unselected nodes. Every
//! frontier pop records an `edge-considered` step; the pop that actually
//! crosses the cut also records `edge-accepted`. Equal-weight candidates
//! are ordered by the lexicographic (from-label, to-label) pair, so runs
//! are deterministic and test-visible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use serde::Serialize;

use algoviz_core::error::{EngineError, Precondition, Result, ViolationKind};
use algoviz_core::models::{Graph, GraphSpec, WeightPolicy};
use algoviz_core::{RunOutput, RunSummary, StepEvent, Summarize, TraceRecorder};

/// One accepted spanning-tree edge, in acceptance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MstEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// The spanning tree and its total weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimResult {
    pub edges: Vec<MstEdge>,
    pub total_weight: f64,
}

impl Summarize for PrimResult {
    fn summarize(&self) -> RunSummary {
        RunSummary {
            headline: format!("minimum spanning tree of weight {}", self.total_weight),
            details: self
                .edges
                .iter()
                .map(|e| format!("{} - {} ({})", e.from, e.to, e.weight))
                .collect(),
        }
    }
}

/// Frontier entry ordered by (weight, from-rank, to-rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEdge {
    weight: OrderedFloat<f64>,
    from_rank: usize,
    to_rank: usize,
    from: usize,
    to: usize,
}

/// Run Prim's algorithm on an undirected, non-negatively weighted graph.
///
/// `start` defaults to the first payload node. Fails with
/// [`Precondition::DisconnectedGraph`] when not every node is reachable,
/// returning no partial tree.
pub fn run(spec: &GraphSpec, start: Option<&str>) -> Result<RunOutput<PrimResult>> {
    if spec.directed {
        return Err(EngineError::validation(
            ViolationKind::Malformed,
            "spanning trees require an undirected graph",
        ));
    }
    let graph = Graph::from_spec(spec, WeightPolicy::NonNegative)?;
    let start = resolve_start(&graph, start)?;

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        start = graph.label(start),
        "running prim"
    );

    let ranks = graph.lexicographic_ranks();
    let mut recorder = TraceRecorder::new();
    let mut selected = vec![false; graph.node_count()];
    let mut frontier: BinaryHeap<Reverse<FrontierEdge>> = BinaryHeap::new();

    let mut edges = Vec::with_capacity(graph.node_count().saturating_sub(1));
    let mut total_weight = 0.0;
    let mut selected_count = 1;
    selected[start] = true;
    push_incident(&graph, &ranks, &selected, start, &mut frontier);

    while selected_count < graph.node_count() {
        let Some(Reverse(edge)) = frontier.pop() else {
            // Frontier drained with nodes left over.
            return Err(Precondition::DisconnectedGraph.into());
        };
        recorder.record(StepEvent::EdgeConsidered {
            from: graph.label(edge.from).to_string(),
            to: graph.label(edge.to).to_string(),
            weight: edge.weight.into_inner(),
        });
        if selected[edge.to] {
            // Stale entry: the far endpoint joined the tree since the push.
            continue;
        }
        recorder.record(StepEvent::EdgeAccepted {
            from: graph.label(edge.from).to_string(),
            to: graph.label(edge.to).to_string(),
            weight: edge.weight.into_inner(),
        });
        selected[edge.to] = true;
        selected_count += 1;
        total_weight += edge.weight.into_inner();
        edges.push(MstEdge {
            from: graph.label(edge.from).to_string(),
            to: graph.label(edge.to).to_string(),
            weight: edge.weight.into_inner(),
        });
        push_incident(&graph, &ranks, &selected, edge.to, &mut frontier);
    }

    tracing::debug!(accepted = edges.len(), total_weight, "prim complete");

    Ok(RunOutput::new(
        recorder.into_trace(),
        PrimResult {
            edges,
            total_weight,
        },
    ))
}

fn resolve_start(graph: &Graph, start: Option<&str>) -> Result<usize> {
    match start {
        None => Ok(0),
        Some(label) => graph.index_of(label).ok_or_else(|| {
            EngineError::validation(
                ViolationKind::DanglingEdge,
                format!("start node `{label}` is not in the graph"),
            )
        }),
    }
}

fn push_incident(
    graph: &Graph,
    ranks: &[usize],
    selected: &[bool],
    node: usize,
    frontier: &mut BinaryHeap<Reverse<FrontierEdge>>,
) {
    for &(neighbor, weight) in graph.neighbors(node) {
        if !selected[neighbor] {
            frontier.push(Reverse(FrontierEdge {
                weight: OrderedFloat(weight),
                from_rank: ranks[node],
                to_rank: ranks[neighbor],
                from: node,
                to: neighbor,
            }));
        }
    }
}
