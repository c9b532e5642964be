//! Dijkstra single-source shortest paths with step recording.
//!
//! Tentative distances start at infinity (source at zero) and a min-heap
//! keyed by (distance, lexicographic node rank) drives finalization. Each
//! pop records `node-finalized`; each strict relaxation records
//! `distance-updated`. Unreachable nodes report a `null` distance, not an
//! error.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use serde::Serialize;

use algoviz_core::error::{EngineError, Result, ViolationKind};
use algoviz_core::models::{Graph, GraphSpec, WeightPolicy};
use algoviz_core::{RunOutput, RunSummary, StepEvent, Summarize, TraceRecorder};

/// Shortest path to one node. `distance`/`path` are empty when the node
/// is unreachable from the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub node: String,
    pub distance: Option<f64>,
    pub predecessor: Option<String>,
    /// Full node sequence from the source, inclusive on both ends.
    pub path: Vec<String>,
}

/// Distances and reconstructed paths for every node, in payload order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DijkstraResult {
    pub source: String,
    pub paths: Vec<ShortestPath>,
}

impl Summarize for DijkstraResult {
    fn summarize(&self) -> RunSummary {
        let reachable = self.paths.iter().filter(|p| p.distance.is_some()).count();
        RunSummary {
            headline: format!(
                "shortest paths from {} ({reachable} of {} nodes reachable)",
                self.source,
                self.paths.len()
            ),
            details: self
                .paths
                .iter()
                .map(|p| match p.distance {
                    Some(d) => format!("{}: {} via {}", p.node, d, p.path.join(" -> ")),
                    None => format!("{}: unreachable", p.node),
                })
                .collect(),
        }
    }
}

/// Run Dijkstra from `source` over a non-negatively weighted graph.
/// Directed payloads are honored; undirected edges relax both ways.
pub fn run(spec: &GraphSpec, source: &str) -> Result<RunOutput<DijkstraResult>> {
    let graph = Graph::from_spec(spec, WeightPolicy::NonNegative)?;
    let source_index = graph.index_of(source).ok_or_else(|| {
        EngineError::validation(
            ViolationKind::DanglingEdge,
            format!("source node `{source}` is not in the graph"),
        )
    })?;

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        source,
        "running dijkstra"
    );

    let ranks = graph.lexicographic_ranks();
    let mut recorder = TraceRecorder::new();
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut finalized = vec![false; n];

    let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, usize, usize)>> = BinaryHeap::new();
    dist[source_index] = 0.0;
    frontier.push(Reverse((OrderedFloat(0.0), ranks[source_index], source_index)));

    while let Some(Reverse((distance, _, node))) = frontier.pop() {
        if finalized[node] {
            continue;
        }
        finalized[node] = true;
        recorder.record(StepEvent::NodeFinalized {
            node: graph.label(node).to_string(),
            distance: distance.into_inner(),
        });

        for &(neighbor, weight) in graph.neighbors(node) {
            if finalized[neighbor] {
                continue;
            }
            let candidate = dist[node] + weight;
            if candidate < dist[neighbor] {
                dist[neighbor] = candidate;
                prev[neighbor] = Some(node);
                recorder.record(StepEvent::DistanceUpdated {
                    node: graph.label(neighbor).to_string(),
                    via: graph.label(node).to_string(),
                    distance: candidate,
                });
                frontier.push(Reverse((OrderedFloat(candidate), ranks[neighbor], neighbor)));
            }
        }
    }

    let paths = (0..n)
        .map(|node| {
            let reachable = dist[node].is_finite();
            ShortestPath {
                node: graph.label(node).to_string(),
                distance: reachable.then_some(dist[node]),
                predecessor: prev[node].map(|p| graph.label(p).to_string()),
                path: if reachable {
                    reconstruct(&graph, &prev, source_index, node)
                } else {
                    Vec::new()
                },
            }
        })
        .collect();

    tracing::debug!(steps = recorder.len(), "dijkstra complete");

    Ok(RunOutput::new(
        recorder.into_trace(),
        DijkstraResult {
            source: source.to_string(),
            paths,
        },
    ))
}

/// Walk predecessors back from `node` to `source`.
fn reconstruct(graph: &Graph, prev: &[Option<usize>], source: usize, node: usize) -> Vec<String> {
    let mut path = vec![node];
    let mut current = node;
    while current != source {
        match prev[current] {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path.into_iter()
        .map(|i| graph.label(i).to_string())
        .collect()
}
