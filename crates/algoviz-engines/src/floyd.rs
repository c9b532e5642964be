//! Floyd–Warshall all-pairs shortest paths with step recording.
//!
//! The distance matrix starts from direct edges (self-distance zero,
//! absent edges unreachable) and every intermediate node k is folded in.
//! Each strictly improving update records a `cell-updated` step carrying
//! k, so playback can highlight the triangle that caused the change.
//! Negative edge weights are accepted; a negative cycle fails the run.

use serde::Serialize;

use algoviz_core::error::{Precondition, Result};
use algoviz_core::models::{Graph, GraphSpec, WeightPolicy};
use algoviz_core::{RunOutput, RunSummary, StepEvent, Summarize, TraceRecorder};

/// All-pairs distances plus the next-hop matrix for path reconstruction.
/// `distances[i][j]` is `None` when j is unreachable from i; `next[i][j]`
/// is the index (into `nodes`) of the hop after i on a shortest i-to-j
/// path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloydResult {
    pub nodes: Vec<String>,
    pub distances: Vec<Vec<Option<f64>>>,
    pub next: Vec<Vec<Option<usize>>>,
}

impl FloydResult {
    /// Rebuild the node sequence of a shortest path from the next-hop
    /// matrix. `None` when either label is unknown or no path exists.
    pub fn reconstruct_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let start = self.nodes.iter().position(|n| n == from)?;
        let goal = self.nodes.iter().position(|n| n == to)?;
        self.next[start][goal]?;

        let mut path = vec![self.nodes[start].clone()];
        let mut current = start;
        while current != goal {
            current = self.next[current][goal]?;
            path.push(self.nodes[current].clone());
        }
        Some(path)
    }
}

impl Summarize for FloydResult {
    fn summarize(&self) -> RunSummary {
        let n = self.nodes.len();
        let reachable = self
            .distances
            .iter()
            .flatten()
            .filter(|d| d.is_some())
            .count();
        RunSummary {
            headline: format!("all-pairs distances for {n} nodes"),
            details: vec![format!("{reachable} of {} pairs reachable", n * n)],
        }
    }
}

/// Run Floyd–Warshall over a graph that may carry negative weights but no
/// negative cycle. Fails with [`Precondition::NegativeCycle`] (and no
/// partial matrix) when the diagonal goes negative.
pub fn run(spec: &GraphSpec) -> Result<RunOutput<FloydResult>> {
    let graph = Graph::from_spec(spec, WeightPolicy::AllowNegative)?;
    let n = graph.node_count();

    tracing::debug!(
        nodes = n,
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "running floyd-warshall"
    );

    let mut dist: Vec<Vec<Option<f64>>> = vec![vec![None; n]; n];
    let mut next: Vec<Vec<Option<usize>>> = vec![vec![None; n]; n];
    for i in 0..n {
        dist[i][i] = Some(0.0);
        next[i][i] = Some(i);
    }
    for i in 0..n {
        for &(j, weight) in graph.neighbors(i) {
            // Parallel payload edges keep the minimum weight.
            if dist[i][j].map_or(true, |d| weight < d) {
                dist[i][j] = Some(weight);
                next[i][j] = Some(j);
            }
        }
    }

    let mut recorder = TraceRecorder::new();
    for k in 0..n {
        for i in 0..n {
            let Some(through) = dist[i][k] else { continue };
            for j in 0..n {
                let Some(onward) = dist[k][j] else { continue };
                let candidate = through + onward;
                if dist[i][j].map_or(true, |d| candidate < d) {
                    dist[i][j] = Some(candidate);
                    next[i][j] = next[i][k];
                    recorder.record(StepEvent::CellUpdated {
                        from: graph.label(i).to_string(),
                        to: graph.label(j).to_string(),
                        via: graph.label(k).to_string(),
                        distance: candidate,
                    });
                }
            }
        }
    }

    for i in 0..n {
        if dist[i][i].is_some_and(|d| d < 0.0) {
            return Err(Precondition::NegativeCycle.into());
        }
    }

    tracing::debug!(steps = recorder.len(), "floyd-warshall complete");

    Ok(RunOutput::new(
        recorder.into_trace(),
        FloydResult {
            nodes: graph.labels().to_vec(),
            distances: dist,
            next,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphSpec {
        GraphSpec::new(
            &["A", "B", "C"],
            &[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)],
            false,
        )
    }

    #[test]
    fn test_triangle_matrix() {
        let output = run(&triangle()).unwrap();
        let d = &output.result.distances;
        assert_eq!(d[0][0], Some(0.0));
        assert_eq!(d[0][1], Some(1.0));
        assert_eq!(d[0][2], Some(3.0));
        assert_eq!(d[2][0], Some(3.0));
    }

    #[test]
    fn test_path_reconstruction() {
        let output = run(&triangle()).unwrap();
        assert_eq!(
            output.result.reconstruct_path("A", "C"),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
        assert_eq!(
            output.result.reconstruct_path("B", "B"),
            Some(vec!["B".to_string()])
        );
    }

    #[test]
    fn test_unreachable_pair() {
        let spec = GraphSpec::new(&["A", "B", "C"], &[("A", "B", 1.0)], true);
        let output = run(&spec).unwrap();
        assert_eq!(output.result.distances[0][2], None);
        assert_eq!(output.result.reconstruct_path("A", "C"), None);
    }

    #[test]
    fn test_negative_edge_without_cycle() {
        let spec = GraphSpec::new(
            &["A", "B", "C"],
            &[("A", "B", 4.0), ("A", "C", 5.0), ("C", "B", -3.0)],
            true,
        );
        let output = run(&spec).unwrap();
        // A -> C -> B beats the direct edge.
        assert_eq!(output.result.distances[0][1], Some(2.0));
    }

    #[test]
    fn test_negative_cycle_fails() {
        let spec = GraphSpec::new(
            &["A", "B"],
            &[("A", "B", 1.0), ("B", "A", -2.0)],
            true,
        );
        let err = run(&spec).unwrap_err();
        assert!(matches!(
            err,
            algoviz_core::EngineError::Precondition(Precondition::NegativeCycle)
        ));
    }

    #[test]
    fn test_cell_updates_carry_intermediate() {
        let output = run(&triangle()).unwrap();
        let via_b = output
            .trace
            .events()
            .iter()
            .any(|e| matches!(e, StepEvent::CellUpdated { via, .. } if via == "B"));
        assert!(via_b);
    }
}
