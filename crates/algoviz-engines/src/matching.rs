//! Maximum bipartite matching via augmenting paths, with step recording.
//!
//! For each unmatched left node (in lexicographic label order) the engine
//! runs a depth-first augmenting-path search over alternating
//! matched/unmatched edges, tracking visited right nodes to avoid
//! cycling. A successful search flips every edge along the path and grows
//! the matching by exactly one. Cardinality only; weights are ignored.

use serde::Serialize;

use algoviz_core::error::Result;
use algoviz_core::models::{BipartiteGraph, BipartiteSpec};
use algoviz_core::{RunOutput, RunSummary, StepEvent, Summarize, TraceRecorder};

/// One matched left-right pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub left: String,
    pub right: String,
}

/// The matching and its cardinality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingResult {
    /// Matched pairs sorted by left label.
    pub pairs: Vec<MatchedPair>,
    pub size: usize,
}

impl Summarize for MatchingResult {
    fn summarize(&self) -> RunSummary {
        RunSummary {
            headline: format!("maximum matching of size {}", self.size),
            details: self
                .pairs
                .iter()
                .map(|p| format!("{} - {}", p.left, p.right))
                .collect(),
        }
    }
}

struct Search<'a> {
    graph: &'a BipartiteGraph,
    /// Right-neighbor lists per left node, pre-sorted by right label.
    neighbors: Vec<Vec<usize>>,
    /// match_left[l] = right index currently paired with left l.
    match_left: Vec<Option<usize>>,
    /// match_right[r] = left index currently paired with right r.
    match_right: Vec<Option<usize>>,
    recorder: TraceRecorder,
}

impl<'a> Search<'a> {
    /// Try to match `left`, flipping edges along any augmenting path
    /// found. `visited` guards right nodes for one search; `flips` counts
    /// adopted pairings for the path-length payload.
    fn augment(&mut self, left: usize, visited: &mut [bool], flips: &mut usize) -> bool {
        for i in 0..self.neighbors[left].len() {
            let right = self.neighbors[left][i];
            if visited[right] {
                continue;
            }
            visited[right] = true;

            let free = match self.match_right[right] {
                None => true,
                Some(holder) => self.augment(holder, visited, flips),
            };
            if free {
                self.match_right[right] = Some(left);
                self.match_left[left] = Some(right);
                *flips += 1;
                self.recorder.record(StepEvent::MatchAccepted {
                    left: self.graph.left_label(left).to_string(),
                    right: self.graph.right_label(right).to_string(),
                });
                return true;
            }
            self.recorder.record(StepEvent::MatchRejected {
                left: self.graph.left_label(left).to_string(),
                right: self.graph.right_label(right).to_string(),
            });
        }
        false
    }
}

/// Run the augmenting-path search over a bipartite graph.
pub fn run(spec: &BipartiteSpec) -> Result<RunOutput<MatchingResult>> {
    let graph = BipartiteGraph::from_spec(spec)?;

    tracing::debug!(
        left = graph.left_count(),
        right = graph.right_count(),
        "running maximum matching"
    );

    let right_ranks = graph.right_lexicographic_ranks();
    let neighbors: Vec<Vec<usize>> = (0..graph.left_count())
        .map(|l| {
            let mut sorted = graph.neighbors(l).to_vec();
            sorted.sort_by_key(|&r| right_ranks[r]);
            sorted
        })
        .collect();

    let mut search = Search {
        graph: &graph,
        neighbors,
        match_left: vec![None; graph.left_count()],
        match_right: vec![None; graph.right_count()],
        recorder: TraceRecorder::new(),
    };

    for left in graph.left_lexicographic_order() {
        if search.match_left[left].is_some() {
            continue;
        }
        search.recorder.record(StepEvent::MatchAttempted {
            left: graph.left_label(left).to_string(),
        });
        let mut visited = vec![false; graph.right_count()];
        let mut flips = 0;
        if search.augment(left, &mut visited, &mut flips) {
            // An augmenting path of f adopted pairings spans 2f - 1 edges.
            let right = search.match_left[left].expect("augment set the pair");
            search.recorder.record(StepEvent::AugmentationApplied {
                left: graph.left_label(left).to_string(),
                right: graph.right_label(right).to_string(),
                length: 2 * flips - 1,
            });
        }
    }

    let mut pairs: Vec<MatchedPair> = search
        .match_left
        .iter()
        .enumerate()
        .filter_map(|(l, r)| {
            r.map(|r| MatchedPair {
                left: graph.left_label(l).to_string(),
                right: graph.right_label(r).to_string(),
            })
        })
        .collect();
    pairs.sort_by(|a, b| a.left.cmp(&b.left));
    let size = pairs.len();

    tracing::debug!(size, "maximum matching complete");

    Ok(RunOutput::new(
        search.recorder.into_trace(),
        MatchingResult { pairs, size },
    ))
}
