//! Weighted graph model shared by the path and spanning-tree engines.
//!
//! Node labels from the payload are mapped to dense indices in payload
//! order; engines work on indices and translate back to labels when
//! recording steps. The graph is read-only once built.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationReport, ViolationKind};

/// Wire shape of a weighted graph payload:
/// `{"nodes": [...], "edges": [{"from", "to", "weight"}...], "directed"?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeSpec>,
    /// Interpret edges as one-way. Defaults to false (undirected).
    #[serde(default)]
    pub directed: bool,
}

/// One edge of a graph payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Sign constraint the target engine imposes on edge weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightPolicy {
    /// Negative weights are a validation error (Prim, Dijkstra).
    NonNegative,
    /// Negative weights are accepted (Floyd–Warshall).
    AllowNegative,
}

/// Validated weighted graph with adjacency lists.
#[derive(Debug, Clone)]
pub struct Graph {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
    edges: Vec<(usize, usize, f64)>,
    directed: bool,
}

impl Graph {
    /// Validate a payload and build the graph.
    ///
    /// Collects every violation found, not just the first: duplicate
    /// labels, dangling edge endpoints, non-finite weights, and negative
    /// weights under [`WeightPolicy::NonNegative`].
    pub fn from_spec(spec: &GraphSpec, policy: WeightPolicy) -> Result<Graph> {
        let mut report = ValidationReport::new();

        if spec.nodes.is_empty() {
            report.push(ViolationKind::Malformed, "graph has no nodes");
        }

        let mut index = HashMap::with_capacity(spec.nodes.len());
        for (i, label) in spec.nodes.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                report.push(
                    ViolationKind::DuplicateNode,
                    format!("node `{label}` appears more than once"),
                );
            }
        }

        let mut edges = Vec::with_capacity(spec.edges.len());
        for edge in &spec.edges {
            let mut endpoints_ok = true;
            for endpoint in [&edge.from, &edge.to] {
                if !index.contains_key(endpoint) {
                    endpoints_ok = false;
                    report.push(
                        ViolationKind::DanglingEdge,
                        format!(
                            "edge {} -> {} references unknown node `{endpoint}`",
                            edge.from, edge.to
                        ),
                    );
                }
            }
            if !edge.weight.is_finite() {
                report.push(
                    ViolationKind::Malformed,
                    format!("edge {} -> {} has a non-finite weight", edge.from, edge.to),
                );
                continue;
            }
            if edge.weight < 0.0 && policy == WeightPolicy::NonNegative {
                report.push(
                    ViolationKind::NegativeWeight,
                    format!(
                        "edge {} -> {} has negative weight {}",
                        edge.from, edge.to, edge.weight
                    ),
                );
                continue;
            }
            if endpoints_ok {
                edges.push((index[&edge.from], index[&edge.to], edge.weight));
            }
        }

        report.into_result()?;

        let mut adjacency = vec![Vec::new(); spec.nodes.len()];
        for &(from, to, weight) in &edges {
            adjacency[from].push((to, weight));
            if !spec.directed {
                adjacency[to].push((from, weight));
            }
        }

        Ok(Graph {
            labels: spec.nodes.clone(),
            index,
            adjacency,
            edges,
            directed: spec.directed,
        })
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Label of a node index. Panics on out-of-range indices, which the
    /// validated construction rules out.
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Outgoing `(neighbor, weight)` pairs. For undirected graphs each
    /// payload edge appears in both endpoint lists.
    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }

    /// Payload edges as `(from, to, weight)` index triples.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Rank of every node in lexicographic label order. Engines use the
    /// ranks as deterministic tie-breakers without comparing strings in
    /// their hot loops.
    pub fn lexicographic_ranks(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.labels.len()).collect();
        order.sort_by(|&a, &b| self.labels[a].cmp(&self.labels[b]));
        let mut ranks = vec![0; self.labels.len()];
        for (rank, &node) in order.iter().enumerate() {
            ranks[node] = rank;
        }
        ranks
    }
}

impl GraphSpec {
    /// Convenience constructor used throughout the test suites.
    pub fn new(
        nodes: &[&str],
        edges: &[(&str, &str, f64)],
        directed: bool,
    ) -> Self {
        Self {
            nodes: nodes.iter().map(|s| s.to_string()).collect(),
            edges: edges
                .iter()
                .map(|&(from, to, weight)| EdgeSpec {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight,
                })
                .collect(),
            directed,
        }
    }
}
