//! Bipartite graph model for the matching engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationReport, ViolationKind};

/// Wire shape of a bipartite payload:
/// `{"left": [...], "right": [...], "edges": [{"from", "to"}...]}`.
/// `from` must name a left node, `to` a right node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BipartiteSpec {
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub edges: Vec<PairSpec>,
}

/// One unweighted left-to-right edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSpec {
    pub from: String,
    pub to: String,
}

/// Validated bipartite graph with left-to-right adjacency.
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    left: Vec<String>,
    right: Vec<String>,
    adjacency: Vec<Vec<usize>>,
}

impl BipartiteGraph {
    /// Validate a payload and build the graph, collecting every violation:
    /// duplicate labels within a side, labels on both sides, and edges
    /// whose endpoints are missing or on the wrong side.
    pub fn from_spec(spec: &BipartiteSpec) -> Result<BipartiteGraph> {
        let mut report = ValidationReport::new();

        let left_index = side_index(&spec.left, "left", &mut report);
        let right_index = side_index(&spec.right, "right", &mut report);

        for label in &spec.left {
            if right_index.contains_key(label) {
                report.push(
                    ViolationKind::Malformed,
                    format!("node `{label}` appears on both sides"),
                );
            }
        }

        let mut adjacency = vec![Vec::new(); spec.left.len()];
        for edge in &spec.edges {
            let from = lookup_endpoint(
                &edge.from,
                &left_index,
                &right_index,
                "left",
                &mut report,
            );
            let to = lookup_endpoint(
                &edge.to,
                &right_index,
                &left_index,
                "right",
                &mut report,
            );
            if let (Some(from), Some(to)) = (from, to) {
                if !adjacency[from].contains(&to) {
                    adjacency[from].push(to);
                }
            }
        }

        report.into_result()?;

        Ok(BipartiteGraph {
            left: spec.left.clone(),
            right: spec.right.clone(),
            adjacency,
        })
    }

    pub fn left_count(&self) -> usize {
        self.left.len()
    }

    pub fn right_count(&self) -> usize {
        self.right.len()
    }

    pub fn left_label(&self, index: usize) -> &str {
        &self.left[index]
    }

    pub fn right_label(&self, index: usize) -> &str {
        &self.right[index]
    }

    /// Right-side neighbor indices of a left node, in payload order.
    pub fn neighbors(&self, left: usize) -> &[usize] {
        &self.adjacency[left]
    }

    /// Left indices sorted by label; the matching engine's fixed
    /// deterministic attempt order.
    pub fn left_lexicographic_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.left.len()).collect();
        order.sort_by(|&a, &b| self.left[a].cmp(&self.left[b]));
        order
    }

    /// Rank of every right node in lexicographic label order.
    pub fn right_lexicographic_ranks(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.right.len()).collect();
        order.sort_by(|&a, &b| self.right[a].cmp(&self.right[b]));
        let mut ranks = vec![0; self.right.len()];
        for (rank, &node) in order.iter().enumerate() {
            ranks[node] = rank;
        }
        ranks
    }
}

fn side_index(
    labels: &[String],
    side: &str,
    report: &mut ValidationReport,
) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.clone(), i).is_some() {
            report.push(
                ViolationKind::DuplicateNode,
                format!("{side} node `{label}` appears more than once"),
            );
        }
    }
    index
}

fn lookup_endpoint(
    label: &str,
    expected: &HashMap<String, usize>,
    opposite: &HashMap<String, usize>,
    side: &str,
    report: &mut ValidationReport,
) -> Option<usize> {
    match expected.get(label) {
        Some(&index) => Some(index),
        None if opposite.contains_key(label) => {
            report.push(
                ViolationKind::Malformed,
                format!("edge endpoint `{label}` is not a {side} node"),
            );
            None
        }
        None => {
            report.push(
                ViolationKind::DanglingEdge,
                format!("edge references unknown node `{label}`"),
            );
            None
        }
    }
}
