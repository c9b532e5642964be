//! Distance matrix model for the tour engine.
//!
//! TSP needs all-pairs distances up front, so the payload carries a full
//! square matrix rather than an edge list.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationReport, ViolationKind};

/// Wire shape of a distance-matrix payload:
/// `{"cities": [...], "distances": [[...], ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSpec {
    pub cities: Vec<String>,
    pub distances: Vec<Vec<f64>>,
}

/// Validated square matrix of non-negative distances with a zero diagonal.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    cities: Vec<String>,
    distances: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Validate a payload and build the matrix, collecting every violation:
    /// duplicate city labels, shape mismatches, non-finite or negative
    /// entries, and a non-zero diagonal.
    pub fn from_spec(spec: &MatrixSpec) -> Result<DistanceMatrix> {
        let mut report = ValidationReport::new();
        let n = spec.cities.len();

        if n == 0 {
            report.push(ViolationKind::Malformed, "matrix has no cities");
        }

        for (i, city) in spec.cities.iter().enumerate() {
            if spec.cities[..i].contains(city) {
                report.push(
                    ViolationKind::DuplicateNode,
                    format!("city `{city}` appears more than once"),
                );
            }
        }

        if spec.distances.len() != n {
            report.push(
                ViolationKind::Malformed,
                format!("expected {n} distance rows, got {}", spec.distances.len()),
            );
        }

        for (i, row) in spec.distances.iter().enumerate() {
            if row.len() != n {
                report.push(
                    ViolationKind::Malformed,
                    format!("distance row {i} has {} entries, expected {n}", row.len()),
                );
                continue;
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    report.push(
                        ViolationKind::Malformed,
                        format!("distance [{i}][{j}] is not finite"),
                    );
                } else if value < 0.0 {
                    report.push(
                        ViolationKind::NegativeWeight,
                        format!("distance [{i}][{j}] is negative"),
                    );
                } else if i == j && value != 0.0 {
                    report.push(
                        ViolationKind::Malformed,
                        format!("diagonal entry [{i}][{i}] must be zero"),
                    );
                }
            }
        }

        report.into_result()?;

        Ok(DistanceMatrix {
            cities: spec.cities.clone(),
            distances: spec.distances.clone(),
        })
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn city(&self, index: usize) -> &str {
        &self.cities[index]
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from][to]
    }

    /// Rank of every city in lexicographic label order, used for
    /// deterministic tour tie-breaking.
    pub fn lexicographic_ranks(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.cities.len()).collect();
        order.sort_by(|&a, &b| self.cities[a].cmp(&self.cities[b]));
        let mut ranks = vec![0; self.cities.len()];
        for (rank, &city) in order.iter().enumerate() {
            ranks[city] = rank;
        }
        ranks
    }
}
