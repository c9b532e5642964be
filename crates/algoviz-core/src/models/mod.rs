//! Domain models.
//!
//! Pure data plus validation: each model is built once per run from a
//! payload and is read-only during execution.
//!
//! - [`graph`]: weighted graphs for Prim, Dijkstra, and Floyd–Warshall
//! - [`bipartite`]: two-sided graphs for maximum matching
//! - [`matrix`]: all-pairs distance matrices for TSP
//! - [`dataset`]: labeled rows and the probability table for Naive Bayes

pub mod bipartite;
pub mod dataset;
pub mod graph;
pub mod matrix;

pub use bipartite::{BipartiteGraph, BipartiteSpec, PairSpec};
pub use dataset::{ClassifySpec, ProbabilityTable, RowSpec, TrainingSpec};
pub use graph::{EdgeSpec, Graph, GraphSpec, WeightPolicy};
pub use matrix::{DistanceMatrix, MatrixSpec};
