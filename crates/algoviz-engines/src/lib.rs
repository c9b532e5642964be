//! Step-recording implementations of the six algoviz teaching algorithms.
//!
//! Each engine consumes a validated domain model from `algoviz-core`,
//! records the visualization-relevant steps of its run into a trace, and
//! returns a typed result inside a `{trace, result}` envelope:
//!
//! - [`prim`]: minimum spanning trees
//! - [`dijkstra`]: single-source shortest paths
//! - [`floyd`]: all-pairs shortest paths
//! - [`bayes`]: Naive Bayes classification
//! - [`matching`]: maximum bipartite matching
//! - [`tsp`]: exact travelling-salesman tours
//!
//! Runs are synchronous, deterministic (documented tie-break rules), and
//! all-or-nothing: a failed run yields an error and no partial trace.
//! [`dispatch`] is the JSON boundary the external routing layer calls.
//!
//! # Example
//!
//! ```
//! use algoviz_core::models::GraphSpec;
//!
//! let spec = GraphSpec::new(
//!     &["A", "B", "C"],
//!     &[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 4.0)],
//!     false,
//! );
//! let output = algoviz_engines::prim::run(&spec, Some("A")).unwrap();
//! assert_eq!(output.result.total_weight, 3.0);
//! assert!(!output.trace.is_empty());
//! ```

pub mod bayes;
pub mod dijkstra;
pub mod dispatch;
pub mod floyd;
pub mod matching;
pub mod prim;
pub mod tsp;

pub use bayes::BayesResult;
pub use dijkstra::{DijkstraResult, ShortestPath};
pub use dispatch::{error_body, run_request, AlgorithmKind};
pub use floyd::FloydResult;
pub use matching::{MatchedPair, MatchingResult};
pub use prim::{MstEdge, PrimResult};
pub use tsp::{TspResult, MAX_CITIES};
