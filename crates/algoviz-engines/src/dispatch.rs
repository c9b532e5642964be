//! JSON boundary for the routing layer.
//!
//! The external view layer selects an algorithm by route id and hands
//! over the payload it collected; this module parses it, runs the engine,
//! and serializes the `{"trace": ..., "result": ...}` envelope. Errors
//! serialize as structured `{"kind", "message", "details"?}` objects so
//! the input UI can render field-level diagnostics. Transport (HTTP or
//! otherwise) stays outside.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use algoviz_core::error::{EngineError, Result, ViolationKind};
use algoviz_core::models::{BipartiteSpec, ClassifySpec, GraphSpec, MatrixSpec, TrainingSpec};
use algoviz_core::RunOutput;

use crate::{bayes, dijkstra, floyd, matching, prim, tsp};

/// The six teaching algorithms, keyed by their route ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    Prim,
    Dijkstra,
    Floyd,
    Bayes,
    MaxMatching,
    Tsp,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 6] = [
        AlgorithmKind::Prim,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Floyd,
        AlgorithmKind::Bayes,
        AlgorithmKind::MaxMatching,
        AlgorithmKind::Tsp,
    ];

    /// Route id as the view layer spells it.
    pub fn route(&self) -> &'static str {
        match self {
            AlgorithmKind::Prim => "prim",
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::Floyd => "floyd",
            AlgorithmKind::Bayes => "bayes",
            AlgorithmKind::MaxMatching => "max-matching",
            AlgorithmKind::Tsp => "tsp",
        }
    }
}

impl std::str::FromStr for AlgorithmKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.route() == s)
            .ok_or_else(|| {
                EngineError::validation(
                    ViolationKind::Malformed,
                    format!("unknown algorithm route `{s}`"),
                )
            })
    }
}

/// Graph payload with the optional spanning-tree start node.
#[derive(Debug, Deserialize)]
struct PrimPayload {
    #[serde(flatten)]
    graph: GraphSpec,
    start: Option<String>,
}

/// Graph payload with the required shortest-path source.
#[derive(Debug, Deserialize)]
struct DijkstraPayload {
    #[serde(flatten)]
    graph: GraphSpec,
    start: String,
}

/// Training rows plus the feature vector to classify, in one request.
#[derive(Debug, Deserialize)]
struct BayesPayload {
    #[serde(flatten)]
    train: TrainingSpec,
    #[serde(flatten)]
    input: ClassifySpec,
}

/// Parse the payload for `kind`, run the engine, and serialize the
/// output envelope.
pub fn run_request(kind: AlgorithmKind, payload: Value) -> Result<Value> {
    tracing::debug!(route = kind.route(), "dispatching run");
    match kind {
        AlgorithmKind::Prim => {
            let p: PrimPayload = parse(payload)?;
            envelope(prim::run(&p.graph, p.start.as_deref())?)
        }
        AlgorithmKind::Dijkstra => {
            let p: DijkstraPayload = parse(payload)?;
            envelope(dijkstra::run(&p.graph, &p.start)?)
        }
        AlgorithmKind::Floyd => {
            let p: GraphSpec = parse(payload)?;
            envelope(floyd::run(&p)?)
        }
        AlgorithmKind::Bayes => {
            let p: BayesPayload = parse(payload)?;
            envelope(bayes::run(&p.train, &p.input)?)
        }
        AlgorithmKind::MaxMatching => {
            let p: BipartiteSpec = parse(payload)?;
            envelope(matching::run(&p)?)
        }
        AlgorithmKind::Tsp => {
            let p: MatrixSpec = parse(payload)?;
            envelope(tsp::run(&p)?)
        }
    }
}

/// Wire-shaped error body for a failed run.
pub fn error_body(error: &EngineError) -> Value {
    serde_json::to_value(error.to_wire()).unwrap_or_else(|_| {
        serde_json::json!({
            "kind": "internal",
            "message": "error body serialization failed",
        })
    })
}

fn parse<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|err| {
        EngineError::validation(ViolationKind::Malformed, format!("payload: {err}"))
    })
}

fn envelope<R: Serialize>(output: RunOutput<R>) -> Result<Value> {
    serde_json::to_value(&output)
        .map_err(|err| EngineError::Internal(format!("output serialization: {err}")))
}
