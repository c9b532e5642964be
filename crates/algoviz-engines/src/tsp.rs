//! Exact travelling-salesman tours via Held–Karp bitmask DP, with step
//! recording.
//!
//! State is a (visited-set, last-city) pair valued at the minimum cost of
//! reaching it from the start city (index 0). The forward pass evaluates
//! states in increasing visited-set population count, so every subproblem
//! is ready before use, and records a `state-evaluated` step per
//! transition considered. A second, cost-to-complete table then drives
//! the tour reconstruction forward from the start, preferring the
//! smallest city label on cost ties; the reported tour is therefore the
//! lexicographically smallest optimal one. Exact search is exponential,
//! so instances above [`MAX_CITIES`] are refused outright.

use serde::Serialize;

use algoviz_core::error::{EngineError, Precondition, Result};
use algoviz_core::models::{DistanceMatrix, MatrixSpec};
use algoviz_core::{RunOutput, RunSummary, StepEvent, Summarize, TraceRecorder};

/// Hard upper bound on the instance size. Both DP tables hold
/// `2^n * n` states; teaching inputs sit well below this.
pub const MAX_CITIES: usize = 12;

/// Tolerance for cost-tie comparisons during reconstruction.
const COST_EPSILON: f64 = 1e-9;

/// The optimal closed tour: starts and ends at the first payload city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TspResult {
    pub tour: Vec<String>,
    pub cost: f64,
}

impl Summarize for TspResult {
    fn summarize(&self) -> RunSummary {
        RunSummary {
            headline: format!("optimal tour of cost {}", self.cost),
            details: vec![self.tour.join(" -> ")],
        }
    }
}

/// Run the exact tour search over a validated distance matrix.
pub fn run(spec: &MatrixSpec) -> Result<RunOutput<TspResult>> {
    let matrix = DistanceMatrix::from_spec(spec)?;
    let n = matrix.city_count();
    if n > MAX_CITIES {
        return Err(Precondition::InstanceTooLarge {
            cities: n,
            max: MAX_CITIES,
        }
        .into());
    }

    tracing::debug!(cities = n, "running tsp");

    let mut recorder = TraceRecorder::new();

    if n == 1 {
        // A single city is already a closed tour of cost zero.
        recorder.record(StepEvent::PathExtended {
            city: matrix.city(0).to_string(),
            position: 0,
        });
        return Ok(RunOutput::new(
            recorder.into_trace(),
            TspResult {
                tour: vec![matrix.city(0).to_string(), matrix.city(0).to_string()],
                cost: 0.0,
            },
        ));
    }

    let full: u32 = (1u32 << n) - 1;
    let optimum = forward_pass(&matrix, n, full, &mut recorder);
    let completion = completion_pass(&matrix, n, full);

    // Both tables bound the same tours; disagreement is a defect.
    let check = completion[1][0];
    if (optimum - check).abs() > COST_EPSILON {
        return Err(EngineError::Internal(format!(
            "tour tables disagree on the optimum: {optimum} vs {check}"
        )));
    }

    let tour = reconstruct(&matrix, n, full, &completion, &mut recorder);
    let cost = optimum;

    tracing::debug!(cost, steps = recorder.len(), "tsp complete");

    Ok(RunOutput::new(
        recorder.into_trace(),
        TspResult { tour, cost },
    ))
}

/// Minimum cost of reaching (visited, last) from the start, evaluated in
/// increasing popcount order with one `state-evaluated` step per
/// transition. Returns the optimal closed-tour cost.
fn forward_pass(
    matrix: &DistanceMatrix,
    n: usize,
    full: u32,
    recorder: &mut TraceRecorder,
) -> f64 {
    let mut masks: Vec<u32> = (1..=full).filter(|m| m & 1 == 1).collect();
    masks.sort_by_key(|m| m.count_ones());

    let mut reach = vec![vec![f64::INFINITY; n]; 1 << n];
    reach[1][0] = 0.0;

    for &mask in &masks {
        for last in 0..n {
            let cost = reach[mask as usize][last];
            if !cost.is_finite() {
                continue;
            }
            for next in 0..n {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let candidate = cost + matrix.distance(last, next);
                recorder.record(StepEvent::StateEvaluated {
                    visited: mask,
                    last: matrix.city(last).to_string(),
                    next: matrix.city(next).to_string(),
                    cost: candidate,
                });
                let slot = &mut reach[(mask | 1 << next) as usize][next];
                if candidate < *slot {
                    *slot = candidate;
                }
            }
        }
    }

    (0..n)
        .map(|last| reach[full as usize][last] + matrix.distance(last, 0))
        .fold(f64::INFINITY, f64::min)
}

/// Minimum cost of completing the tour from (visited, last): visiting
/// every remaining city and returning to the start.
fn completion_pass(matrix: &DistanceMatrix, n: usize, full: u32) -> Vec<Vec<f64>> {
    let mut masks: Vec<u32> = (1..=full).filter(|m| m & 1 == 1).collect();
    masks.sort_by_key(|m| std::cmp::Reverse(m.count_ones()));

    let mut complete = vec![vec![f64::INFINITY; n]; 1 << n];
    for last in 0..n {
        complete[full as usize][last] = matrix.distance(last, 0);
    }

    for &mask in &masks {
        if mask == full {
            continue;
        }
        for last in 0..n {
            if mask & (1 << last) == 0 {
                continue;
            }
            let mut best = f64::INFINITY;
            for next in 0..n {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let candidate =
                    matrix.distance(last, next) + complete[(mask | 1 << next) as usize][next];
                if candidate < best {
                    best = candidate;
                }
            }
            complete[mask as usize][last] = best;
        }
    }
    complete
}

/// Walk forward from the start, always taking the cheapest continuation
/// and preferring the smallest city label on ties.
fn reconstruct(
    matrix: &DistanceMatrix,
    n: usize,
    full: u32,
    complete: &[Vec<f64>],
    recorder: &mut TraceRecorder,
) -> Vec<String> {
    let ranks = matrix.lexicographic_ranks();
    let mut by_label: Vec<usize> = (0..n).collect();
    by_label.sort_by_key(|&c| ranks[c]);

    let mut tour = vec![matrix.city(0).to_string()];
    recorder.record(StepEvent::PathExtended {
        city: matrix.city(0).to_string(),
        position: 0,
    });

    let mut mask = 1u32;
    let mut last = 0usize;
    for position in 1..n {
        let target = complete[mask as usize][last];
        let mut chosen = None;
        for &next in &by_label {
            if mask & (1 << next) != 0 {
                continue;
            }
            let candidate =
                matrix.distance(last, next) + complete[(mask | 1 << next) as usize][next];
            if (candidate - target).abs() <= COST_EPSILON {
                chosen = Some(next);
                break;
            }
        }
        // The completion table guarantees some continuation achieves it.
        let next = chosen.expect("completion table admits a continuation");
        tour.push(matrix.city(next).to_string());
        recorder.record(StepEvent::PathExtended {
            city: matrix.city(next).to_string(),
            position,
        });
        mask |= 1 << next;
        last = next;
    }

    tour.push(matrix.city(0).to_string());
    recorder.record(StepEvent::PathExtended {
        city: matrix.city(0).to_string(),
        position: n,
    });
    tour
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(cities: &[&str], distances: Vec<Vec<f64>>) -> MatrixSpec {
        MatrixSpec {
            cities: cities.iter().map(|s| s.to_string()).collect(),
            distances,
        }
    }

    fn square_ring() -> MatrixSpec {
        // Ring W-X-Y-Z with cheap ring edges (1) and expensive
        // diagonals (10): the optimal cycle costs 4.
        spec(
            &["W", "X", "Y", "Z"],
            vec![
                vec![0.0, 1.0, 10.0, 1.0],
                vec![1.0, 0.0, 1.0, 10.0],
                vec![10.0, 1.0, 0.0, 1.0],
                vec![1.0, 10.0, 1.0, 0.0],
            ],
        )
    }

    #[test]
    fn test_known_optimal_ring() {
        let output = run(&square_ring()).unwrap();
        assert!((output.result.cost - 4.0).abs() < 1e-9);
        assert_eq!(output.result.tour.len(), 5);
        assert_eq!(output.result.tour[0], "W");
        assert_eq!(output.result.tour[4], "W");
    }

    #[test]
    fn test_lexicographic_tie_break() {
        // Both ring directions cost 4; W -> X -> Y -> Z beats W -> Z -> Y -> X.
        let output = run(&square_ring()).unwrap();
        assert_eq!(output.result.tour, vec!["W", "X", "Y", "Z", "W"]);
    }

    #[test]
    fn test_cost_matches_tour_edges() {
        let output = run(&square_ring()).unwrap();
        let matrix = DistanceMatrix::from_spec(&square_ring()).unwrap();
        let index = |label: &str| {
            matrix
                .cities()
                .iter()
                .position(|c| c == label)
                .unwrap()
        };
        let walked: f64 = output
            .result
            .tour
            .windows(2)
            .map(|pair| matrix.distance(index(&pair[0]), index(&pair[1])))
            .sum();
        assert!((walked - output.result.cost).abs() < 1e-9);
    }

    #[test]
    fn test_states_evaluated_in_popcount_order() {
        let output = run(&square_ring()).unwrap();
        let popcounts: Vec<u32> = output
            .trace
            .events()
            .iter()
            .filter_map(|e| match e {
                StepEvent::StateEvaluated { visited, .. } => Some(visited.count_ones()),
                _ => None,
            })
            .collect();
        assert!(!popcounts.is_empty());
        assert!(popcounts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_two_cities_round_trip() {
        let output = run(&spec(
            &["P", "Q"],
            vec![vec![0.0, 3.0], vec![4.0, 0.0]],
        ))
        .unwrap();
        assert_eq!(output.result.tour, vec!["P", "Q", "P"]);
        assert!((output.result.cost - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_city() {
        let output = run(&spec(&["P"], vec![vec![0.0]])).unwrap();
        assert_eq!(output.result.tour, vec!["P", "P"]);
        assert_eq!(output.result.cost, 0.0);
    }

    #[test]
    fn test_oversized_instance_refused() {
        let n = MAX_CITIES + 1;
        let cities: Vec<String> = (0..n).map(|i| format!("C{i:02}")).collect();
        let refs: Vec<&str> = cities.iter().map(String::as_str).collect();
        let mut distances = vec![vec![1.0; n]; n];
        for (i, row) in distances.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        let err = run(&spec(&refs, distances)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Precondition(Precondition::InstanceTooLarge { cities: 13, max: 12 })
        ));
    }

    #[test]
    fn test_asymmetric_distances() {
        // Going P->Q->R->P costs 1+1+1; the reverse costs 5+5+5.
        let output = run(&spec(
            &["P", "Q", "R"],
            vec![
                vec![0.0, 1.0, 5.0],
                vec![5.0, 0.0, 1.0],
                vec![1.0, 5.0, 0.0],
            ],
        ))
        .unwrap();
        assert_eq!(output.result.tour, vec!["P", "Q", "R", "P"]);
        assert!((output.result.cost - 3.0).abs() < 1e-9);
    }
}
