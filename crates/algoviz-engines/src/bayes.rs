//! Naive Bayes classification with step recording.
//!
//! Training counts a labeled dataset into a
//! [`ProbabilityTable`](algoviz_core::models::ProbabilityTable);
//! classification scores each class in log-space (log-prior plus the sum
//! of log-likelihoods over the input features) to avoid underflow from
//! multiplying many small probabilities, recording one
//! `class-score-computed` step per class. Posteriors are normalized with
//! log-sum-exp so they sum to one.

use std::collections::BTreeMap;

use serde::Serialize;

use algoviz_core::error::{Precondition, Result};
use algoviz_core::models::{ClassifySpec, ProbabilityTable, TrainingSpec};
use algoviz_core::{RunOutput, RunSummary, StepEvent, Summarize, TraceRecorder};

/// Predicted class and the normalized posterior per class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BayesResult {
    pub predicted: String,
    /// Posterior probability per class; sums to 1 within floating
    /// tolerance. Sorted by class label.
    pub posteriors: BTreeMap<String, f64>,
}

impl Summarize for BayesResult {
    fn summarize(&self) -> RunSummary {
        RunSummary {
            headline: format!(
                "predicted class `{}` with posterior {:.4}",
                self.predicted, self.posteriors[&self.predicted]
            ),
            details: self
                .posteriors
                .iter()
                .map(|(class, p)| format!("{class}: {p:.4}"))
                .collect(),
        }
    }
}

/// Train on the labeled rows, then classify the input feature vector.
///
/// Fails with [`Precondition::UnknownFeature`] when the input names a
/// feature absent from training. Classes are scored in sorted order;
/// arg-max ties resolve to the first class in that order.
pub fn run(train: &TrainingSpec, input: &ClassifySpec) -> Result<RunOutput<BayesResult>> {
    let table = ProbabilityTable::from_rows(train)?;

    // Reject unknown features up front so the trace stays all-or-nothing.
    for feature in input.features.keys() {
        if !table.has_feature(feature) {
            return Err(Precondition::UnknownFeature {
                feature: feature.clone(),
            }
            .into());
        }
    }

    tracing::debug!(
        rows = table.total_rows(),
        classes = table.classes().count(),
        features = input.features.len(),
        "running naive bayes"
    );

    let mut recorder = TraceRecorder::new();
    let mut log_scores: Vec<(String, f64)> = Vec::new();
    for class in table.classes() {
        let mut score = table.prior(class).ln();
        for (feature, value) in &input.features {
            score += table.likelihood(feature, value, class)?.ln();
        }
        recorder.record(StepEvent::ClassScoreComputed {
            class: class.to_string(),
            log_score: score,
        });
        log_scores.push((class.to_string(), score));
    }

    let posteriors = normalize(&log_scores);
    // Strict comparison keeps the first class in sorted order on ties.
    let mut best: Option<(&str, f64)> = None;
    for (class, score) in &log_scores {
        if best.map_or(true, |(_, b)| *score > b) {
            best = Some((class, *score));
        }
    }
    let predicted = best
        .map(|(class, _)| class.to_string())
        .ok_or_else(|| {
            // from_rows rejects empty datasets, so at least one class exists.
            algoviz_core::EngineError::Internal("no classes after training".into())
        })?;

    tracing::debug!(predicted = %predicted, "naive bayes complete");

    Ok(RunOutput::new(
        recorder.into_trace(),
        BayesResult {
            predicted,
            posteriors,
        },
    ))
}

/// Exponentiate and normalize log-scores via log-sum-exp.
fn normalize(log_scores: &[(String, f64)]) -> BTreeMap<String, f64> {
    let max = log_scores
        .iter()
        .map(|(_, s)| *s)
        .fold(f64::NEG_INFINITY, f64::max);
    let total: f64 = log_scores.iter().map(|(_, s)| (s - max).exp()).sum();
    log_scores
        .iter()
        .map(|(class, s)| (class.clone(), (s - max).exp() / total))
        .collect()
}
