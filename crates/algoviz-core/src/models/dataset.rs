//! Labeled training data and the probability table derived from it.
//!
//! The table stores raw counts and derives priors and smoothed
//! likelihoods on demand. Smoothing is additive (Laplace): +1 in the
//! numerator and +|distinct observed values of the feature| in the
//! denominator, so unseen (value, class) combinations never collapse a
//! whole posterior to zero. The constant is fixed policy, not a tunable.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Precondition, Result, ValidationReport, ViolationKind};

/// Wire shape of a training payload:
/// `{"rows": [{"features": {...}, "label": ...}...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSpec {
    pub rows: Vec<RowSpec>,
}

/// One labeled observation of categorical feature values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSpec {
    pub features: BTreeMap<String, String>,
    pub label: String,
}

/// Wire shape of a classification payload: `{"features": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifySpec {
    pub features: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
struct FeatureStats {
    /// Distinct values observed for this feature across all rows.
    values: BTreeSet<String>,
    /// (class, value) -> occurrence count.
    counts: HashMap<(String, String), usize>,
}

/// Class priors and conditional likelihoods counted from a training set.
/// Immutable once built; classification reads it concurrently without
/// coordination.
#[derive(Debug, Clone)]
pub struct ProbabilityTable {
    total_rows: usize,
    class_counts: BTreeMap<String, usize>,
    features: BTreeMap<String, FeatureStats>,
}

impl ProbabilityTable {
    /// Count a training set into a table. Fails if the dataset is empty
    /// or a row carries no features.
    pub fn from_rows(spec: &TrainingSpec) -> Result<ProbabilityTable> {
        let mut report = ValidationReport::new();

        if spec.rows.is_empty() {
            report.push(ViolationKind::Malformed, "training set has no rows");
        }
        for (i, row) in spec.rows.iter().enumerate() {
            if row.features.is_empty() {
                report.push(ViolationKind::Malformed, format!("row {i} has no features"));
            }
            if row.label.is_empty() {
                report.push(ViolationKind::Malformed, format!("row {i} has an empty label"));
            }
        }
        report.into_result()?;

        let mut class_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut features: BTreeMap<String, FeatureStats> = BTreeMap::new();

        for row in &spec.rows {
            *class_counts.entry(row.label.clone()).or_insert(0) += 1;
            for (feature, value) in &row.features {
                let stats = features.entry(feature.clone()).or_default();
                stats.values.insert(value.clone());
                *stats
                    .counts
                    .entry((row.label.clone(), value.clone()))
                    .or_insert(0) += 1;
            }
        }

        Ok(ProbabilityTable {
            total_rows: spec.rows.len(),
            class_counts,
            features,
        })
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Class labels in sorted order; also the deterministic scoring order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_counts.keys().map(String::as_str)
    }

    pub fn class_count(&self, class: &str) -> usize {
        self.class_counts.get(class).copied().unwrap_or(0)
    }

    /// Prior probability of a class: frequency / total rows.
    pub fn prior(&self, class: &str) -> f64 {
        self.class_count(class) as f64 / self.total_rows as f64
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains_key(feature)
    }

    /// Smoothed conditional likelihood P(feature = value | class).
    ///
    /// Fails with [`Precondition::UnknownFeature`] when the feature never
    /// occurred in training; an unseen *value* of a known feature is
    /// handled by the smoothing rule instead.
    pub fn likelihood(&self, feature: &str, value: &str, class: &str) -> Result<f64> {
        let stats = self.features.get(feature).ok_or_else(|| {
            Precondition::UnknownFeature {
                feature: feature.to_string(),
            }
        })?;
        let matches = stats
            .counts
            .get(&(class.to_string(), value.to_string()))
            .copied()
            .unwrap_or(0);
        let class_total = self.class_count(class);
        Ok((matches as f64 + 1.0) / (class_total as f64 + stats.values.len() as f64))
    }
}
