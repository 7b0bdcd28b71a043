//! Coverage-aware weighted aggregation.
//!
//! A missing sub-metric neither counts against nor distorts the mean of what
//! was measured; its absence is recorded in `applied_weight` so that the
//! parent level can penalize partial coverage via [`normalize`].

use serde::{Deserialize, Serialize};

/// One `(weight, score)` pair fed to [`weighted_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEntry {
    pub weight: f64,
    /// `None` when the underlying statistic had no samples.
    pub score: Option<f64>,
}

impl WeightedEntry {
    pub fn new(weight: f64, score: Option<f64>) -> Self {
        Self { weight, score }
    }
}

/// Aggregated score plus the weight that actually had data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Score in `[0, 1]`, `None` if nothing contributed.
    pub score: Option<f64>,
    /// Sum of weights of entries that had a score.
    pub applied_weight: f64,
}

impl ScoreResult {
    /// Result with no contributing entries.
    pub fn empty() -> Self {
        Self {
            score: None,
            applied_weight: 0.0,
        }
    }

    /// True when at least one entry contributed.
    pub fn has_data(&self) -> bool {
        self.score.is_some()
    }

    /// Score as a percentage.
    pub fn percent(&self) -> Option<f64> {
        self.score.map(|s| s * 100.0)
    }
}

/// Weighted mean over entries that have a score.
pub fn weighted_score(entries: &[WeightedEntry]) -> ScoreResult {
    let (applied_weight, weighted_sum) = entries
        .iter()
        .filter_map(|e| e.score.map(|s| (e.weight, s)))
        .fold((0.0, 0.0), |(total, sum), (weight, score)| {
            (total + weight, sum + weight * score)
        });

    if applied_weight <= 0.0 {
        return ScoreResult::empty();
    }

    ScoreResult {
        score: Some(weighted_sum / applied_weight),
        applied_weight,
    }
}

/// Rescale a score by its coverage fraction `applied / expected`.
///
/// Full coverage passes through unchanged. A `None` score, or a non-positive
/// expected weight, yields `None` so the domain is excluded from its parent.
pub fn normalize(result: &ScoreResult, expected_weight: f64) -> Option<f64> {
    if expected_weight <= 0.0 {
        return None;
    }
    result
        .score
        .map(|score| score * (result.applied_weight / expected_weight))
}
