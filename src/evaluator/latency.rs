//! Interactivity (latency) evaluator.
//!
//! Success is not the request/completion ratio: it is the fraction of
//! recorded interactivity scores above the usable cutoff. The plain
//! completion ratio is kept as a diagnostic.

use super::SubMetric;
use crate::aggregate::{weighted_score, ScoreResult};
use crate::config::LatencyConfig;
use crate::math::{average, fraction_above, ratio};
use crate::snapshot::LatencySamples;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub normalized: Option<f64>,
    /// Fraction of scores above the usable cutoff.
    pub success_ratio: SubMetric,
    pub score_avg: SubMetric,
    pub completion_ratio: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct LatencyEvaluator {
    config: LatencyConfig,
}

impl LatencyEvaluator {
    pub fn new(config: LatencyConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, samples: &LatencySamples) -> LatencyScore {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;

        let success_ratio = SubMetric::evaluate(
            fraction_above(&samples.scores, self.config.usable_cutoff),
            &thresholds.success_ratio,
            weights.success_ratio,
        );
        let score_avg = SubMetric::evaluate(
            average(&samples.scores),
            &thresholds.score_avg,
            weights.score_avg,
        );

        let result = weighted_score(&[success_ratio.entry(), score_avg.entry()]);
        #[cfg(feature = "logging")]
        log::trace!(
            "latency: score={:?} applied_weight={}",
            result.score,
            result.applied_weight
        );

        LatencyScore {
            result,
            normalized: None,
            success_ratio,
            score_avg,
            completion_ratio: ratio(samples.completed as f64, samples.requests as f64),
        }
    }
}
