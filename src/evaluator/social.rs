//! Social media evaluator.

use super::SubMetric;
use crate::aggregate::{weighted_score, ScoreResult};
use crate::config::SocialConfig;
use crate::math::{average, fraction_above, ratio};
use crate::snapshot::SocialSamples;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub normalized: Option<f64>,
    pub success_ratio: SubMetric,
    pub duration_avg: SubMetric,
    pub slow_ratio: SubMetric,
    pub throughput_avg: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SocialEvaluator {
    config: SocialConfig,
}

impl SocialEvaluator {
    pub fn new(config: SocialConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, samples: &SocialSamples) -> SocialScore {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;

        let success_ratio = SubMetric::evaluate(
            ratio(samples.completed as f64, samples.requests as f64),
            &thresholds.success_ratio,
            weights.success_ratio,
        );
        let duration_avg = SubMetric::evaluate(
            average(&samples.durations),
            &thresholds.duration_avg,
            weights.duration_avg,
        );
        let slow_ratio = SubMetric::evaluate(
            fraction_above(&samples.durations, self.config.slow_ms),
            &thresholds.slow_ratio,
            weights.slow_ratio,
        );

        let result = weighted_score(&[
            success_ratio.entry(),
            duration_avg.entry(),
            slow_ratio.entry(),
        ]);
        #[cfg(feature = "logging")]
        log::trace!(
            "social: score={:?} applied_weight={}",
            result.score,
            result.applied_weight
        );

        SocialScore {
            result,
            normalized: None,
            success_ratio,
            duration_avg,
            slow_ratio,
            throughput_avg: average(&samples.throughputs),
        }
    }
}
