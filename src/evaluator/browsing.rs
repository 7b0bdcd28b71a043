//! Web browsing evaluator.

use super::SubMetric;
use crate::aggregate::{weighted_score, ScoreResult};
use crate::config::BrowsingConfig;
use crate::math::{average, ratio};
use crate::snapshot::BrowsingSamples;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsingScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub normalized: Option<f64>,
    pub success_ratio: SubMetric,
    pub duration_avg: SubMetric,
    pub dns_resolution_avg: Option<f64>,
    pub throughput_avg: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct BrowsingEvaluator {
    config: BrowsingConfig,
}

impl BrowsingEvaluator {
    pub fn new(config: BrowsingConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, samples: &BrowsingSamples) -> BrowsingScore {
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

        let result = weighted_score(&[success_ratio.entry(), duration_avg.entry()]);
        #[cfg(feature = "logging")]
        log::trace!(
            "browsing: score={:?} applied_weight={}",
            result.score,
            result.applied_weight
        );

        BrowsingScore {
            result,
            normalized: None,
            success_ratio,
            duration_avg,
            dns_resolution_avg: average(&samples.dns_resolution_times),
            throughput_avg: average(&samples.throughputs),
        }
    }
}
