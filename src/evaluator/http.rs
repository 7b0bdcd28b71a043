//! HTTP transfer evaluator (download and upload).

use super::SubMetric;
use crate::aggregate::{weighted_score, ScoreResult};
use crate::config::HttpConfig;
use crate::math::{average, percentile, ratio};
use crate::snapshot::{HttpSamples, TransferSamples};
use serde::{Deserialize, Serialize};

/// HTTP transfer score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    /// Coverage-adjusted score used for the data aggregate.
    pub normalized: Option<f64>,
    /// Combined success ratio over both directions.
    pub success_ratio: SubMetric,
    pub dl_avg: SubMetric,
    pub dl_p10: SubMetric,
    pub dl_p90: SubMetric,
    pub ul_avg: SubMetric,
    pub ul_p10: SubMetric,
    pub ul_p90: SubMetric,
    pub dl: TransferDiagnostics,
    pub ul: TransferDiagnostics,
}

/// Per-direction counters kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDiagnostics {
    pub requests: u64,
    pub completed: u64,
    pub success_ratio: Option<f64>,
}

impl TransferDiagnostics {
    fn from_samples(samples: &TransferSamples) -> Self {
        Self {
            requests: samples.requests,
            completed: samples.completed,
            success_ratio: ratio(samples.completed as f64, samples.requests as f64),
        }
    }
}

/// Scores HTTP transfer samples.
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    config: HttpConfig,
}

impl HttpEvaluator {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, samples: &HttpSamples) -> HttpScore {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;
        let (dl, ul) = (&samples.dl, &samples.ul);

        // Whichever direction ran contributes; both pool into one ratio.
        let success_ratio = SubMetric::evaluate(
            ratio(
                dl.completed as f64 + ul.completed as f64,
                dl.requests as f64 + ul.requests as f64,
            ),
            &thresholds.success_ratio,
            weights.success_ratio,
        );

        let dl_avg = SubMetric::evaluate(average(&dl.throughputs), &thresholds.dl_avg, weights.dl_avg);
        let dl_p10 = SubMetric::evaluate(
            percentile(&dl.throughputs, 0.1),
            &thresholds.dl_p10,
            weights.dl_p10,
        );
        let dl_p90 = SubMetric::evaluate(
            percentile(&dl.throughputs, 0.9),
            &thresholds.dl_p90,
            weights.dl_p90,
        );

        let ul_avg = SubMetric::evaluate(average(&ul.throughputs), &thresholds.ul_avg, weights.ul_avg);
        let ul_p10 = SubMetric::evaluate(
            percentile(&ul.throughputs, 0.1),
            &thresholds.ul_p10,
            weights.ul_p10,
        );
        let ul_p90 = SubMetric::evaluate(
            percentile(&ul.throughputs, 0.9),
            &thresholds.ul_p90,
            weights.ul_p90,
        );

        let result = weighted_score(&[
            success_ratio.entry(),
            dl_avg.entry(),
            dl_p10.entry(),
            dl_p90.entry(),
            ul_avg.entry(),
            ul_p10.entry(),
            ul_p90.entry(),
        ]);
        #[cfg(feature = "logging")]
        log::trace!(
            "http: score={:?} applied_weight={}",
            result.score,
            result.applied_weight
        );

        HttpScore {
            result,
            normalized: None,
            success_ratio,
            dl_avg,
            dl_p10,
            dl_p90,
            ul_avg,
            ul_p10,
            ul_p90,
            dl: TransferDiagnostics::from_samples(dl),
            ul: TransferDiagnostics::from_samples(ul),
        }
    }
}
