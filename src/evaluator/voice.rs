//! Telephony evaluator.

use super::{histogram, SubMetric};
use crate::aggregate::{weighted_score, ScoreResult};
use crate::config::VoiceConfig;
use crate::math::{average, fraction_above, fraction_below, percentile, ratio};
use crate::snapshot::VoiceSamples;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Voice score with per-sub-metric detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    /// Score as it enters the overall aggregation.
    pub normalized: Option<f64>,
    /// Call setup success ratio.
    pub cssr: SubMetric,
    /// Call drop ratio.
    pub cdr: SubMetric,
    pub mos_avg: SubMetric,
    pub mos_low_ratio: SubMetric,
    pub setup_time_avg: SubMetric,
    pub setup_slow_ratio: SubMetric,
    pub attempts: u64,
    pub completed: u64,
    pub dropped: u64,
    pub setup_time_p90: Option<f64>,
    pub failure_reasons: BTreeMap<String, u64>,
}

/// Scores voice samples against the telephony tables.
#[derive(Debug, Clone)]
pub struct VoiceEvaluator {
    config: VoiceConfig,
}

impl VoiceEvaluator {
    pub fn new(config: VoiceConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, samples: &VoiceSamples) -> VoiceScore {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;

        // f64 sum: producer counters may be near u64::MAX
        let answered = samples.completed as f64 + samples.dropped as f64;

        let cssr = SubMetric::evaluate(
            ratio(samples.setup_ok as f64, samples.attempts as f64),
            &thresholds.cssr,
            weights.cssr,
        );
        let cdr = SubMetric::evaluate(
            ratio(samples.dropped as f64, answered),
            &thresholds.cdr,
            weights.cdr,
        );
        let mos_avg = SubMetric::evaluate(
            average(&samples.mos_samples),
            &thresholds.mos_avg,
            weights.mos_avg,
        );
        let mos_low_ratio = SubMetric::evaluate(
            fraction_below(&samples.mos_samples, self.config.low_mos_cutoff),
            &thresholds.mos_low_ratio,
            weights.mos_low_ratio,
        );
        let setup_time_avg = SubMetric::evaluate(
            average(&samples.setup_times),
            &thresholds.setup_time_avg,
            weights.setup_time_avg,
        );
        let setup_slow_ratio = SubMetric::evaluate(
            fraction_above(&samples.setup_times, self.config.slow_setup_ms),
            &thresholds.setup_slow_ratio,
            weights.setup_slow_ratio,
        );

        let result = weighted_score(&[
            cssr.entry(),
            cdr.entry(),
            mos_avg.entry(),
            mos_low_ratio.entry(),
            setup_time_avg.entry(),
            setup_slow_ratio.entry(),
        ]);
        #[cfg(feature = "logging")]
        log::trace!(
            "voice: score={:?} applied_weight={}",
            result.score,
            result.applied_weight
        );

        VoiceScore {
            result,
            normalized: None,
            cssr,
            cdr,
            mos_avg,
            mos_low_ratio,
            setup_time_avg,
            setup_slow_ratio,
            attempts: samples.attempts,
            completed: samples.completed,
            dropped: samples.dropped,
            setup_time_p90: percentile(&samples.setup_times, 0.9),
            failure_reasons: histogram(&samples.reasons),
        }
    }
}
