//! Video streaming evaluator.

use super::{histogram, SubMetric};
use crate::aggregate::{weighted_score, ScoreResult};
use crate::config::StreamingConfig;
use crate::math::{average, fraction_above, fraction_below, ratio};
use crate::snapshot::StreamingSamples;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub normalized: Option<f64>,
    pub success_ratio: SubMetric,
    /// Average video quality.
    pub mos_avg: SubMetric,
    pub mos_low_ratio: SubMetric,
    /// Average time to first frame.
    pub setup_time_avg: SubMetric,
    pub setup_slow_ratio: SubMetric,
    pub throughput_avg: Option<f64>,
    pub buffering_avg: Option<f64>,
    pub resolutions: BTreeMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct StreamingEvaluator {
    config: StreamingConfig,
}

impl StreamingEvaluator {
    pub fn new(config: StreamingConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, samples: &StreamingSamples) -> StreamingScore {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;

        let success_ratio = SubMetric::evaluate(
            ratio(samples.completed as f64, samples.requests as f64),
            &thresholds.success_ratio,
            weights.success_ratio,
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
            success_ratio.entry(),
            mos_avg.entry(),
            mos_low_ratio.entry(),
            setup_time_avg.entry(),
            setup_slow_ratio.entry(),
        ]);
        #[cfg(feature = "logging")]
        log::trace!(
            "streaming: score={:?} applied_weight={}",
            result.score,
            result.applied_weight
        );

        StreamingScore {
            result,
            normalized: None,
            success_ratio,
            mos_avg,
            mos_low_ratio,
            setup_time_avg,
            setup_slow_ratio,
            throughput_avg: average(&samples.throughputs),
            buffering_avg: average(&samples.buffering_counts),
            resolutions: histogram(&samples.resolutions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples() -> StreamingSamples {
        StreamingSamples {
            requests: 5,
            completed: 5,
            mos_samples: vec![4.5, 4.0, 2.5, 4.6, 4.9],
            setup_times: vec![1_500.0, 6_000.0],
            throughputs: vec![8_000.0],
            buffering_counts: vec![0.0, 2.0],
            resolutions: vec!["1080p".to_string(), "720p".to_string(), "1080p".to_string()],
        }
    }

    #[test]
    fn test_streaming_statistics() {
        let evaluator = StreamingEvaluator::new(StreamingConfig::default());
        let score = evaluator.evaluate(&samples());

        assert_relative_eq!(score.mos_avg.value.unwrap(), 4.1, epsilon = 1e-9);
        assert_relative_eq!(score.mos_low_ratio.value.unwrap(), 0.2);
        assert_relative_eq!(score.setup_slow_ratio.value.unwrap(), 0.5);
        assert_relative_eq!(score.result.applied_weight, 0.20, epsilon = 1e-9);
    }

    #[test]
    fn test_streaming_diagnostics() {
        let evaluator = StreamingEvaluator::new(StreamingConfig::default());
        let score = evaluator.evaluate(&samples());

        assert_eq!(score.buffering_avg, Some(1.0));
        assert_eq!(score.throughput_avg, Some(8_000.0));
        assert_eq!(score.resolutions.get("1080p"), Some(&2));
    }

    #[test]
    fn test_quality_only() {
        let evaluator = StreamingEvaluator::new(StreamingConfig::default());
        let samples = StreamingSamples {
            mos_samples: vec![4.5],
            ..Default::default()
        };
        let score = evaluator.evaluate(&samples);

        assert_eq!(score.result.score, Some(1.0));
        assert_relative_eq!(score.result.applied_weight, 0.06, epsilon = 1e-9);
        assert_eq!(score.success_ratio.score, None);
    }
}
