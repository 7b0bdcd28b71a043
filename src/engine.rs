//! QoeEngine - orchestrates evaluators, normalization and aggregation.
//!
//! The engine owns a validated configuration and is otherwise stateless:
//! [`QoeEngine::compute`] is a pure function of the snapshot it is given.

use crate::aggregate::{normalize, weighted_score, WeightedEntry};
use crate::config::{QoeConfig, DATA_SHARE_TOTAL, VOICE_WEIGHT_TOTAL};
use crate::error::Result;
use crate::evaluator::{
    BrowsingEvaluator, HttpEvaluator, LatencyEvaluator, SocialEvaluator, StreamingEvaluator,
    VoiceEvaluator,
};
use crate::report::{DataScore, OverallScore, QoeReport};
use crate::snapshot::MeasurementSnapshot;

/// Hierarchical QoE scoring engine.
#[derive(Debug, Clone)]
pub struct QoeEngine {
    config: QoeConfig,
    voice: VoiceEvaluator,
    browsing: BrowsingEvaluator,
    streaming: StreamingEvaluator,
    http: HttpEvaluator,
    social: SocialEvaluator,
    latency: LatencyEvaluator,
}

impl QoeEngine {
    /// Create an engine, validating the weight and threshold tables once.
    pub fn new(config: QoeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Create an engine over the default tables.
    pub fn with_defaults() -> Self {
        Self::build(QoeConfig::default())
    }

    fn build(config: QoeConfig) -> Self {
        Self {
            voice: VoiceEvaluator::new(config.voice.clone()),
            browsing: BrowsingEvaluator::new(config.data.browsing.clone()),
            streaming: StreamingEvaluator::new(config.data.streaming.clone()),
            http: HttpEvaluator::new(config.data.http.clone()),
            social: SocialEvaluator::new(config.data.social.clone()),
            latency: LatencyEvaluator::new(config.data.latency.clone()),
            config,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &QoeConfig {
        &self.config
    }

    /// Score a full snapshot.
    pub fn compute(&self, snapshot: &MeasurementSnapshot) -> QoeReport {
        let shares = &self.config.data.shares;
        let samples = &snapshot.data;

        let mut browsing = self.browsing.evaluate(&samples.browsing);
        browsing.normalized = normalize(&browsing.result, shares.browsing);

        let mut streaming = self.streaming.evaluate(&samples.streaming);
        streaming.normalized = normalize(&streaming.result, shares.streaming);

        let mut http = self.http.evaluate(&samples.http);
        http.normalized = normalize(&http.result, shares.http);

        let mut social = self.social.evaluate(&samples.social);
        social.normalized = normalize(&social.result, shares.social);

        let mut latency = self.latency.evaluate(&samples.latency);
        latency.normalized = normalize(&latency.result, shares.latency);

        let domains = [
            ("browsing", shares.browsing, browsing.normalized),
            ("streaming", shares.streaming, streaming.normalized),
            ("http", shares.http, http.normalized),
            ("social", shares.social, social.normalized),
            ("latency", shares.latency, latency.normalized),
        ];
        #[cfg(feature = "logging")]
        for (name, _, normalized) in &domains {
            if normalized.is_none() {
                log::debug!("{} excluded from data score: no samples", name);
            }
        }

        let entries: Vec<WeightedEntry> = domains
            .iter()
            .map(|(_, share, normalized)| WeightedEntry::new(*share, *normalized))
            .collect();
        let data_result = weighted_score(&entries);
        let data_normalized = normalize(&data_result, DATA_SHARE_TOTAL);

        let weights = &self.config.overall;
        let mut voice = self.voice.evaluate(&snapshot.voice);
        voice.normalized = if weights.normalize_voice {
            normalize(&voice.result, VOICE_WEIGHT_TOTAL)
        } else {
            voice.result.score
        };

        let overall = OverallScore::new(weighted_score(&[
            WeightedEntry::new(weights.voice, voice.normalized),
            WeightedEntry::new(weights.data, data_normalized),
        ]));
        #[cfg(feature = "logging")]
        log::debug!(
            "QoE overall={:?} grade={} (voice={:?}, data={:?}, applied_weight={})",
            overall.result.score,
            overall.grade,
            voice.normalized,
            data_normalized,
            overall.result.applied_weight
        );

        QoeReport {
            voice,
            data: DataScore {
                result: data_result,
                normalized: data_normalized,
                browsing,
                streaming,
                http,
                social,
                latency,
            },
            overall,
        }
    }
}

impl Default for QoeEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Score a snapshot with the default tables.
pub fn compute(snapshot: &MeasurementSnapshot) -> QoeReport {
    QoeEngine::with_defaults().compute(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverallWeights;
    use crate::snapshot::{HttpSamples, TransferSamples, VoiceSamples};
    use approx::assert_relative_eq;

    fn perfect_download() -> HttpSamples {
        HttpSamples {
            dl: TransferSamples {
                requests: 2,
                completed: 2,
                throughputs: vec![300_000.0, 300_000.0],
            },
            ul: TransferSamples::default(),
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let report = QoeEngine::with_defaults().compute(&MeasurementSnapshot::new());
        assert_eq!(report.overall.result.score, None);
        assert_eq!(report.overall.result.applied_weight, 0.0);
        assert_eq!(report.data.result.score, None);
        assert_eq!(report.voice.normalized, None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = QoeConfig::default();
        config.overall = OverallWeights {
            voice: 0.5,
            data: 0.6,
            normalize_voice: false,
        };
        assert!(QoeEngine::new(config).is_err());
    }

    #[test]
    fn test_partial_http_penalized() {
        let mut snapshot = MeasurementSnapshot::new();
        snapshot.data.http = perfect_download();

        let report = QoeEngine::with_defaults().compute(&snapshot);
        let http = &report.data.http;

        assert_eq!(http.result.score, Some(1.0));
        assert_relative_eq!(http.result.applied_weight, 0.20, epsilon = 1e-9);
        // 0.20 of 0.30 measured
        assert_relative_eq!(http.normalized.unwrap(), 2.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_data_normalized_by_share_coverage() {
        let mut snapshot = MeasurementSnapshot::new();
        snapshot.data.http = perfect_download();

        let report = QoeEngine::with_defaults().compute(&snapshot);

        // only http contributes: data score is http's normalized score
        assert_relative_eq!(report.data.result.score.unwrap(), 2.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(report.data.result.applied_weight, 0.30, epsilon = 1e-9);
        assert_relative_eq!(report.data.normalized.unwrap(), 0.2, epsilon = 1e-9);
        // voice absent: overall is the data entry alone
        assert_relative_eq!(report.overall.result.score.unwrap(), 0.2, epsilon = 1e-9);
        assert_relative_eq!(report.overall.result.applied_weight, 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_voice_not_renormalized_by_default() {
        let mut snapshot = MeasurementSnapshot::new();
        snapshot.voice = VoiceSamples {
            attempts: 4,
            setup_ok: 4,
            ..Default::default()
        };

        let report = QoeEngine::with_defaults().compute(&snapshot);
        assert_eq!(report.voice.result.score, Some(1.0));
        assert_eq!(report.voice.normalized, Some(1.0));
        assert_eq!(report.overall.result.score, Some(1.0));
    }

    #[test]
    fn test_voice_renormalized_when_enabled() {
        let mut config = QoeConfig::default();
        config.overall.normalize_voice = true;
        let engine = QoeEngine::new(config).unwrap();

        let mut snapshot = MeasurementSnapshot::new();
        snapshot.voice = VoiceSamples {
            attempts: 4,
            setup_ok: 4,
            ..Default::default()
        };

        let report = engine.compute(&snapshot);
        assert_relative_eq!(report.voice.normalized.unwrap(), 0.25);
        assert_relative_eq!(report.overall.result.score.unwrap(), 0.25);
    }

    #[test]
    fn test_free_compute_matches_engine() {
        let mut snapshot = MeasurementSnapshot::new();
        snapshot.data.http = perfect_download();
        assert_eq!(compute(&snapshot), QoeEngine::default().compute(&snapshot));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QoeEngine>();
    }

    #[cfg(feature = "logging")]
    #[test]
    fn test_logging_does_not_change_report() {
        let mut snapshot = MeasurementSnapshot::new();
        snapshot.data.http = perfect_download();
        let report = QoeEngine::with_defaults().compute(&snapshot);
        assert_relative_eq!(report.overall.result.score.unwrap(), 0.2, epsilon = 1e-9);
    }
}
