//! Weight and threshold tables.
//!
//! Tables are static configuration: they are validated once, when a
//! [`crate::QoeEngine`] is built or a config is loaded from JSON, and never
//! re-checked per call.
//!
//! ## Weight levels
//!
//! | Level | Declared total |
//! |-------|----------------|
//! | overall (voice + data) | 1.0 |
//! | voice sub-metrics | 1.0 |
//! | data shares (per domain) | 1.0 |
//! | a data domain's sub-metrics | that domain's share |
//!
//! Units: durations in milliseconds, throughputs in kbit/s, quality on the
//! 1–5 MOS scale, interactivity on 0–100.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tolerance when checking that a level's weights sum to its total.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Declared total of the voice sub-metric weights.
pub const VOICE_WEIGHT_TOTAL: f64 = 1.0;

/// Declared total of the data domain shares.
pub const DATA_SHARE_TOTAL: f64 = 1.0;

/// Declared total of the overall voice/data split.
pub const OVERALL_WEIGHT_TOTAL: f64 = 1.0;

/// Master configuration for QoE scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QoeConfig {
    /// Voice vs. data split at the top level.
    pub overall: OverallWeights,
    /// Telephony weights, thresholds and cutoffs.
    pub voice: VoiceConfig,
    /// Data domain shares and per-domain tables.
    pub data: DataConfig,
}

impl QoeConfig {
    /// Parse and validate a config from JSON. Omitted sections keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: QoeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every weight level and threshold.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_weights(
            "overall",
            &[("voice", self.overall.voice), ("data", self.overall.data)],
            OVERALL_WEIGHT_TOTAL,
        )?;

        self.voice.validate()?;
        self.data.validate()?;

        #[cfg(feature = "logging")]
        log::debug!("QoE configuration validated");
        Ok(())
    }
}

/// Threshold definition: where a raw value scores 1.0 and 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    /// Raw value that maps to 1.0.
    pub good: f64,
    /// Raw value that maps to 0.0.
    pub bad: f64,
    pub higher_is_better: bool,
}

impl Threshold {
    /// Throughput-like metric: `good > bad`.
    pub const fn higher(good: f64, bad: f64) -> Self {
        Self {
            good,
            bad,
            higher_is_better: true,
        }
    }

    /// Time- or failure-like metric: `good < bad`.
    pub const fn lower(good: f64, bad: f64) -> Self {
        Self {
            good,
            bad,
            higher_is_better: false,
        }
    }

    /// Score a statistic, propagating `None`.
    pub fn score(&self, value: Option<f64>) -> Option<f64> {
        value.map(|v| crate::math::score_linear(v, self.good, self.bad, self.higher_is_better))
    }

    fn validate(&self, metric: &str) -> std::result::Result<(), ConfigError> {
        if !self.good.is_finite() || !self.bad.is_finite() {
            return Err(ConfigError::NonFinite {
                field: format!("{metric} threshold"),
            });
        }
        if self.good == self.bad {
            return Err(ConfigError::DegenerateThreshold {
                metric: metric.to_string(),
                value: self.good,
            });
        }
        if (self.good > self.bad) != self.higher_is_better {
            return Err(ConfigError::InconsistentDirection {
                metric: metric.to_string(),
            });
        }
        Ok(())
    }
}

/// A set of named weights belonging to one level.
pub trait WeightTable {
    /// `(sub-metric, weight)` pairs in a fixed order.
    fn entries(&self) -> Vec<(&'static str, f64)>;

    /// Sum of all weights.
    fn total(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

/// A set of named thresholds belonging to one domain.
pub trait ThresholdTable {
    fn entries(&self) -> Vec<(&'static str, &Threshold)>;
}

fn check_weights(
    level: &str,
    entries: &[(&'static str, f64)],
    expected: f64,
) -> std::result::Result<(), ConfigError> {
    for (metric, weight) in entries {
        if !weight.is_finite() {
            return Err(ConfigError::NonFinite {
                field: format!("{level}.{metric} weight"),
            });
        }
        if *weight < 0.0 {
            return Err(ConfigError::NegativeWeight {
                metric: format!("{level}.{metric}"),
                weight: *weight,
            });
        }
    }

    let actual: f64 = entries.iter().map(|(_, w)| w).sum();
    if (actual - expected).abs() > WEIGHT_EPSILON {
        return Err(ConfigError::WeightSum {
            level: level.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_table(
    level: &str,
    weights: &impl WeightTable,
    expected: f64,
    thresholds: &impl ThresholdTable,
) -> std::result::Result<(), ConfigError> {
    check_weights(level, &weights.entries(), expected)?;
    for (metric, threshold) in thresholds.entries() {
        threshold.validate(&format!("{level}.{metric}"))?;
    }
    Ok(())
}

fn check_cutoff(field: &str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: field.to_string(),
        })
    }
}

// ============================================================================
// Overall
// ============================================================================

/// Top-level split between voice and data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverallWeights {
    pub voice: f64,
    pub data: f64,
    /// Rescale voice by its own coverage before the top-level combination,
    /// as is done for data. Off by default: voice enters as its plain
    /// weighted score.
    pub normalize_voice: bool,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            voice: 0.4,
            data: 0.6,
            normalize_voice: false,
        }
    }
}

// ============================================================================
// Voice
// ============================================================================

/// Telephony scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceConfig {
    pub weights: VoiceWeights,
    pub thresholds: VoiceThresholds,
    /// MOS samples strictly below this count as low quality.
    pub low_mos_cutoff: f64,
    /// Setup times strictly above this (ms) count as slow.
    pub slow_setup_ms: f64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            weights: VoiceWeights::default(),
            thresholds: VoiceThresholds::default(),
            low_mos_cutoff: 1.6,
            slow_setup_ms: 15_000.0,
        }
    }
}

impl VoiceConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_table("voice", &self.weights, VOICE_WEIGHT_TOTAL, &self.thresholds)?;
        check_cutoff("voice.lowMosCutoff", self.low_mos_cutoff)?;
        check_cutoff("voice.slowSetupMs", self.slow_setup_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceWeights {
    pub cssr: f64,
    pub cdr: f64,
    pub mos_avg: f64,
    pub mos_low_ratio: f64,
    pub setup_time_avg: f64,
    pub setup_slow_ratio: f64,
}

impl Default for VoiceWeights {
    fn default() -> Self {
        Self {
            cssr: 0.25,
            cdr: 0.25,
            mos_avg: 0.175,
            mos_low_ratio: 0.075,
            setup_time_avg: 0.125,
            setup_slow_ratio: 0.125,
        }
    }
}

impl WeightTable for VoiceWeights {
    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("cssr", self.cssr),
            ("cdr", self.cdr),
            ("mosAvg", self.mos_avg),
            ("mosLowRatio", self.mos_low_ratio),
            ("setupTimeAvg", self.setup_time_avg),
            ("setupSlowRatio", self.setup_slow_ratio),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceThresholds {
    pub cssr: Threshold,
    pub cdr: Threshold,
    pub mos_avg: Threshold,
    pub mos_low_ratio: Threshold,
    pub setup_time_avg: Threshold,
    pub setup_slow_ratio: Threshold,
}

impl Default for VoiceThresholds {
    fn default() -> Self {
        Self {
            cssr: Threshold::higher(1.0, 0.85),
            cdr: Threshold::lower(0.0, 0.10),
            mos_avg: Threshold::higher(4.3, 2.0),
            mos_low_ratio: Threshold::lower(0.0, 0.10),
            setup_time_avg: Threshold::lower(4_000.0, 12_000.0),
            setup_slow_ratio: Threshold::lower(0.0, 0.05),
        }
    }
}

impl ThresholdTable for VoiceThresholds {
    fn entries(&self) -> Vec<(&'static str, &Threshold)> {
        vec![
            ("cssr", &self.cssr),
            ("cdr", &self.cdr),
            ("mosAvg", &self.mos_avg),
            ("mosLowRatio", &self.mos_low_ratio),
            ("setupTimeAvg", &self.setup_time_avg),
            ("setupSlowRatio", &self.setup_slow_ratio),
        ]
    }
}

// ============================================================================
// Data
// ============================================================================

/// Data scoring configuration: domain shares plus per-domain tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataConfig {
    pub shares: DataShares,
    pub browsing: BrowsingConfig,
    pub streaming: StreamingConfig,
    pub http: HttpConfig,
    pub social: SocialConfig,
    pub latency: LatencyConfig,
}

impl DataConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        check_weights("data", &self.shares.entries(), DATA_SHARE_TOTAL)?;

        let browsing = &self.browsing;
        check_table("browsing", &browsing.weights, self.shares.browsing, &browsing.thresholds)?;

        let streaming = &self.streaming;
        check_table("streaming", &streaming.weights, self.shares.streaming, &streaming.thresholds)?;
        check_cutoff("streaming.lowMosCutoff", streaming.low_mos_cutoff)?;
        check_cutoff("streaming.slowSetupMs", streaming.slow_setup_ms)?;

        check_table("http", &self.http.weights, self.shares.http, &self.http.thresholds)?;

        let social = &self.social;
        check_table("social", &social.weights, self.shares.social, &social.thresholds)?;
        check_cutoff("social.slowMs", social.slow_ms)?;

        let latency = &self.latency;
        check_table("latency", &latency.weights, self.shares.latency, &latency.thresholds)?;
        check_cutoff("latency.usableCutoff", latency.usable_cutoff)
    }
}

/// Each data domain's share of the data score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataShares {
    pub browsing: f64,
    pub streaming: f64,
    pub http: f64,
    pub social: f64,
    pub latency: f64,
}

impl Default for DataShares {
    fn default() -> Self {
        Self {
            browsing: 0.25,
            streaming: 0.20,
            http: 0.30,
            social: 0.15,
            latency: 0.10,
        }
    }
}

impl WeightTable for DataShares {
    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("browsing", self.browsing),
            ("streaming", self.streaming),
            ("http", self.http),
            ("social", self.social),
            ("latency", self.latency),
        ]
    }
}

// ---- Browsing --------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowsingConfig {
    pub weights: BrowsingWeights,
    pub thresholds: BrowsingThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowsingWeights {
    pub success_ratio: f64,
    pub duration_avg: f64,
}

impl Default for BrowsingWeights {
    fn default() -> Self {
        Self {
            success_ratio: 0.125,
            duration_avg: 0.125,
        }
    }
}

impl WeightTable for BrowsingWeights {
    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("successRatio", self.success_ratio),
            ("durationAvg", self.duration_avg),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowsingThresholds {
    pub success_ratio: Threshold,
    pub duration_avg: Threshold,
}

impl Default for BrowsingThresholds {
    fn default() -> Self {
        Self {
            success_ratio: Threshold::higher(1.0, 0.8),
            duration_avg: Threshold::lower(1_000.0, 6_000.0),
        }
    }
}

impl ThresholdTable for BrowsingThresholds {
    fn entries(&self) -> Vec<(&'static str, &Threshold)> {
        vec![
            ("successRatio", &self.success_ratio),
            ("durationAvg", &self.duration_avg),
        ]
    }
}

// ---- Streaming -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamingConfig {
    pub weights: StreamingWeights,
    pub thresholds: StreamingThresholds,
    /// Quality samples strictly below this count as low quality.
    pub low_mos_cutoff: f64,
    /// Time to first frame strictly above this (ms) counts as slow.
    pub slow_setup_ms: f64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            weights: StreamingWeights::default(),
            thresholds: StreamingThresholds::default(),
            low_mos_cutoff: 3.0,
            slow_setup_ms: 5_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamingWeights {
    pub success_ratio: f64,
    pub mos_avg: f64,
    pub mos_low_ratio: f64,
    pub setup_time_avg: f64,
    pub setup_slow_ratio: f64,
}

impl Default for StreamingWeights {
    fn default() -> Self {
        Self {
            success_ratio: 0.06,
            mos_avg: 0.04,
            mos_low_ratio: 0.02,
            setup_time_avg: 0.04,
            setup_slow_ratio: 0.04,
        }
    }
}

impl WeightTable for StreamingWeights {
    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("successRatio", self.success_ratio),
            ("mosAvg", self.mos_avg),
            ("mosLowRatio", self.mos_low_ratio),
            ("setupTimeAvg", self.setup_time_avg),
            ("setupSlowRatio", self.setup_slow_ratio),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamingThresholds {
    pub success_ratio: Threshold,
    pub mos_avg: Threshold,
    pub mos_low_ratio: Threshold,
    pub setup_time_avg: Threshold,
    pub setup_slow_ratio: Threshold,
}

impl Default for StreamingThresholds {
    fn default() -> Self {
        Self {
            success_ratio: Threshold::higher(1.0, 0.8),
            mos_avg: Threshold::higher(4.5, 3.0),
            mos_low_ratio: Threshold::lower(0.0, 0.2),
            setup_time_avg: Threshold::lower(2_000.0, 10_000.0),
            setup_slow_ratio: Threshold::lower(0.0, 0.1),
        }
    }
}

impl ThresholdTable for StreamingThresholds {
    fn entries(&self) -> Vec<(&'static str, &Threshold)> {
        vec![
            ("successRatio", &self.success_ratio),
            ("mosAvg", &self.mos_avg),
            ("mosLowRatio", &self.mos_low_ratio),
            ("setupTimeAvg", &self.setup_time_avg),
            ("setupSlowRatio", &self.setup_slow_ratio),
        ]
    }
}

// ---- HTTP transfer ---------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub weights: HttpWeights,
    pub thresholds: HttpThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpWeights {
    pub success_ratio: f64,
    pub dl_avg: f64,
    pub dl_p10: f64,
    pub dl_p90: f64,
    pub ul_avg: f64,
    pub ul_p10: f64,
    pub ul_p90: f64,
}

impl Default for HttpWeights {
    fn default() -> Self {
        Self {
            success_ratio: 0.10,
            dl_avg: 0.04,
            dl_p10: 0.03,
            dl_p90: 0.03,
            ul_avg: 0.04,
            ul_p10: 0.03,
            ul_p90: 0.03,
        }
    }
}

impl WeightTable for HttpWeights {
    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("successRatio", self.success_ratio),
            ("dlAvg", self.dl_avg),
            ("dlP10", self.dl_p10),
            ("dlP90", self.dl_p90),
            ("ulAvg", self.ul_avg),
            ("ulP10", self.ul_p10),
            ("ulP90", self.ul_p90),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpThresholds {
    pub success_ratio: Threshold,
    pub dl_avg: Threshold,
    pub dl_p10: Threshold,
    pub dl_p90: Threshold,
    pub ul_avg: Threshold,
    pub ul_p10: Threshold,
    pub ul_p90: Threshold,
}

impl Default for HttpThresholds {
    fn default() -> Self {
        Self {
            success_ratio: Threshold::higher(1.0, 0.8),
            dl_avg: Threshold::higher(100_000.0, 1_000.0),
            dl_p10: Threshold::higher(40_000.0, 500.0),
            dl_p90: Threshold::higher(240_000.0, 5_000.0),
            ul_avg: Threshold::higher(50_000.0, 500.0),
            ul_p10: Threshold::higher(20_000.0, 250.0),
            ul_p90: Threshold::higher(100_000.0, 2_000.0),
        }
    }
}

impl ThresholdTable for HttpThresholds {
    fn entries(&self) -> Vec<(&'static str, &Threshold)> {
        vec![
            ("successRatio", &self.success_ratio),
            ("dlAvg", &self.dl_avg),
            ("dlP10", &self.dl_p10),
            ("dlP90", &self.dl_p90),
            ("ulAvg", &self.ul_avg),
            ("ulP10", &self.ul_p10),
            ("ulP90", &self.ul_p90),
        ]
    }
}

// ---- Social ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialConfig {
    pub weights: SocialWeights,
    pub thresholds: SocialThresholds,
    /// Interactions strictly slower than this (ms) count as slow.
    pub slow_ms: f64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            weights: SocialWeights::default(),
            thresholds: SocialThresholds::default(),
            slow_ms: 5_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialWeights {
    pub success_ratio: f64,
    pub duration_avg: f64,
    pub slow_ratio: f64,
}

impl Default for SocialWeights {
    fn default() -> Self {
        Self {
            success_ratio: 0.06,
            duration_avg: 0.06,
            slow_ratio: 0.03,
        }
    }
}

impl WeightTable for SocialWeights {
    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("successRatio", self.success_ratio),
            ("durationAvg", self.duration_avg),
            ("slowRatio", self.slow_ratio),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialThresholds {
    pub success_ratio: Threshold,
    pub duration_avg: Threshold,
    pub slow_ratio: Threshold,
}

impl Default for SocialThresholds {
    fn default() -> Self {
        Self {
            success_ratio: Threshold::higher(1.0, 0.75),
            duration_avg: Threshold::lower(1_000.0, 15_000.0),
            slow_ratio: Threshold::lower(0.0, 0.1),
        }
    }
}

impl ThresholdTable for SocialThresholds {
    fn entries(&self) -> Vec<(&'static str, &Threshold)> {
        vec![
            ("successRatio", &self.success_ratio),
            ("durationAvg", &self.duration_avg),
            ("slowRatio", &self.slow_ratio),
        ]
    }
}

// ---- Latency ---------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatencyConfig {
    pub weights: LatencyWeights,
    pub thresholds: LatencyThresholds,
    /// Interactivity scores strictly above this count as usable.
    pub usable_cutoff: f64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            weights: LatencyWeights::default(),
            thresholds: LatencyThresholds::default(),
            usable_cutoff: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatencyWeights {
    pub success_ratio: f64,
    pub score_avg: f64,
}

impl Default for LatencyWeights {
    fn default() -> Self {
        Self {
            success_ratio: 0.05,
            score_avg: 0.05,
        }
    }
}

impl WeightTable for LatencyWeights {
    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("successRatio", self.success_ratio),
            ("scoreAvg", self.score_avg),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatencyThresholds {
    pub success_ratio: Threshold,
    pub score_avg: Threshold,
}

impl Default for LatencyThresholds {
    fn default() -> Self {
        Self {
            success_ratio: Threshold::higher(1.0, 0.8),
            score_avg: Threshold::higher(90.0, 25.0),
        }
    }
}

impl ThresholdTable for LatencyThresholds {
    fn entries(&self) -> Vec<(&'static str, &Threshold)> {
        vec![
            ("successRatio", &self.success_ratio),
            ("scoreAvg", &self.score_avg),
        ]
    }
}
