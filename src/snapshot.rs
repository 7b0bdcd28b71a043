//! Input snapshot consumed by the scoring engine.
//!
//! One fully enumerated struct per measurement domain. Producers own a
//! mutable accumulator (see [`crate::recorder`]) and hand the engine an
//! immutable copy; the engine only reads it.
//!
//! Field names serialize as camelCase and every field defaults to empty, so a
//! producer may omit any domain it has not measured yet.

use serde::{Deserialize, Serialize};

/// Full measurement snapshot: voice plus all data domains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MeasurementSnapshot {
    pub voice: VoiceSamples,
    pub data: DataSamples,
}

impl MeasurementSnapshot {
    /// Empty snapshot (nothing measured yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// True when no domain recorded anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Voice call counters and samples. Setup times are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceSamples {
    /// Call setup attempts.
    pub attempts: u64,
    /// Attempts that reached an established call.
    pub setup_ok: u64,
    /// Calls that ended normally.
    pub completed: u64,
    /// Calls dropped after being established.
    pub dropped: u64,
    pub setup_times: Vec<f64>,
    /// Mean opinion score samples (1–5).
    pub mos_samples: Vec<f64>,
    /// Failure and drop reasons, one entry per event.
    pub reasons: Vec<String>,
}

/// Data domain sample sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataSamples {
    pub browsing: BrowsingSamples,
    pub streaming: StreamingSamples,
    pub http: HttpSamples,
    pub social: SocialSamples,
    pub latency: LatencySamples,
}

/// Web page loads. Durations in milliseconds, throughputs in kbit/s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowsingSamples {
    pub requests: u64,
    pub completed: u64,
    pub durations: Vec<f64>,
    pub dns_resolution_times: Vec<f64>,
    pub throughputs: Vec<f64>,
}

/// Video streaming sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamingSamples {
    pub requests: u64,
    pub completed: u64,
    /// Video quality samples (1–5).
    pub mos_samples: Vec<f64>,
    /// Time to first frame in milliseconds.
    pub setup_times: Vec<f64>,
    pub throughputs: Vec<f64>,
    pub buffering_counts: Vec<f64>,
    /// Rendered resolution labels, e.g. "1080p".
    pub resolutions: Vec<String>,
}

/// HTTP file transfers in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpSamples {
    pub dl: TransferSamples,
    pub ul: TransferSamples,
}

/// One transfer direction. Throughputs in kbit/s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferSamples {
    pub requests: u64,
    pub completed: u64,
    pub throughputs: Vec<f64>,
}

/// Social media API interactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialSamples {
    pub requests: u64,
    pub completed: u64,
    pub durations: Vec<f64>,
    pub throughputs: Vec<f64>,
}

/// Interactivity probes. Scores are on a 0–100 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatencySamples {
    pub requests: u64,
    pub completed: u64,
    pub scores: Vec<f64>,
}
