//! Per-domain metric evaluators.
//!
//! Each evaluator derives domain statistics from its sample set, scores each
//! statistic against its threshold, and aggregates the sub-scores with the
//! domain's weight table. A statistic without samples is carried as `None`
//! and left out of the aggregate.
//!
//! | Evaluator | Sub-metrics |
//! |-----------|-------------|
//! | [`VoiceEvaluator`] | CSSR, CDR, MOS avg, low-MOS ratio, setup time avg, slow-setup ratio |
//! | [`HttpEvaluator`] | success ratio, DL/UL avg, p10, p90 throughput |
//! | [`BrowsingEvaluator`] | success ratio, duration avg |
//! | [`StreamingEvaluator`] | success ratio, quality avg, low-quality ratio, setup avg, slow-setup ratio |
//! | [`SocialEvaluator`] | success ratio, duration avg, slow ratio |
//! | [`LatencyEvaluator`] | usable ratio, interactivity avg |

mod browsing;
mod http;
mod latency;
mod social;
mod streaming;
mod voice;

pub use browsing::{BrowsingEvaluator, BrowsingScore};
pub use http::{HttpEvaluator, HttpScore, TransferDiagnostics};
pub use latency::{LatencyEvaluator, LatencyScore};
pub use social::{SocialEvaluator, SocialScore};
pub use streaming::{StreamingEvaluator, StreamingScore};
pub use voice::{VoiceEvaluator, VoiceScore};

use crate::aggregate::WeightedEntry;
use crate::config::Threshold;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scored sub-metric: the raw statistic, its score and its weight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMetric {
    /// Raw statistic (ratio, mean, percentile). `None` without samples.
    pub value: Option<f64>,
    /// Threshold score in `[0, 1]`.
    pub score: Option<f64>,
    pub weight: f64,
}

impl SubMetric {
    /// Score `value` against `threshold`.
    pub fn evaluate(value: Option<f64>, threshold: &Threshold, weight: f64) -> Self {
        Self {
            value,
            score: threshold.score(value),
            weight,
        }
    }

    /// Entry for the weighted aggregator.
    pub fn entry(&self) -> WeightedEntry {
        WeightedEntry::new(self.weight, self.score)
    }
}

/// Occurrence count per label, ordered by label.
pub(crate) fn histogram(labels: &[String]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}
