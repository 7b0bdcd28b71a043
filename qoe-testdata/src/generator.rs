// QoE Testdata - Core generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Snapshot generation.
//!
//! Sessions are replayed through a [`MetricsRecorder`], so generated
//! snapshots have exactly the shape a live producer would hand the engine.

use crate::scenario::{DataConditions, NetworkConditions, ScenarioProfile, Spread, VoiceConditions};
use qoe::{
    BrowseSample, MeasurementSnapshot, MetricsRecorder, SocialSample, StreamSample,
    TransferDirection,
};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

const SETUP_FAILURES: [&str; 3] = ["no_answer", "network_busy", "timeout"];
const DROP_REASONS: [&str; 2] = ["radio_link_failure", "handover_failure"];

/// Generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sessions simulated per service.
    pub sessions: usize,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sessions: 50,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of sessions per service.
    pub fn with_sessions(mut self, n: usize) -> Self {
        self.sessions = n;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generate a snapshot for a named profile.
pub fn generate_snapshot(config: &GeneratorConfig, profile: ScenarioProfile) -> MeasurementSnapshot {
    generate_with_conditions(config, &profile.conditions())
}

/// Generate a snapshot from explicit conditions.
pub fn generate_with_conditions(
    config: &GeneratorConfig,
    conditions: &NetworkConditions,
) -> MeasurementSnapshot {
    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut recorder = MetricsRecorder::new();

    for _ in 0..config.sessions {
        if let Some(ref voice) = conditions.voice {
            simulate_call(&mut recorder, voice, &mut rng);
        }
        if let Some(ref data) = conditions.data {
            simulate_data(&mut recorder, data, &mut rng);
        }
    }

    recorder.snapshot()
}

fn simulate_call(recorder: &mut MetricsRecorder, voice: &VoiceConditions, rng: &mut StdRng) {
    recorder.record_call_attempt();
    if !chance(rng, voice.setup_success) {
        recorder.record_call_failure(pick(rng, &SETUP_FAILURES));
        return;
    }

    recorder.record_call_setup(positive(rng, voice.setup_ms));
    recorder.record_voice_mos(sample(rng, voice.mos).clamp(1.0, 5.0));
    if chance(rng, voice.drop_probability) {
        recorder.record_call_dropped(pick(rng, &DROP_REASONS));
    } else {
        recorder.record_call_completed();
    }
}

fn simulate_data(recorder: &mut MetricsRecorder, data: &DataConditions, rng: &mut StdRng) {
    let browse = chance(rng, data.browse_success).then(|| BrowseSample {
        duration_ms: positive(rng, data.browse_duration_ms),
        dns_ms: Some(positive(rng, data.dns_ms)),
        throughput_kbps: None,
    });
    recorder.record_browse(browse);

    let stream = chance(rng, data.stream_success).then(|| {
        let throughput = positive(rng, data.stream_throughput);
        StreamSample {
            mos: sample(rng, data.stream_mos).clamp(1.0, 5.0),
            setup_ms: positive(rng, data.stream_setup_ms),
            throughput_kbps: Some(throughput),
            buffering_count: if throughput < 3_000.0 {
                rng.gen_range(1..4)
            } else {
                0
            },
            resolution: Some(resolution_for(throughput).to_string()),
        }
    });
    recorder.record_stream(stream);

    let download = chance(rng, data.transfer_success).then(|| positive(rng, data.download));
    recorder.record_transfer(TransferDirection::Download, download);
    let upload = chance(rng, data.transfer_success).then(|| positive(rng, data.upload));
    recorder.record_transfer(TransferDirection::Upload, upload);

    let social = chance(rng, data.social_success).then(|| SocialSample {
        duration_ms: positive(rng, data.social_duration_ms),
        throughput_kbps: None,
    });
    recorder.record_social(social);

    let latency = chance(rng, data.latency_success)
        .then(|| sample(rng, data.latency_score).clamp(0.0, 100.0));
    recorder.record_latency(latency.map(round_tenth));
}

fn resolution_for(throughput_kbps: f64) -> &'static str {
    match throughput_kbps {
        t if t >= 20_000.0 => "2160p",
        t if t >= 8_000.0 => "1080p",
        t if t >= 3_000.0 => "720p",
        _ => "480p",
    }
}

fn chance(rng: &mut StdRng, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

fn pick(rng: &mut StdRng, options: &[&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or("unknown")
}

fn sample(rng: &mut StdRng, spread: Spread) -> f64 {
    Normal::new(spread.mean, spread.std)
        .map(|dist| dist.sample(rng))
        .unwrap_or(spread.mean)
}

/// Strictly positive sample, rounded to one decimal like a reported measurement.
fn positive(rng: &mut StdRng, spread: Spread) -> f64 {
    round_tenth(sample(rng, spread).max(1.0))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
