//! Producer-side measurement accumulator.
//!
//! A [`MetricsRecorder`] is owned by whatever runs the measurements and is
//! mutated one event at a time. Scoring always works on an owned
//! [`MeasurementSnapshot`] taken with [`MetricsRecorder::snapshot`], so the
//! recorder can keep accumulating while a report is computed.

use crate::snapshot::{MeasurementSnapshot, TransferSamples};

/// Direction of an HTTP transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferDirection {
    Download,
    Upload,
}

/// One completed page load.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrowseSample {
    pub duration_ms: f64,
    pub dns_ms: Option<f64>,
    pub throughput_kbps: Option<f64>,
}

/// One completed video session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamSample {
    /// Video quality score (1–5).
    pub mos: f64,
    /// Time to first frame.
    pub setup_ms: f64,
    pub throughput_kbps: Option<f64>,
    pub buffering_count: u32,
    pub resolution: Option<String>,
}

/// One completed social media action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SocialSample {
    pub duration_ms: f64,
    pub throughput_kbps: Option<f64>,
}

/// Mutable accumulator of measurement events.
///
/// Data methods take `None` for a failed attempt: the request is counted
/// without a completion or samples.
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder {
    current: MeasurementSnapshot,
}

impl MetricsRecorder {
    /// Create new recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call setup attempt
    pub fn record_call_attempt(&mut self) {
        self.current.voice.attempts += 1;
    }

    /// Record an established call and its setup time
    pub fn record_call_setup(&mut self, setup_ms: f64) {
        let voice = &mut self.current.voice;
        voice.setup_ok += 1;
        voice.setup_times.push(setup_ms);
    }

    /// Record a setup failure
    pub fn record_call_failure(&mut self, reason: impl Into<String>) {
        self.current.voice.reasons.push(reason.into());
    }

    /// Record a call that ended normally
    pub fn record_call_completed(&mut self) {
        self.current.voice.completed += 1;
    }

    /// Record a call dropped after being established
    pub fn record_call_dropped(&mut self, reason: impl Into<String>) {
        let voice = &mut self.current.voice;
        voice.dropped += 1;
        voice.reasons.push(reason.into());
    }

    /// Record a voice quality sample
    pub fn record_voice_mos(&mut self, mos: f64) {
        self.current.voice.mos_samples.push(mos);
    }

    /// Record an HTTP transfer
    pub fn record_transfer(&mut self, direction: TransferDirection, throughput_kbps: Option<f64>) {
        let http = &mut self.current.data.http;
        let transfer: &mut TransferSamples = match direction {
            TransferDirection::Download => &mut http.dl,
            TransferDirection::Upload => &mut http.ul,
        };
        transfer.requests += 1;
        if let Some(throughput) = throughput_kbps {
            transfer.completed += 1;
            transfer.throughputs.push(throughput);
        }
    }

    /// Record a page load
    pub fn record_browse(&mut self, sample: Option<BrowseSample>) {
        let browsing = &mut self.current.data.browsing;
        browsing.requests += 1;
        let Some(sample) = sample else {
            return;
        };
        browsing.completed += 1;
        browsing.durations.push(sample.duration_ms);
        browsing.dns_resolution_times.extend(sample.dns_ms);
        browsing.throughputs.extend(sample.throughput_kbps);
    }

    /// Record a video session
    pub fn record_stream(&mut self, sample: Option<StreamSample>) {
        let streaming = &mut self.current.data.streaming;
        streaming.requests += 1;
        let Some(sample) = sample else {
            return;
        };
        streaming.completed += 1;
        streaming.mos_samples.push(sample.mos);
        streaming.setup_times.push(sample.setup_ms);
        streaming.throughputs.extend(sample.throughput_kbps);
        streaming.buffering_counts.push(f64::from(sample.buffering_count));
        streaming.resolutions.extend(sample.resolution);
    }

    /// Record a social media action
    pub fn record_social(&mut self, sample: Option<SocialSample>) {
        let social = &mut self.current.data.social;
        social.requests += 1;
        let Some(sample) = sample else {
            return;
        };
        social.completed += 1;
        social.durations.push(sample.duration_ms);
        social.throughputs.extend(sample.throughput_kbps);
    }

    /// Record an interactivity test result (0–100)
    pub fn record_latency(&mut self, score: Option<f64>) {
        let latency = &mut self.current.data.latency;
        latency.requests += 1;
        if let Some(score) = score {
            latency.completed += 1;
            latency.scores.push(score);
        }
    }

    /// Owned copy of everything recorded so far
    pub fn snapshot(&self) -> MeasurementSnapshot {
        self.current.clone()
    }

    /// Discard all recorded events
    pub fn reset(&mut self) {
        #[cfg(feature = "logging")]
        log::trace!("recorder reset");
        self.current = MeasurementSnapshot::default();
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
