//! # QoE - Hierarchical Quality of Experience scoring
//!
//! Turns raw network measurements into a single 0–1 quality score for a
//! mobile subscriber, following a weighted scoring tree in the spirit of
//! ETSI TR 103 559.
//!
//! ## Key Features
//!
//! - **Two-threshold scoring**: each statistic maps linearly between a "bad"
//!   and a "good" bound
//! - **Coverage-aware aggregation**: missing metrics drop out of the mean, and
//!   partially measured domains are penalized by their share coverage
//! - **Deterministic reports**: identical snapshots give identical JSON
//! - **Validated tables**: every weight level and threshold is checked once
//!
//! ## Quick Start
//!
//! ```rust
//! use qoe::{MetricsRecorder, QoeEngine, TransferDirection};
//!
//! let mut recorder = MetricsRecorder::new();
//! recorder.record_call_attempt();
//! recorder.record_call_setup(3_500.0);
//! recorder.record_voice_mos(4.4);
//! recorder.record_call_completed();
//! recorder.record_transfer(TransferDirection::Download, Some(120_000.0));
//!
//! let engine = QoeEngine::with_defaults();
//! let report = engine.compute(&recorder.snapshot());
//!
//! assert!(report.overall.result.score.is_some());
//! println!("{}", report.to_json().unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`math`]: Statistics and linear threshold scoring
//! - [`aggregate`]: Weighted score and coverage normalization
//! - [`config`]: Weight and threshold tables
//! - [`evaluator`]: Per-domain evaluators
//! - [`engine`]: Voice/data/overall composition
//! - [`snapshot`]: Input measurement snapshot
//! - [`recorder`]: Mutable accumulator producing snapshots
//! - [`report`]: Output score tree

// Modules
pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod math;
pub mod recorder;
pub mod report;
pub mod snapshot;

// Re-exports for convenient access
pub use aggregate::{normalize, weighted_score, ScoreResult, WeightedEntry};
pub use config::{
    DataConfig, OverallWeights, QoeConfig, Threshold, VoiceConfig, DATA_SHARE_TOTAL,
    OVERALL_WEIGHT_TOTAL, VOICE_WEIGHT_TOTAL, WEIGHT_EPSILON,
};
pub use engine::{compute, QoeEngine};
pub use error::{ConfigError, QoeError, Result};
pub use evaluator::{
    BrowsingScore, HttpScore, LatencyScore, SocialScore, StreamingScore, SubMetric, VoiceScore,
};
pub use recorder::{
    BrowseSample, MetricsRecorder, SocialSample, StreamSample, TransferDirection,
};
pub use report::{DataScore, OverallScore, QoeReport, QualityGrade};
pub use snapshot::{DataSamples, MeasurementSnapshot, VoiceSamples};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
