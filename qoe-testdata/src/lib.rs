// QoE Testdata - Realistic measurement snapshot generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # QoE Testdata
//!
//! Seeded generator of measurement snapshots for the QoE scoring engine.
//!
//! - **Scenario profiles**: excellent, typical and congested cells, plus
//!   voice-only, data-only and idle subscribers
//! - **Recorder replay**: sessions go through `qoe::MetricsRecorder`
//! - **Reproducible**: the same seed always yields the same snapshot
//!
//! ## Quick Start
//!
//! ```rust
//! use qoe::QoeEngine;
//! use qoe_testdata::{generate_snapshot, GeneratorConfig, ScenarioProfile};
//!
//! let config = GeneratorConfig::new().with_sessions(30).with_seed(42);
//! let snapshot = generate_snapshot(&config, ScenarioProfile::Typical);
//!
//! let report = QoeEngine::with_defaults().compute(&snapshot);
//! assert!(report.overall.result.score.is_some());
//! ```

pub mod dataset;
pub mod generator;
pub mod scenario;

// Re-exports for convenience
pub use dataset::{generate_all, DatasetError, ScenarioDataset};
pub use generator::{generate_snapshot, generate_with_conditions, GeneratorConfig};
pub use scenario::{DataConditions, NetworkConditions, ScenarioProfile, Spread, VoiceConditions};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
