// QoE Testdata - Network scenarios
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Named network scenarios and the conditions they simulate.
//!
//! Each profile expands to a [`NetworkConditions`] table: success
//! probabilities plus `(mean, std)` pairs for the normal distributions the
//! generator samples from.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mean and standard deviation of a sampled quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub mean: f64,
    pub std: f64,
}

impl Spread {
    pub const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }
}

/// Named scenario profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioProfile {
    /// Uncongested 5G cell, near the antenna.
    Excellent,
    /// Busy urban cell.
    Typical,
    /// Overloaded cell at peak hour.
    Congested,
    /// Typical voice, no data sessions.
    VoiceOnly,
    /// Typical data, no calls.
    DataOnly,
    /// Nothing measured.
    Idle,
}

impl ScenarioProfile {
    /// All profiles, best first.
    pub const ALL: [ScenarioProfile; 6] = [
        ScenarioProfile::Excellent,
        ScenarioProfile::Typical,
        ScenarioProfile::Congested,
        ScenarioProfile::VoiceOnly,
        ScenarioProfile::DataOnly,
        ScenarioProfile::Idle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioProfile::Excellent => "excellent",
            ScenarioProfile::Typical => "typical",
            ScenarioProfile::Congested => "congested",
            ScenarioProfile::VoiceOnly => "voice_only",
            ScenarioProfile::DataOnly => "data_only",
            ScenarioProfile::Idle => "idle",
        }
    }

    /// Conditions simulated by this profile.
    pub fn conditions(&self) -> NetworkConditions {
        match self {
            ScenarioProfile::Excellent => NetworkConditions::excellent(),
            ScenarioProfile::Typical => NetworkConditions::typical(),
            ScenarioProfile::Congested => NetworkConditions::congested(),
            ScenarioProfile::VoiceOnly => NetworkConditions {
                data: None,
                ..NetworkConditions::typical()
            },
            ScenarioProfile::DataOnly => NetworkConditions {
                voice: None,
                ..NetworkConditions::typical()
            },
            ScenarioProfile::Idle => NetworkConditions {
                voice: None,
                data: None,
            },
        }
    }
}

/// Voice call behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConditions {
    /// Probability a call attempt is established.
    pub setup_success: f64,
    /// Probability an established call is dropped.
    pub drop_probability: f64,
    pub setup_ms: Spread,
    pub mos: Spread,
}

/// Data session behavior. Durations in ms, throughputs in kbit/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConditions {
    pub browse_success: f64,
    pub browse_duration_ms: Spread,
    pub dns_ms: Spread,
    pub stream_success: f64,
    pub stream_mos: Spread,
    pub stream_setup_ms: Spread,
    pub stream_throughput: Spread,
    pub transfer_success: f64,
    pub download: Spread,
    pub upload: Spread,
    pub social_success: f64,
    pub social_duration_ms: Spread,
    pub latency_success: f64,
    /// Interactivity score (0–100).
    pub latency_score: Spread,
}

/// Full scenario table. `None` disables a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataConditions>,
}

impl NetworkConditions {
    /// Load conditions from JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Save conditions to JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    pub fn excellent() -> Self {
        Self {
            voice: Some(VoiceConditions {
                setup_success: 0.995,
                drop_probability: 0.002,
                setup_ms: Spread::new(3_000.0, 400.0),
                mos: Spread::new(4.4, 0.1),
            }),
            data: Some(DataConditions {
                browse_success: 0.99,
                browse_duration_ms: Spread::new(900.0, 150.0),
                dns_ms: Spread::new(20.0, 5.0),
                stream_success: 0.99,
                stream_mos: Spread::new(4.6, 0.1),
                stream_setup_ms: Spread::new(1_500.0, 300.0),
                stream_throughput: Spread::new(15_000.0, 2_000.0),
                transfer_success: 0.99,
                download: Spread::new(220_000.0, 20_000.0),
                upload: Spread::new(90_000.0, 8_000.0),
                social_success: 0.99,
                social_duration_ms: Spread::new(800.0, 150.0),
                latency_success: 0.99,
                latency_score: Spread::new(92.0, 3.0),
            }),
        }
    }

    pub fn typical() -> Self {
        Self {
            voice: Some(VoiceConditions {
                setup_success: 0.93,
                drop_probability: 0.03,
                setup_ms: Spread::new(6_000.0, 1_500.0),
                mos: Spread::new(3.6, 0.4),
            }),
            data: Some(DataConditions {
                browse_success: 0.93,
                browse_duration_ms: Spread::new(2_500.0, 800.0),
                dns_ms: Spread::new(60.0, 20.0),
                stream_success: 0.92,
                stream_mos: Spread::new(3.9, 0.4),
                stream_setup_ms: Spread::new(3_500.0, 1_200.0),
                stream_throughput: Spread::new(6_000.0, 2_000.0),
                transfer_success: 0.93,
                download: Spread::new(40_000.0, 15_000.0),
                upload: Spread::new(15_000.0, 6_000.0),
                social_success: 0.90,
                social_duration_ms: Spread::new(3_000.0, 1_500.0),
                latency_success: 0.93,
                latency_score: Spread::new(60.0, 15.0),
            }),
        }
    }

    pub fn congested() -> Self {
        Self {
            voice: Some(VoiceConditions {
                setup_success: 0.80,
                drop_probability: 0.12,
                setup_ms: Spread::new(11_000.0, 3_000.0),
                mos: Spread::new(2.4, 0.5),
            }),
            data: Some(DataConditions {
                browse_success: 0.75,
                browse_duration_ms: Spread::new(5_500.0, 1_500.0),
                dns_ms: Spread::new(250.0, 100.0),
                stream_success: 0.70,
                stream_mos: Spread::new(3.0, 0.4),
                stream_setup_ms: Spread::new(8_000.0, 2_000.0),
                stream_throughput: Spread::new(1_500.0, 600.0),
                transfer_success: 0.75,
                download: Spread::new(3_000.0, 1_500.0),
                upload: Spread::new(1_000.0, 500.0),
                social_success: 0.70,
                social_duration_ms: Spread::new(11_000.0, 3_000.0),
                latency_success: 0.75,
                latency_score: Spread::new(30.0, 10.0),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_profile_names_unique() {
        let mut names: Vec<_> = ScenarioProfile::ALL.iter().map(|p| p.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ScenarioProfile::ALL.len());
    }

    #[test]
    fn test_service_selection() {
        assert!(ScenarioProfile::VoiceOnly.conditions().data.is_none());
        assert!(ScenarioProfile::DataOnly.conditions().voice.is_none());
        let idle = ScenarioProfile::Idle.conditions();
        assert!(idle.voice.is_none() && idle.data.is_none());
    }

    #[test]
    fn test_conditions_degrade() {
        let excellent = NetworkConditions::excellent().voice.unwrap();
        let congested = NetworkConditions::congested().voice.unwrap();
        assert!(excellent.setup_success > congested.setup_success);
        assert!(excellent.mos.mean > congested.mos.mean);
    }

    #[test]
    fn test_conditions_json_roundtrip() {
        let conditions = NetworkConditions::typical();
        let temp = NamedTempFile::new().unwrap();

        conditions.to_json_file(temp.path()).unwrap();
        let loaded = NetworkConditions::from_json_file(temp.path()).unwrap();

        assert_eq!(loaded, conditions);
    }
}
