// QoE Testdata - Dataset structures
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Generated snapshots bundled with the metadata needed to reproduce them.

use crate::generator::{generate_snapshot, GeneratorConfig};
use crate::scenario::ScenarioProfile;
use qoe::{MeasurementSnapshot, QoeEngine, QoeReport};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Dataset error types.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot produced for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDataset {
    pub profile: ScenarioProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub sessions: usize,
    pub snapshot: MeasurementSnapshot,
}

impl ScenarioDataset {
    /// Generate a dataset for a profile.
    pub fn generate(config: &GeneratorConfig, profile: ScenarioProfile) -> Self {
        Self {
            profile,
            seed: config.seed,
            sessions: config.sessions,
            snapshot: generate_snapshot(config, profile),
        }
    }

    /// Score the snapshot with the given engine.
    pub fn score(&self, engine: &QoeEngine) -> QoeReport {
        engine.compute(&self.snapshot)
    }

    /// Export to JSON file.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load from JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Generate one dataset per profile with a shared seed.
pub fn generate_all(config: &GeneratorConfig) -> Vec<ScenarioDataset> {
    ScenarioProfile::ALL
        .iter()
        .map(|profile| ScenarioDataset::generate(config, *profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_dataset_file_roundtrip() {
        let config = GeneratorConfig::new().with_sessions(10).with_seed(11);
        let dataset = ScenarioDataset::generate(&config, ScenarioProfile::Typical);
        let temp = NamedTempFile::new().unwrap();

        dataset.to_json_file(temp.path()).unwrap();
        let loaded = ScenarioDataset::from_json_file(temp.path()).unwrap();

        assert_eq!(loaded.profile, ScenarioProfile::Typical);
        assert_eq!(loaded.seed, Some(11));
        assert_eq!(loaded.snapshot.voice.attempts, dataset.snapshot.voice.attempts);
        assert_eq!(
            loaded.snapshot.data.http.dl.throughputs.len(),
            dataset.snapshot.data.http.dl.throughputs.len()
        );
    }

    #[test]
    fn test_missing_file() {
        let result = ScenarioDataset::from_json_file("/nonexistent/qoe/dataset.json");
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn test_generate_all() {
        let config = GeneratorConfig::new().with_sessions(5).with_seed(2);
        let datasets = generate_all(&config);
        assert_eq!(datasets.len(), ScenarioProfile::ALL.len());
        assert!(datasets
            .iter()
            .any(|d| d.profile == ScenarioProfile::Idle && d.snapshot.is_empty()));
    }
}
