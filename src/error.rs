//! Error types for QoE scoring
//!
//! Scoring itself never fails: missing data is `None`. The only fallible
//! surface is loading and validating the weight and threshold tables.

use thiserror::Error;

/// Result type alias for QoE operations
pub type Result<T> = std::result::Result<T, QoeError>;

/// Main error type for QoE operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QoeError {
    /// Configuration tables failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for QoeError {
    fn from(err: serde_json::Error) -> Self {
        QoeError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for QoeError {
    fn from(err: std::io::Error) -> Self {
        QoeError::Io(err.to_string())
    }
}

/// Errors found while validating weight and threshold tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Weights of one level do not add up to the declared total
    #[error("Weights of {level} sum to {actual}, expected {expected}")]
    WeightSum {
        level: String,
        expected: f64,
        actual: f64,
    },

    /// A weight is below zero
    #[error("Negative weight {weight} for {metric}")]
    NegativeWeight { metric: String, weight: f64 },

    /// A weight, threshold or cutoff is NaN or infinite
    #[error("Non-finite value in {field}")]
    NonFinite { field: String },

    /// Threshold maps good and bad onto the same raw value
    #[error("Degenerate threshold for {metric}: good == bad == {value}")]
    DegenerateThreshold { metric: String, value: f64 },

    /// Threshold direction disagrees with the ordering of good and bad
    #[error("Threshold for {metric} has higher_is_better inconsistent with good/bad ordering")]
    InconsistentDirection { metric: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QoeError::Config(ConfigError::WeightSum {
            level: "voice".to_string(),
            expected: 1.0,
            actual: 0.9,
        });
        let msg = format!("{}", err);
        assert!(msg.contains("voice"));
        assert!(msg.contains("0.9"));
    }

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::DegenerateThreshold {
            metric: "cssr".to_string(),
            value: 1.0,
        };
        let err: QoeError = config_err.into();
        assert!(matches!(err, QoeError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: QoeError = parse_err.into();
        assert!(matches!(err, QoeError::Parse(_)));
    }
}
