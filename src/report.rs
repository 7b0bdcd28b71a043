//! Score tree produced by [`crate::QoeEngine::compute`].
//!
//! The tree mirrors the input snapshot: a node per domain, each carrying its
//! `score`, `appliedWeight`, coverage-adjusted `normalized` score and raw
//! diagnostics. Histograms are ordered maps, so identical inputs serialize to
//! identical bytes.

use crate::aggregate::ScoreResult;
use crate::evaluator::{
    BrowsingScore, HttpScore, LatencyScore, SocialScore, StreamingScore, VoiceScore,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full QoE report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QoeReport {
    pub voice: VoiceScore,
    pub data: DataScore,
    pub overall: OverallScore,
}

impl QoeReport {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON string.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Data composite and its five domains.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    /// Data score rescaled by its share coverage, as used for `overall`.
    pub normalized: Option<f64>,
    pub browsing: BrowsingScore,
    pub streaming: StreamingScore,
    pub http: HttpScore,
    pub social: SocialScore,
    pub latency: LatencyScore,
}

/// Top-level score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    #[serde(flatten)]
    pub result: ScoreResult,
    /// Score on a 0–100 scale.
    pub percent: Option<f64>,
    pub grade: QualityGrade,
}

impl OverallScore {
    pub fn new(result: ScoreResult) -> Self {
        let percent = result.percent();
        Self {
            result,
            percent,
            grade: QualityGrade::from_percent(percent),
        }
    }
}

/// Human-readable quality band for dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
    /// Nothing measured yet.
    #[default]
    NoData,
}

impl QualityGrade {
    /// Band a 0–100 score.
    pub fn from_percent(percent: Option<f64>) -> Self {
        match percent {
            None => QualityGrade::NoData,
            Some(p) if p >= 90.0 => QualityGrade::Excellent,
            Some(p) if p >= 75.0 => QualityGrade::Good,
            Some(p) if p >= 50.0 => QualityGrade::Fair,
            Some(p) if p >= 25.0 => QualityGrade::Poor,
            Some(_) => QualityGrade::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::Excellent => "Excellent",
            QualityGrade::Good => "Good",
            QualityGrade::Fair => "Fair",
            QualityGrade::Poor => "Poor",
            QualityGrade::Critical => "Critical",
            QualityGrade::NoData => "No data",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bands() {
        assert_eq!(QualityGrade::from_percent(Some(100.0)), QualityGrade::Excellent);
        assert_eq!(QualityGrade::from_percent(Some(90.0)), QualityGrade::Excellent);
        assert_eq!(QualityGrade::from_percent(Some(89.9)), QualityGrade::Good);
        assert_eq!(QualityGrade::from_percent(Some(50.0)), QualityGrade::Fair);
        assert_eq!(QualityGrade::from_percent(Some(30.0)), QualityGrade::Poor);
        assert_eq!(QualityGrade::from_percent(Some(0.0)), QualityGrade::Critical);
        assert_eq!(QualityGrade::from_percent(None), QualityGrade::NoData);
    }

    #[test]
    fn test_grade_as_str() {
        assert_eq!(QualityGrade::Excellent.as_str(), "Excellent");
        assert_eq!(QualityGrade::NoData.as_str(), "No data");
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(QualityGrade::Good.to_string(), "Good");
        assert_eq!(format!("{}", QualityGrade::NoData), "No data");
        let overall = OverallScore::new(ScoreResult::empty());
        assert_eq!(format!("grade={}", overall.grade), "grade=No data");
    }

    #[test]
    fn test_overall_from_result() {
        let overall = OverallScore::new(ScoreResult {
            score: Some(0.8),
            applied_weight: 1.0,
        });
        assert_eq!(overall.grade, QualityGrade::Good);
        assert!((overall.percent.unwrap() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report_json() {
        let report = QoeReport::default();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"appliedWeight\""));
        assert!(json.contains("\"no_data\""));

        let compact = report.to_json_compact().unwrap();
        assert!(compact.len() < json.len());

        let parsed = QoeReport::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
