//! End-to-end scoring tests
//!
//! Snapshots are built either by hand, from JSON or through the recorder,
//! and scored with the default tables.

use approx::assert_relative_eq;
use qoe::snapshot::{BrowsingSamples, LatencySamples, TransferSamples};
use qoe::*;
use std::io::Write;

fn reference_voice() -> VoiceSamples {
    VoiceSamples {
        attempts: 10,
        setup_ok: 9,
        completed: 5,
        dropped: 1,
        setup_times: vec![3_000.0, 4_000.0],
        mos_samples: vec![4.0, 4.2],
        reasons: vec![],
    }
}

#[test]
fn test_reference_voice_scenario() {
    let snapshot = MeasurementSnapshot {
        voice: reference_voice(),
        ..Default::default()
    };
    let report = compute(&snapshot);
    let voice = &report.voice;

    assert_relative_eq!(voice.cssr.value.unwrap(), 0.9, epsilon = 1e-12);
    assert_relative_eq!(voice.cssr.score.unwrap(), 1.0 / 3.0, epsilon = 1e-6);
    assert_relative_eq!(voice.cdr.value.unwrap(), 1.0 / 6.0, epsilon = 1e-12);
    assert_eq!(voice.cdr.score, Some(0.0));
    assert_relative_eq!(voice.mos_avg.value.unwrap(), 4.1, epsilon = 1e-12);
    assert_relative_eq!(voice.setup_time_avg.value.unwrap(), 3_500.0);

    // 0.25/3 + 0.175 * 2.1/2.3 + 0.075 + 0.125 + 0.125
    let expected = 0.25 / 3.0 + 0.175 * (2.1 / 2.3) + 0.325;
    assert_relative_eq!(voice.result.score.unwrap(), expected, epsilon = 1e-6);
    assert_relative_eq!(voice.result.applied_weight, 1.0, epsilon = 1e-9);

    // voice alone drives the overall score
    assert_relative_eq!(report.overall.result.score.unwrap(), expected, epsilon = 1e-6);
    assert_relative_eq!(report.overall.result.applied_weight, 0.4, epsilon = 1e-9);
    assert_eq!(report.overall.grade, QualityGrade::Fair);
}

#[test]
fn test_snapshot_from_camel_case_json() {
    let json = r#"{
        "voice": {
            "attempts": 10, "setupOk": 9, "completed": 5, "dropped": 1,
            "setupTimes": [3000, 4000], "mosSamples": [4.0, 4.2]
        }
    }"#;
    let snapshot = MeasurementSnapshot::from_json(json).unwrap();
    assert_eq!(snapshot.voice, reference_voice());
    assert!(snapshot.data.http.dl.throughputs.is_empty());
}

#[test]
fn test_missing_metric_excluded_not_zeroed() {
    let snapshot = MeasurementSnapshot {
        voice: VoiceSamples {
            attempts: 5,
            setup_ok: 5,
            ..Default::default()
        },
        ..Default::default()
    };
    let report = compute(&snapshot);

    // only cssr measured: a perfect ratio stays perfect
    assert_eq!(report.voice.cdr.score, None);
    assert_eq!(report.voice.result.score, Some(1.0));
    assert_relative_eq!(report.voice.result.applied_weight, 0.25, epsilon = 1e-9);
}

#[test]
fn test_partial_domain_coverage_penalized() {
    let mut snapshot = MeasurementSnapshot::new();
    snapshot.data.http.dl = TransferSamples {
        requests: 4,
        completed: 4,
        throughputs: vec![250_000.0; 4],
    };
    let report = compute(&snapshot);

    assert_eq!(report.data.http.result.score, Some(1.0));
    assert_relative_eq!(report.data.http.normalized.unwrap(), 0.2 / 0.3, epsilon = 1e-9);
    assert!(report.data.normalized.unwrap() < report.data.http.result.score.unwrap());
}

#[test]
fn test_full_data_coverage_not_penalized() {
    let mut snapshot = MeasurementSnapshot::new();
    let data = &mut snapshot.data;
    data.browsing = BrowsingSamples {
        requests: 2,
        completed: 2,
        durations: vec![800.0, 900.0],
        ..Default::default()
    };
    data.streaming.requests = 1;
    data.streaming.completed = 1;
    data.streaming.mos_samples = vec![4.8];
    data.streaming.setup_times = vec![1_000.0];
    data.http.dl = TransferSamples {
        requests: 1,
        completed: 1,
        throughputs: vec![300_000.0],
    };
    data.http.ul = TransferSamples {
        requests: 1,
        completed: 1,
        throughputs: vec![150_000.0],
    };
    data.social.requests = 1;
    data.social.completed = 1;
    data.social.durations = vec![500.0];
    data.latency = LatencySamples {
        requests: 1,
        completed: 1,
        scores: vec![95.0],
    };

    let report = compute(&snapshot);
    assert_relative_eq!(report.data.result.applied_weight, 1.0, epsilon = 1e-9);
    assert_relative_eq!(report.data.normalized.unwrap(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(report.overall.result.score.unwrap(), 1.0, epsilon = 1e-9);
    assert_eq!(report.overall.grade, QualityGrade::Excellent);
}

#[test]
fn test_compute_is_idempotent() {
    let mut recorder = MetricsRecorder::new();
    recorder.record_call_attempt();
    recorder.record_call_setup(4_500.0);
    recorder.record_call_dropped("radio_link_failure");
    recorder.record_transfer(TransferDirection::Download, Some(12_345.6));
    recorder.record_stream(Some(StreamSample {
        mos: 3.7,
        setup_ms: 2_400.0,
        throughput_kbps: Some(4_000.0),
        buffering_count: 2,
        resolution: Some("720p".to_string()),
    }));
    let snapshot = recorder.snapshot();

    let engine = QoeEngine::with_defaults();
    let first = engine.compute(&snapshot).to_json().unwrap();
    let second = engine.compute(&snapshot).to_json().unwrap();
    assert_eq!(first, second);
    assert_eq!(snapshot, recorder.snapshot());
}

#[test]
fn test_recorder_matches_hand_built_snapshot() {
    let mut recorder = MetricsRecorder::new();
    for _ in 0..10 {
        recorder.record_call_attempt();
    }
    for setup in [3_000.0, 4_000.0] {
        recorder.record_call_setup(setup);
    }
    for _ in 0..7 {
        recorder.record_call_setup(3_500.0);
    }
    recorder.record_call_failure("timeout");
    for _ in 0..5 {
        recorder.record_call_completed();
    }
    recorder.record_call_dropped("radio_link_failure");

    let recorded = recorder.snapshot();
    let hand_built = MeasurementSnapshot {
        voice: VoiceSamples {
            attempts: 10,
            setup_ok: 9,
            completed: 5,
            dropped: 1,
            setup_times: recorded.voice.setup_times.clone(),
            mos_samples: vec![],
            reasons: vec!["timeout".to_string(), "radio_link_failure".to_string()],
        },
        ..Default::default()
    };

    assert_eq!(recorded, hand_built);
    assert_eq!(compute(&recorded), compute(&hand_built));

    recorder.reset();
    assert_eq!(compute(&recorder.snapshot()).overall.result.score, None);
}

#[test]
fn test_report_json_shape() {
    let snapshot = MeasurementSnapshot {
        voice: VoiceSamples {
            reasons: vec!["timeout".to_string(), "timeout".to_string()],
            ..reference_voice()
        },
        ..Default::default()
    };
    let json = compute(&snapshot).to_json_compact().unwrap();

    for key in [
        "\"appliedWeight\"",
        "\"normalized\"",
        "\"mosAvg\"",
        "\"setupTimeP90\"",
        "\"failureReasons\":{\"timeout\":2}",
        "\"browsing\"",
        "\"grade\":\"fair\"",
    ] {
        assert!(json.contains(key), "missing {} in {}", key, json);
    }
}

#[test]
fn test_custom_config_from_file() {
    let mut config = QoeConfig::default();
    config.overall.voice = 0.5;
    config.overall.data = 0.5;
    config.voice.thresholds.cssr = Threshold::higher(1.0, 0.5);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.to_json().unwrap().as_bytes()).unwrap();

    let loaded = QoeConfig::from_json_file(file.path()).unwrap();
    let engine = QoeEngine::new(loaded).unwrap();
    let report = engine.compute(&MeasurementSnapshot {
        voice: reference_voice(),
        ..Default::default()
    });

    // (0.9 - 0.5) / 0.5
    assert_relative_eq!(report.voice.cssr.score.unwrap(), 0.8, epsilon = 1e-9);
    assert_relative_eq!(report.overall.result.applied_weight, 0.5, epsilon = 1e-9);
}

#[test]
fn test_invalid_config_file_rejected() {
    let json = r#"{ "overall": { "voice": 0.7, "data": 0.6 } }"#;
    let result = QoeConfig::from_json(json);
    assert!(matches!(
        result,
        Err(QoeError::Config(ConfigError::WeightSum { .. }))
    ));
}

#[test]
fn test_non_finite_samples_ignored() {
    let mut snapshot = MeasurementSnapshot::new();
    snapshot.data.latency = LatencySamples {
        requests: 2,
        completed: 2,
        scores: vec![f64::NAN, 95.0],
    };
    let report = compute(&snapshot);
    assert_eq!(report.data.latency.score_avg.value, Some(95.0));
    assert_eq!(report.data.latency.result.score, Some(1.0));
}

#[test]
fn test_saturated_counters_from_json() {
    let json = r#"{
        "voice": {
            "attempts": 18446744073709551615, "setupOk": 18446744073709551615,
            "completed": 18446744073709551615, "dropped": 1
        },
        "data": { "http": {
            "dl": { "requests": 18446744073709551615, "completed": 18446744073709551615 },
            "ul": { "requests": 1, "completed": 1 }
        } }
    }"#;
    let report = compute(&MeasurementSnapshot::from_json(json).unwrap());

    assert_eq!(report.voice.cssr.value, Some(1.0));
    assert!(report.voice.cdr.value.unwrap() < 1e-18);
    assert_relative_eq!(report.data.http.success_ratio.value.unwrap(), 1.0);
    assert!(report.overall.result.score.is_some());
}
