// ABOUTME: End-to-end pipeline tests from raw CSV ingestion to the JSON report types
// ABOUTME: Exercises preprocessing, filtering, and the full analysis on synthetic recordings
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::io::Write;

use chrono::Utc;
use tempfile::NamedTempFile;

use fatigue_engine::config::FatigueConfig;
use fatigue_engine::engine::analyze_filtered_signal;
use fatigue_engine::models::AnalysisReport;
use fatigue_engine::preprocessing::load_recording;

/// Raw counts for a given acceleration in m/s^2 on a single axis
fn accel_counts(ms2: f64) -> f64 {
    ms2 * 32_768.0 / (9.8 * 16.0)
}

/// Write a synthetic CSV: resting at 1 g, then alternating spikes
fn write_recording(rest_rows: usize, active_rows: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Accel1X,Accel1Y,Accel1Z,Gyro1X,Gyro1Y,Gyro1Z").unwrap();
    for _ in 0..rest_rows {
        writeln!(file, "0,0,{:.1},0,0,0", accel_counts(9.8)).unwrap();
    }
    for i in 0..active_rows {
        let magnitude = if i % 2 == 0 { 16.0 } else { 4.0 };
        writeln!(file, "0,0,{:.1},10,10,10", accel_counts(magnitude)).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_load_recording_converts_and_filters() {
    let file = write_recording(400, 0);
    let config = FatigueConfig::default();
    let recording = load_recording(file.path(), &config.filter).unwrap();

    assert_eq!(recording.len(), 400);
    // Resting rows carry exactly 1 g on the Z axis
    assert!((recording.composite_accel[10] - 9.8).abs() < 0.5);
    // A constant signal passes the zero-phase filter unchanged
    assert!((recording.filtered_accel[200] - recording.composite_accel[200]).abs() < 1e-6);
    assert_eq!(recording.jerk.len(), 400);
    assert!(recording.jerk[0].abs() < 1e-12);
}

#[test]
fn test_full_pipeline_on_mixed_recording() {
    let file = write_recording(1000, 3000);
    let config = FatigueConfig::default();
    let recording = load_recording(file.path(), &config.filter).unwrap();
    let (series, summary) =
        analyze_filtered_signal(&recording.filtered_accel, &config.profile, &config.analysis)
            .unwrap();

    // Sample-to-sample alternation is a 50 Hz component, far above the
    // 10 Hz cutoff, so most of the spike energy is filtered out before the
    // dispersion statistics see it.
    assert_eq!(series.hp.len(), 39);
    for value in &series.hp {
        assert!((0.0..=100.0).contains(value));
    }
    // Whatever the onset outcome, the summary and series must agree
    if summary.onset_index.is_none() {
        assert_eq!(summary.final_hp_percent, 100);
    }
}

#[test]
fn test_low_frequency_activity_survives_the_filter() {
    // 2 Hz burst (25 samples per half-cycle at 100 Hz) passes the 10 Hz
    // cutoff and must register as exercise.
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Accel1X,Accel1Y,Accel1Z,Gyro1X,Gyro1Y,Gyro1Z").unwrap();
    for _ in 0..1000 {
        writeln!(file, "0,0,{:.1},0,0,0", accel_counts(9.8)).unwrap();
    }
    for i in 0..3000 {
        let phase = 2.0 * std::f64::consts::PI * 2.0 * (i as f64) / 100.0;
        let magnitude = 9.8 + 8.0 * phase.sin();
        writeln!(file, "0,0,{:.1},0,0,0", accel_counts(magnitude)).unwrap();
    }
    file.flush().unwrap();

    let config = FatigueConfig::default();
    let recording = load_recording(file.path(), &config.filter).unwrap();
    let (series, summary) =
        analyze_filtered_signal(&recording.filtered_accel, &config.profile, &config.analysis)
            .unwrap();

    let onset = summary.onset_index.expect("2 Hz activity should be detected");
    assert!(onset >= 5, "onset {onset} inside the resting region");
    assert!(*series.hp.last().unwrap() < 100.0);
}

#[test]
fn test_report_serialization_round_trip() {
    let file = write_recording(1000, 3000);
    let config = FatigueConfig::default();
    let recording = load_recording(file.path(), &config.filter).unwrap();
    let (series, summary) =
        analyze_filtered_signal(&recording.filtered_accel, &config.profile, &config.analysis)
            .unwrap();

    let report = AnalysisReport {
        generated_at: Utc::now(),
        profile: config.profile,
        summary,
        series,
    };
    let json = serde_json::to_string(&report).unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.summary.final_hp_percent, report.summary.final_hp_percent);
    assert_eq!(parsed.series.hp.len(), report.series.hp.len());
}

#[test]
fn test_missing_columns_fail_ingestion() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Accel1X,Accel1Y").unwrap();
    writeln!(file, "1,2").unwrap();
    file.flush().unwrap();

    let config = FatigueConfig::default();
    assert!(load_recording(file.path(), &config.filter).is_err());
}

#[test]
fn test_empty_csv_fails_ingestion() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Accel1X,Accel1Y,Accel1Z,Gyro1X,Gyro1Y,Gyro1Z").unwrap();
    file.flush().unwrap();

    let config = FatigueConfig::default();
    assert!(load_recording(file.path(), &config.filter).is_err());
}
