// ABOUTME: Integration tests for replaying recorded sample streams through the coaching service
// ABOUTME: Covers message delivery order, skipped samples, final report, and JSON file output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::sync::Arc;

use common::{init_test_logging, service_with};
use runbuddy_coach::llm::TemplateGenerator;
use runbuddy_coach::replay::{load_samples, replay, write_json};
use runbuddy_coach::{ErrorCode, EventKind, RunPlan, UnitRecord};
use tempfile::TempDir;

const RECORDING: &str = r#"[
  { "distance_m": 50.0, "pace_min_per_km": 5.0, "heart_rate_bpm": 150 },
  { "distance_m": 400.0, "pace_min_per_km": 5.0 },
  { "distance_m": 800.0, "pace_min_per_km": 5.4 },
  { "distance_m": 700.0, "pace_min_per_km": 5.0 },
  { "distance_m": 1100.0, "pace_min_per_km": 5.0 },
  { "distance_m": 1500.0, "pace_min_per_km": 5.0 }
]"#;

#[tokio::test]
async fn test_replay_recording_end_to_end() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.json");
    fs::write(&path, RECORDING).unwrap();

    let samples = load_samples(&path).await.unwrap();
    assert_eq!(samples.len(), 6);
    assert_eq!(samples[0].heart_rate_bpm, Some(150));

    let service = service_with(Arc::new(TemplateGenerator::new()));
    let plan = RunPlan {
        target_pace_min_per_km: Some(5.0),
        total_distance_m: None,
    };
    let outcome = replay(&service, Some(plan), &samples).await.unwrap();

    let delivered: Vec<(usize, EventKind)> = outcome
        .messages
        .iter()
        .map(|message| (message.sample_index, message.event))
        .collect();
    assert_eq!(
        delivered,
        vec![
            (0, EventKind::RunStart),
            (2, EventKind::PaceSlow),
            (4, EventKind::NewUnit),
        ]
    );
    assert_eq!(outcome.rejected, vec![3]);
    assert!(outcome.messages[0].reply.text.contains("5.00"));

    let report = &outcome.report;
    assert_eq!(report.history.len(), 2);
    assert_eq!(report.audit.len(), 4);
    assert_eq!(report.audit[3].event, EventKind::RunEnd);
    assert!(report.message.is_some());
    assert!(service.active_run_id().await.is_none());
}

#[tokio::test]
async fn test_history_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let recording = dir.path().join("run.json");
    fs::write(&recording, RECORDING).unwrap();

    let service = service_with(Arc::new(TemplateGenerator::new()));
    let samples = load_samples(&recording).await.unwrap();
    let outcome = replay(&service, None, &samples).await.unwrap();

    let history_path = dir.path().join("history.json");
    write_json(&history_path, &outcome.report.history)
        .await
        .unwrap();

    let written: Vec<UnitRecord> =
        serde_json::from_str(&fs::read_to_string(&history_path).unwrap()).unwrap();
    assert_eq!(written.len(), outcome.report.history.len());
    assert_eq!(written[0].segments.len(), outcome.report.history[0].segments.len());
    assert_eq!(written[0].unit, 1);
    assert_eq!(written[1].unit, 2);
}

#[tokio::test]
async fn test_load_samples_reports_missing_and_malformed_files() {
    let dir = TempDir::new().unwrap();

    let missing = load_samples(&dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert_eq!(missing.code, ErrorCode::StorageError);

    let malformed_path = dir.path().join("broken.json");
    fs::write(&malformed_path, "{ \"distance_m\": 1 }").unwrap();
    let malformed = load_samples(&malformed_path).await.unwrap_err();
    assert_eq!(malformed.code, ErrorCode::SerializationError);
}
