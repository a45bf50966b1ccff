// ABOUTME: Integration tests for the per-run audit log and coaching replies
// ABOUTME: Covers timestamps, write order, fallback messages, JSON export, and reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use common::{default_tracker, engine_with_target, sample};
use runbuddy_coach::{AuditLog, CoachReply, EventKind, PromptContext, FALLBACK_PREFIX};

#[test]
fn test_fallback_reply_carries_reason() {
    let reply = CoachReply::fallback("timeout");
    assert_eq!(reply.text, "⚠️ Coach unavailable: timeout");
    assert!(reply.text.starts_with(FALLBACK_PREFIX));
    assert_eq!(reply.fallback_reason.as_deref(), Some("timeout"));
    assert!(reply.is_fallback());

    let generated = CoachReply::generated("Nice and steady");
    assert!(!generated.is_fallback());
}

#[test]
fn test_entries_are_timestamped_in_write_order() {
    let mut log = AuditLog::new();
    assert!(log.is_empty());

    let before = Utc::now();
    log.append(
        EventKind::RunStart,
        PromptContext::default(),
        Some(sample(10.0, 5.0)),
        None,
        &CoachReply::generated("go"),
    );
    log.append(
        EventKind::CoachRequest,
        PromptContext::default(),
        None,
        None,
        &CoachReply::fallback("model server is down"),
    );
    let after = Utc::now();

    assert_eq!(log.len(), 2);
    let events: Vec<EventKind> = log.entries().iter().map(|entry| entry.event).collect();
    assert_eq!(events, vec![EventKind::RunStart, EventKind::CoachRequest]);
    for entry in log.entries() {
        assert!(entry.ts >= before && entry.ts <= after);
    }
    assert!(log.entries()[0].ts <= log.entries()[1].ts);

    let failed = &log.entries()[1];
    assert!(failed.response.starts_with(FALLBACK_PREFIX));
    assert_eq!(failed.fallback_reason.as_deref(), Some("model server is down"));
    assert!(failed.data.is_none());
}

#[test]
fn test_trigger_event_is_recorded_with_its_context() {
    let mut tracker = default_tracker();
    let mut engine = engine_with_target(Some(5.0));
    let mut log = AuditLog::new();

    for observation in [sample(10.0, 5.0), sample(300.0, 5.6)] {
        tracker.add_sample(&observation).unwrap();
        if let Some(event) = engine.evaluate(&observation, &tracker) {
            log.append_event(event, &CoachReply::generated("ok"));
        }
    }

    assert_eq!(log.len(), 2);
    let slow = &log.entries()[1];
    assert_eq!(slow.event, EventKind::PaceSlow);
    assert_eq!(slow.data, Some(sample(300.0, 5.6)));
    assert_eq!(slow.context.get("pace_gap"), Some("0.60"));
    assert_eq!(slow.response, "ok");
    assert!(slow.fallback_reason.is_none());
}

#[test]
fn test_json_export_shape() {
    let mut log = AuditLog::new();
    log.append(
        EventKind::PaceSlow,
        PromptContext::default(),
        Some(sample(420.0, 5.5)),
        None,
        &CoachReply::generated("pick it up"),
    );

    let json = log.to_json_pretty().unwrap();
    assert!(json.contains("\"PACE_SLOW\""));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entry = &value.as_array().unwrap()[0];
    assert_eq!(entry["event"], "PACE_SLOW");
    assert_eq!(entry["response"], "pick it up");
    assert!(entry["ts"].is_string());
    assert!((entry["data"]["distance_m"].as_f64().unwrap() - 420.0).abs() < 1e-9);
}

#[test]
fn test_reset_clears_entries() {
    let mut log = AuditLog::new();
    log.append(
        EventKind::RunStart,
        PromptContext::default(),
        None,
        None,
        &CoachReply::generated("go"),
    );
    log.reset();
    assert!(log.is_empty());
}
