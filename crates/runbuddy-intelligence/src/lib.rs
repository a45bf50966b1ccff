// ABOUTME: Telemetry aggregation and edge-triggered coaching rules for live runs
// ABOUTME: Pure, synchronous engine with no I/O; the service crate drives it per sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `RunBuddy` Intelligence
//!
//! Turns a stream of cumulative-distance samples into per-unit statistics
//! and decides when the runner should hear from the coach.
//!
//! ## Modules
//!
//! - **statistics**: Mean, sample standard deviation, coefficient of variation
//! - **aggregation**: Segment and distance-unit aggregators
//! - **`run_tracker`**: Routes samples into units and summarizes the run
//! - **triggers**: Coaching rules and the first-match trigger engine
//! - **context**: Flat prompt context with fixed numeric precision
//! - **audit**: Append-only record of coaching interactions
//! - **config**: Segmentation, thresholds and the runner's plan

/// Append-only audit log of coaching interactions
pub mod audit;
/// Segment and distance-unit aggregators
pub mod aggregation;
/// Segmentation, trigger thresholds and run plan
pub mod config;
/// Prompt context construction
pub mod context;
/// Per-run sample routing and summary
pub mod run_tracker;
/// Descriptive statistics over pace and heart-rate observations
pub mod statistics;
/// Coaching trigger rules and engine
pub mod triggers;

pub use aggregation::{DistanceUnitAggregator, SegmentAggregator, SegmentRecord, UnitRecord, UnitStats};
pub use audit::{AuditEntry, AuditLog, CoachReply, FALLBACK_PREFIX};
pub use config::{ConfigError, RunPlan, TrackerConfig, TriggerConfig};
pub use context::{PromptContext, PromptContextBuilder};
pub use run_tracker::{RunSummary, RunTracker};
pub use triggers::{TriggerCheck, TriggerEngine, TriggerEvent, TriggerRule};
