// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Provides sample builders, tracker/engine setup, and mock coaching text generators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `runbuddy_coach`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use runbuddy_coach::config::CoachConfig;
use runbuddy_coach::llm::{CoachPrompt, CoachTextGenerator};
use runbuddy_coach::services::CoachingService;
use runbuddy_coach::{
    AppError, AppResult, RunPlan, RunTracker, Sample, TrackerConfig, TriggerConfig, TriggerEngine,
};
use tokio::time::sleep;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// Valid sample; panics on invalid input
pub fn sample(distance_m: f64, pace_min_per_km: f64) -> Sample {
    Sample::new(distance_m, pace_min_per_km, None).unwrap()
}

/// Valid sample with heart rate
pub fn sample_hr(distance_m: f64, pace_min_per_km: f64, heart_rate_bpm: u32) -> Sample {
    Sample::new(distance_m, pace_min_per_km, Some(heart_rate_bpm)).unwrap()
}

/// Tracker with the default 1000 m units and 100 m segments
pub fn default_tracker() -> RunTracker {
    RunTracker::new(TrackerConfig::default()).unwrap()
}

/// Engine with the default threshold and the given target pace
pub fn engine_with_target(target_pace: Option<f64>) -> TriggerEngine {
    let plan = RunPlan {
        target_pace_min_per_km: target_pace,
        total_distance_m: None,
    };
    TriggerEngine::new(plan, &TriggerConfig::default()).unwrap()
}

/// Generator answering with the event name and counting its calls
#[derive(Debug, Default)]
pub struct CountingGenerator {
    calls: AtomicUsize,
}

impl CountingGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CoachTextGenerator for CountingGenerator {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn generate(&self, prompt: &CoachPrompt) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("coach says {}", prompt.event))
    }
}

/// Generator that always fails
#[derive(Debug, Default)]
pub struct FailingGenerator;

#[async_trait]
impl CoachTextGenerator for FailingGenerator {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn generate(&self, _prompt: &CoachPrompt) -> AppResult<String> {
        Err(AppError::external_service("Mock", "model server is down"))
    }
}

/// Generator that answers only after a delay
#[derive(Debug)]
pub struct SlowGenerator {
    pub delay: Duration,
}

#[async_trait]
impl CoachTextGenerator for SlowGenerator {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn generate(&self, _prompt: &CoachPrompt) -> AppResult<String> {
        sleep(self.delay).await;
        Ok("too late".to_owned())
    }
}

/// Service with default configuration around the given generator
pub fn service_with(generator: Arc<dyn CoachTextGenerator>) -> CoachingService {
    CoachingService::new(CoachConfig::default(), generator).unwrap()
}
