// ABOUTME: Offline replay of recorded samples through a coaching session
// ABOUTME: Loads a JSON sample array, ticks the service in order, and writes history and audit files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Replay of recorded runs
//!
//! A recording is a JSON array of samples in ingestion order:
//!
//! ```json
//! [
//!   { "distance_m": 50.0, "pace_min_per_km": 5.1, "heart_rate_bpm": 148 },
//!   { "distance_m": 150.0, "pace_min_per_km": 5.0 }
//! ]
//! ```

use std::path::Path;

use runbuddy_core::{AppError, AppResult, ErrorCode, EventKind, Sample};
use runbuddy_intelligence::{CoachReply, RunPlan};
use serde::Serialize;
use tokio::fs;
use tracing::{info, warn};

use crate::services::{CoachingService, RunReport};

/// One coaching message delivered during a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayMessage {
    /// Position of the triggering sample in the recording
    pub sample_index: usize,
    /// Event that fired
    pub event: EventKind,
    /// Message delivered to the runner
    pub reply: CoachReply,
}

/// Result of replaying a recording
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    /// Messages in delivery order
    pub messages: Vec<ReplayMessage>,
    /// Positions of samples rejected as invalid
    pub rejected: Vec<usize>,
    /// Report of the finished run
    pub report: RunReport,
}

/// Read a JSON array of samples
///
/// # Errors
///
/// Returns a `STORAGE_ERROR` if the file cannot be read or a
/// `SERIALIZATION_ERROR` if it is not a sample array.
pub async fn load_samples(path: &Path) -> AppResult<Vec<Sample>> {
    let raw = fs::read_to_string(path).await.map_err(|e| {
        AppError::storage(format!("Failed to read {}: {e}", path.display())).with_source(e)
    })?;
    let samples: Vec<Sample> = serde_json::from_str(&raw)?;
    info!(path = %path.display(), samples = samples.len(), "Loaded recording");
    Ok(samples)
}

/// Write a value as pretty JSON
///
/// # Errors
///
/// Returns a `SERIALIZATION_ERROR` or a `STORAGE_ERROR` if the file cannot
/// be written.
pub async fn write_json<T: Serialize + Sync>(path: &Path, value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).await.map_err(|e| {
        AppError::storage(format!("Failed to write {}: {e}", path.display())).with_source(e)
    })
}

/// Run the recording through a fresh run of `service` and end it
///
/// Invalid samples are skipped and reported; the run continues.
///
/// # Errors
///
/// Returns an error if the plan is invalid or a sample fails for a reason
/// other than validation.
pub async fn replay(
    service: &CoachingService,
    plan: Option<RunPlan>,
    samples: &[Sample],
) -> AppResult<ReplayOutcome> {
    service.start_run(plan).await?;

    let mut messages = Vec::new();
    let mut rejected = Vec::new();
    for (sample_index, sample) in samples.iter().enumerate() {
        match service.tick(*sample).await {
            Ok(outcome) => {
                if let (Some(event), Some(reply)) = (outcome.event, outcome.message) {
                    messages.push(ReplayMessage {
                        sample_index,
                        event,
                        reply,
                    });
                }
            }
            Err(e) if e.code == ErrorCode::InvalidSample => {
                warn!(sample_index, error = %e, "Skipping invalid sample");
                rejected.push(sample_index);
            }
            Err(e) => return Err(e),
        }
    }

    let report = service.end_run().await?;
    Ok(ReplayOutcome {
        messages,
        rejected,
        report,
    })
}
