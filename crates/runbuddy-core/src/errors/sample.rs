// ABOUTME: Telemetry sample validation errors
// ABOUTME: Structured rejection reasons that convert into the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::json;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Reasons a telemetry sample is rejected.
///
/// A rejected sample is never absorbed into any aggregate; the run continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// Distance is negative, NaN or infinite
    #[error("distance must be a finite value >= 0, got {distance_m}")]
    InvalidDistance {
        /// Offending cumulative distance in metres
        distance_m: f64,
    },
    /// Pace is zero, negative, NaN or infinite
    #[error("pace must be a finite value > 0, got {pace_min_per_km}")]
    InvalidPace {
        /// Offending pace in min/km
        pace_min_per_km: f64,
    },
    /// Heart rate of zero
    #[error("heart rate must be > 0 when present")]
    InvalidHeartRate,
    /// Cumulative distance went backwards
    #[error("distance regressed from {previous_m} m to {distance_m} m")]
    DistanceRegression {
        /// Highest distance recorded so far
        previous_m: f64,
        /// Offending cumulative distance in metres
        distance_m: f64,
    },
}

impl From<SampleError> for AppError {
    fn from(error: SampleError) -> Self {
        let details = match &error {
            SampleError::InvalidDistance { distance_m } => json!({ "distance_m": distance_m }),
            SampleError::InvalidPace { pace_min_per_km } => {
                json!({ "pace_min_per_km": pace_min_per_km })
            }
            SampleError::InvalidHeartRate => json!({ "heart_rate_bpm": 0 }),
            SampleError::DistanceRegression {
                previous_m,
                distance_m,
            } => json!({ "previous_m": previous_m, "distance_m": distance_m }),
        };
        Self::new(ErrorCode::InvalidSample, error.to_string()).with_details(details)
    }
}
