// ABOUTME: Telemetry sample model for one tick of a live run
// ABOUTME: Cumulative distance, instantaneous pace, optional heart rate, with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::units::METERS_PER_KM;
use crate::errors::SampleError;

/// One telemetry observation for a run in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Cumulative distance since the start of the run (metres)
    pub distance_m: f64,
    /// Instantaneous pace (minutes per kilometre)
    pub pace_min_per_km: f64,
    /// Heart rate (beats per minute), when a sensor is connected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate_bpm: Option<u32>,
}

impl Sample {
    /// Create a validated sample
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] if the distance is negative or not finite,
    /// the pace is not strictly positive, or the heart rate is zero.
    pub fn new(
        distance_m: f64,
        pace_min_per_km: f64,
        heart_rate_bpm: Option<u32>,
    ) -> Result<Self, SampleError> {
        let sample = Self {
            distance_m,
            pace_min_per_km,
            heart_rate_bpm,
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Check the per-sample invariants
    ///
    /// Deserialized samples bypass [`Sample::new`], so consumers call this
    /// before absorbing a sample.
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] describing the first violated invariant.
    pub fn validate(&self) -> Result<(), SampleError> {
        if !self.distance_m.is_finite() || self.distance_m < 0.0 {
            return Err(SampleError::InvalidDistance {
                distance_m: self.distance_m,
            });
        }
        if !self.pace_min_per_km.is_finite() || self.pace_min_per_km <= 0.0 {
            return Err(SampleError::InvalidPace {
                pace_min_per_km: self.pace_min_per_km,
            });
        }
        if self.heart_rate_bpm == Some(0) {
            return Err(SampleError::InvalidHeartRate);
        }
        Ok(())
    }

    /// Cumulative distance in kilometres
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_m / METERS_PER_KM
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sample() {
        let sample = Sample::new(1250.0, 5.1, Some(150)).unwrap();
        assert!((sample.distance_km() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_invalid_fields() {
        assert!(matches!(
            Sample::new(-1.0, 5.0, None),
            Err(SampleError::InvalidDistance { .. })
        ));
        assert!(matches!(
            Sample::new(10.0, 0.0, None),
            Err(SampleError::InvalidPace { .. })
        ));
        assert!(matches!(
            Sample::new(10.0, f64::NAN, None),
            Err(SampleError::InvalidPace { .. })
        ));
        assert_eq!(
            Sample::new(10.0, 5.0, Some(0)),
            Err(SampleError::InvalidHeartRate)
        );
    }

    #[test]
    fn test_deserialize_without_heart_rate() {
        let sample: Sample =
            serde_json::from_str(r#"{"distance_m": 50.0, "pace_min_per_km": 5.0}"#).unwrap();
        assert_eq!(sample.heart_rate_bpm, None);
        assert!(sample.validate().is_ok());
    }
}
