// ABOUTME: Configuration for segmentation, trigger thresholds, and the runner's plan
// ABOUTME: Serde-friendly structs with defaults and explicit validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration
//!
//! Provides configuration for distance segmentation ([`TrackerConfig`]),
//! trigger thresholds ([`TriggerConfig`]) and the runner's targets
//! ([`RunPlan`]).

mod error;

pub use error::ConfigError;

use runbuddy_core::constants::defaults;
use serde::{Deserialize, Serialize};

/// Distance segmentation used by the run tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Length of one distance unit in metres
    pub unit_length_m: u32,
    /// Length of one sub-segment of a unit in metres
    pub segment_length_m: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            unit_length_m: defaults::UNIT_LENGTH_M,
            segment_length_m: defaults::SEGMENT_LENGTH_M,
        }
    }
}

impl TrackerConfig {
    /// Validate segmentation lengths
    ///
    /// # Errors
    ///
    /// Returns an error if either length is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_length_m == 0 {
            return Err(ConfigError::ValueOutOfRange("unit_length_m must be > 0"));
        }
        if self.segment_length_m == 0 {
            return Err(ConfigError::ValueOutOfRange("segment_length_m must be > 0"));
        }
        Ok(())
    }

    /// Number of segments in one unit; the last one may extend past the unit end
    #[must_use]
    pub const fn segments_per_unit(&self) -> u32 {
        self.unit_length_m.div_ceil(self.segment_length_m)
    }
}

/// Thresholds for the coaching triggers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Pace gap (min/km) that must be strictly exceeded before a slow-pace alert
    pub pace_slow_threshold: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            pace_slow_threshold: defaults::PACE_SLOW_THRESHOLD_MIN_PER_KM,
        }
    }
}

impl TriggerConfig {
    /// Validate thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pace_slow_threshold.is_finite() || self.pace_slow_threshold < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "pace_slow_threshold must be a finite value >= 0",
            ));
        }
        Ok(())
    }
}

/// The runner's targets for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunPlan {
    /// Target pace in min/km; slow-pace alerts need it
    #[serde(default)]
    pub target_pace_min_per_km: Option<f64>,
    /// Planned run distance in metres; used for remaining distance
    #[serde(default)]
    pub total_distance_m: Option<f64>,
}

impl RunPlan {
    /// Plan with a target pace and a planned distance
    #[must_use]
    pub const fn new(target_pace_min_per_km: f64, total_distance_m: f64) -> Self {
        Self {
            target_pace_min_per_km: Some(target_pace_min_per_km),
            total_distance_m: Some(total_distance_m),
        }
    }

    /// Validate targets
    ///
    /// # Errors
    ///
    /// Returns an error if a present target is not strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .target_pace_min_per_km
            .is_some_and(|pace| !pace.is_finite() || pace <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "target_pace_min_per_km must be > 0",
            ));
        }
        if self
            .total_distance_m
            .is_some_and(|distance| !distance.is_finite() || distance <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange("total_distance_m must be > 0"));
        }
        Ok(())
    }
}
