// ABOUTME: Run tracker routing live samples into distance units and producing the run summary
// ABOUTME: Opens units on demand as distance grows and rejects invalid or regressing samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Run Tracker
//!
//! Owns every [`DistanceUnitAggregator`] of one run. Samples are routed by
//! cumulative distance: `offset = distance mod unit_length` selects the
//! segment inside the unit reached by the sample. Only units that receive a
//! sample are materialized: a sparse sample that jumps over several units
//! opens the unit it lands in and the intervening ones never exist.
//!
//! Derived statistics are never cached; they are recomputed from the raw
//! observations on every read.

use runbuddy_core::constants::units::METERS_PER_KM;
use runbuddy_core::{Sample, SampleError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::{DistanceUnitAggregator, UnitRecord, UnitStats};
use crate::config::{ConfigError, TrackerConfig};
use crate::statistics::{coefficient_of_variation, mean, mean_u32};

/// Final statistics of a run, derived from all observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Distance covered, expressed in distance units
    pub total_distance_units: f64,
    /// Average pace over all observations (min/km)
    pub avg_pace: f64,
    /// Pace coefficient of variation over all observations
    pub pace_cv: f64,
    /// Average heart rate, `None` without sensor data
    pub avg_heart_rate: Option<f64>,
    /// Elapsed time integrated from pace over distance (minutes)
    pub duration_minutes: f64,
}

/// Per-run aggregation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTracker {
    config: TrackerConfig,
    units: Vec<DistanceUnitAggregator>,
    last_distance_m: Option<f64>,
    elapsed_minutes: f64,
}

impl RunTracker {
    /// Tracker for a new run
    ///
    /// # Errors
    ///
    /// Returns an error if the segmentation config is invalid.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            units: Vec::new(),
            last_distance_m: None,
            elapsed_minutes: 0.0,
        })
    }

    /// Segmentation in use
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Unit length in metres
    #[must_use]
    pub fn unit_length_m(&self) -> f64 {
        f64::from(self.config.unit_length_m)
    }

    /// Units touched by at least one sample, in ascending index order
    #[must_use]
    pub fn units(&self) -> &[DistanceUnitAggregator] {
        &self.units
    }

    /// Highest cumulative distance absorbed, `None` before the first sample
    #[must_use]
    pub const fn last_distance_m(&self) -> Option<f64> {
        self.last_distance_m
    }

    /// Whether no sample was absorbed yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.last_distance_m.is_none()
    }

    /// Absorb one observation
    ///
    /// # Errors
    ///
    /// Returns a [`SampleError`] for negative distances, non-positive paces,
    /// zero heart rates, or distances below the previous sample. A rejected
    /// sample leaves the tracker untouched.
    pub fn add_sample(&mut self, sample: &Sample) -> Result<(), SampleError> {
        sample.validate()?;
        let distance_m = sample.distance_m;
        if let Some(previous_m) = self.last_distance_m {
            if distance_m < previous_m {
                return Err(SampleError::DistanceRegression {
                    previous_m,
                    distance_m,
                });
            }
        }

        let unit_length = self.unit_length_m();
        let unit_index = unit_index_at(distance_m, unit_length);
        if self.current_unit().map(DistanceUnitAggregator::unit_index) != Some(unit_index) {
            debug!(unit = unit_index, distance_m, "opening distance unit");
            self.units
                .push(DistanceUnitAggregator::new(unit_index, &self.config));
        }

        let offset_m = distance_m % unit_length;
        if let Some(current) = self.units.last_mut() {
            current.add(offset_m, sample.pace_min_per_km, sample.heart_rate_bpm);
        }

        let covered_km = (distance_m - self.last_distance_m.unwrap_or(0.0)) / METERS_PER_KM;
        self.elapsed_minutes += sample.pace_min_per_km * covered_km;
        self.last_distance_m = Some(distance_m);
        Ok(())
    }

    /// Unit currently receiving samples
    #[must_use]
    pub fn current_unit(&self) -> Option<&DistanceUnitAggregator> {
        self.units.last()
    }

    /// Statistics of a completed or in-progress unit, `None` when it has no data
    #[must_use]
    pub fn unit_stats(&self, unit_index: u32) -> Option<UnitStats> {
        let position = self
            .units
            .binary_search_by_key(&unit_index, DistanceUnitAggregator::unit_index)
            .ok()?;
        self.units.get(position)?.stats()
    }

    /// Statistics of the unit currently receiving samples
    #[must_use]
    pub fn current_unit_stats(&self) -> Option<UnitStats> {
        self.current_unit()?.stats()
    }

    /// Exportable history, one record per non-empty unit
    #[must_use]
    pub fn history(&self) -> Vec<UnitRecord> {
        self.units
            .iter()
            .filter_map(DistanceUnitAggregator::to_record)
            .collect()
    }

    /// Summary of the whole run so far, `None` before the first sample
    #[must_use]
    pub fn summarize(&self) -> Option<RunSummary> {
        let paces: Vec<f64> = self
            .units
            .iter()
            .flat_map(DistanceUnitAggregator::paces)
            .collect();
        let heart_rates: Vec<u32> = self
            .units
            .iter()
            .flat_map(DistanceUnitAggregator::heart_rates)
            .collect();
        let avg_pace = mean(&paces)?;

        Some(RunSummary {
            total_distance_units: self.last_distance_m.unwrap_or(0.0) / self.unit_length_m(),
            avg_pace,
            pace_cv: coefficient_of_variation(&paces),
            avg_heart_rate: mean_u32(&heart_rates),
            duration_minutes: self.elapsed_minutes,
        })
    }
}

/// 1-based index of the unit containing `distance_m`, saturating for absurd distances
fn unit_index_at(distance_m: f64, unit_length_m: f64) -> u32 {
    ((distance_m / unit_length_m).floor() as u32).saturating_add(1)
}
