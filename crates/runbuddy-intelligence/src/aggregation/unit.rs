// ABOUTME: Distance-unit aggregator owning contiguous sub-segments of one kilometre (or unit)
// ABOUTME: Routes observations to segments and derives average pace, pace CV, and average heart rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: offsets are finite, >= 0 and below unit length

use serde::{Deserialize, Serialize};

use super::segment::{SegmentAggregator, SegmentRecord};
use crate::config::TrackerConfig;
use crate::statistics::{coefficient_of_variation, mean, mean_u32};

/// Derived statistics of one distance unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// 1-based unit index (1 = first kilometre)
    pub unit_index: u32,
    /// Average pace over all observations (min/km)
    pub avg_pace: f64,
    /// Pace coefficient of variation (0 below two observations)
    pub pace_cv: f64,
    /// Average heart rate, `None` without sensor data
    pub avg_heart_rate: Option<f64>,
    /// Number of pace observations
    pub sample_count: usize,
}

/// Exported per-unit history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// 1-based unit index
    pub unit: u32,
    /// Average pace (min/km)
    pub avg_pace: f64,
    /// Pace coefficient of variation
    pub cv_pace: f64,
    /// Average heart rate, null without sensor data
    pub avg_hr: Option<f64>,
    /// Non-empty segments in distance order
    pub segments: Vec<SegmentRecord>,
}

/// Observations of one distance unit, split into fixed-length segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceUnitAggregator {
    unit_index: u32,
    segment_length_m: u32,
    segment_count: u32,
    segments: Vec<SegmentAggregator>,
}

impl DistanceUnitAggregator {
    /// Empty unit with no segments materialized yet
    #[must_use]
    pub const fn new(unit_index: u32, config: &TrackerConfig) -> Self {
        Self {
            unit_index,
            segment_length_m: config.segment_length_m,
            segment_count: config.segments_per_unit(),
            segments: Vec::new(),
        }
    }

    /// 1-based unit index
    #[must_use]
    pub const fn unit_index(&self) -> u32 {
        self.unit_index
    }

    /// Configured segment length (metres)
    #[must_use]
    pub const fn segment_length_m(&self) -> u32 {
        self.segment_length_m
    }

    /// Materialized segments, contiguous and sorted by start offset
    #[must_use]
    pub fn segments(&self) -> &[SegmentAggregator] {
        &self.segments
    }

    /// Index of the segment covering `offset_m`, clamped to the last segment
    #[must_use]
    pub fn segment_index_for(&self, offset_m: f64) -> usize {
        let last = self.segment_count.saturating_sub(1);
        let raw = (offset_m / f64::from(self.segment_length_m)).floor();
        // `as` saturates, so overshoot past u32::MAX still clamps below
        (raw as u32).min(last) as usize
    }

    /// Route one observation by its offset inside this unit
    ///
    /// Segments up to the target are created on demand so the sequence stays
    /// contiguous even when telemetry skips ahead.
    pub(crate) fn add(&mut self, offset_m: f64, pace: f64, heart_rate: Option<u32>) {
        let index = self.segment_index_for(offset_m);
        while self.segments.len() <= index {
            let start = self.segments.len() as u32 * self.segment_length_m;
            self.segments
                .push(SegmentAggregator::new(start, self.segment_length_m));
        }
        self.segments[index].add(pace, heart_rate);
    }

    /// All pace observations of the unit, segment by segment
    #[must_use]
    pub fn paces(&self) -> Vec<f64> {
        self.segments
            .iter()
            .flat_map(|segment| segment.paces().iter().copied())
            .collect()
    }

    /// All heart-rate observations of the unit, segment by segment
    #[must_use]
    pub fn heart_rates(&self) -> Vec<u32> {
        self.segments
            .iter()
            .flat_map(|segment| segment.heart_rates().iter().copied())
            .collect()
    }

    /// Whether the unit holds no observation
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(SegmentAggregator::is_empty)
    }

    /// Derived statistics, recomputed from raw observations; `None` when empty
    #[must_use]
    pub fn stats(&self) -> Option<UnitStats> {
        let paces = self.paces();
        let avg_pace = mean(&paces)?;
        Some(UnitStats {
            unit_index: self.unit_index,
            avg_pace,
            pace_cv: coefficient_of_variation(&paces),
            avg_heart_rate: mean_u32(&self.heart_rates()),
            sample_count: paces.len(),
        })
    }

    /// History record, `None` when empty
    #[must_use]
    pub fn to_record(&self) -> Option<UnitRecord> {
        let stats = self.stats()?;
        Some(UnitRecord {
            unit: stats.unit_index,
            avg_pace: stats.avg_pace,
            cv_pace: stats.pace_cv,
            avg_hr: stats.avg_heart_rate,
            segments: self
                .segments
                .iter()
                .filter_map(SegmentAggregator::to_record)
                .collect(),
        })
    }
}
