// ABOUTME: Sub-segment aggregator collecting pace and heart-rate observations
// ABOUTME: One fixed-length slice of a distance unit, created lazily, never merged or split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::statistics::{mean, mean_u32};

/// Observations that fell inside one sub-segment of a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAggregator {
    start_m: u32,
    end_m: u32,
    paces: Vec<f64>,
    heart_rates: Vec<u32>,
}

/// Exported statistics of one non-empty segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Offset of the segment start inside its unit (metres)
    pub start_m: u32,
    /// Offset of the segment end inside its unit (metres)
    pub end_m: u32,
    /// Average pace (min/km)
    pub avg_pace: f64,
    /// Average heart rate, null without sensor data
    pub avg_hr: Option<f64>,
}

impl SegmentAggregator {
    /// Empty segment covering `[start_m, start_m + length_m)`
    #[must_use]
    pub const fn new(start_m: u32, length_m: u32) -> Self {
        Self {
            start_m,
            end_m: start_m + length_m,
            paces: Vec::new(),
            heart_rates: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, pace: f64, heart_rate: Option<u32>) {
        self.paces.push(pace);
        if let Some(hr) = heart_rate {
            self.heart_rates.push(hr);
        }
    }

    /// Segment start offset (metres)
    #[must_use]
    pub const fn start_m(&self) -> u32 {
        self.start_m
    }

    /// Segment end offset (metres)
    #[must_use]
    pub const fn end_m(&self) -> u32 {
        self.end_m
    }

    /// Pace observations in arrival order
    #[must_use]
    pub fn paces(&self) -> &[f64] {
        &self.paces
    }

    /// Heart-rate observations in arrival order
    #[must_use]
    pub fn heart_rates(&self) -> &[u32] {
        &self.heart_rates
    }

    /// Whether no observation landed here yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paces.is_empty()
    }

    /// Average pace, `None` when empty
    #[must_use]
    pub fn avg_pace(&self) -> Option<f64> {
        mean(&self.paces)
    }

    /// Average heart rate, `None` without sensor data
    #[must_use]
    pub fn avg_heart_rate(&self) -> Option<f64> {
        mean_u32(&self.heart_rates)
    }

    /// Export record, `None` for an empty segment
    #[must_use]
    pub fn to_record(&self) -> Option<SegmentRecord> {
        Some(SegmentRecord {
            start_m: self.start_m,
            end_m: self.end_m,
            avg_pace: self.avg_pace()?,
            avg_hr: self.avg_heart_rate(),
        })
    }
}
