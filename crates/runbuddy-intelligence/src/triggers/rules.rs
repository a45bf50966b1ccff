// ABOUTME: Built-in coaching rules: run start, completed distance unit, and pace too slow
// ABOUTME: Each rule owns its private state; state changes happen inside check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_possible_truncation)] // Safe: unit counts of a single run fit in i64

use runbuddy_core::{EventKind, Sample};
use serde::{Deserialize, Serialize};

use super::TriggerCheck;
use crate::aggregation::UnitStats;
use crate::context::{PromptContext, PromptContextBuilder};
use crate::run_tracker::RunTracker;

/// Tolerance absorbing binary rounding of decimal paces (5.2 - 5.0 > 0.2 in f64)
const PACE_GAP_EPSILON: f64 = 1e-9;

/// Fires exactly once, on the first sample evaluated by its engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStartRule {
    has_fired: bool,
}

impl RunStartRule {
    /// Whether the rule already fired for this run
    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.has_fired
    }
}

impl TriggerCheck for RunStartRule {
    fn kind(&self) -> EventKind {
        EventKind::RunStart
    }

    fn check(&mut self, _sample: &Sample, _tracker: &RunTracker) -> bool {
        if self.has_fired {
            return false;
        }
        self.has_fired = true;
        true
    }

    fn build_context(
        &self,
        sample: &Sample,
        _unit: Option<&UnitStats>,
        _tracker: &RunTracker,
        builder: &PromptContextBuilder,
    ) -> PromptContext {
        builder.build(Some(sample), None, None)
    }

    fn reset(&mut self) {
        self.has_fired = false;
    }
}

/// Fires when the number of completed units grows past the last one reported
///
/// A sample that skips several boundaries at once fires a single event for
/// the highest completed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUnitCompleteRule {
    last_unit_seen: i64,
}

impl Default for NewUnitCompleteRule {
    fn default() -> Self {
        Self { last_unit_seen: -1 }
    }
}

impl NewUnitCompleteRule {
    /// Highest completed unit reported so far, -1 before the first report
    #[must_use]
    pub const fn last_unit_seen(&self) -> i64 {
        self.last_unit_seen
    }

    fn completed_units(sample: &Sample, tracker: &RunTracker) -> i64 {
        (sample.distance_m / tracker.unit_length_m()).floor() as i64
    }
}

impl TriggerCheck for NewUnitCompleteRule {
    fn kind(&self) -> EventKind {
        EventKind::NewUnit
    }

    fn check(&mut self, sample: &Sample, tracker: &RunTracker) -> bool {
        let completed = Self::completed_units(sample, tracker);
        if completed >= 1 && completed > self.last_unit_seen {
            self.last_unit_seen = completed;
            return true;
        }
        false
    }

    fn completed_unit(&self, tracker: &RunTracker) -> Option<UnitStats> {
        let index = u32::try_from(self.last_unit_seen).ok()?;
        tracker.unit_stats(index)
    }

    fn build_context(
        &self,
        sample: &Sample,
        unit: Option<&UnitStats>,
        tracker: &RunTracker,
        builder: &PromptContextBuilder,
    ) -> PromptContext {
        builder.build(Some(sample), unit, tracker.summarize().as_ref())
    }

    fn reset(&mut self) {
        self.last_unit_seen = -1;
    }
}

/// Fires on every sample whose pace exceeds the target by more than the threshold
///
/// There is no cooldown: while the runner stays slow the rule keeps firing,
/// unless a higher-priority rule wins the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceTooSlowRule {
    threshold_min_per_km: f64,
    target_pace_min_per_km: Option<f64>,
}

impl PaceTooSlowRule {
    /// Rule comparing against `target` (min/km); never fires without a target
    #[must_use]
    pub const fn new(threshold_min_per_km: f64, target_pace_min_per_km: Option<f64>) -> Self {
        Self {
            threshold_min_per_km,
            target_pace_min_per_km,
        }
    }

    /// Gap that must be strictly exceeded (min/km)
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold_min_per_km
    }
}

impl TriggerCheck for PaceTooSlowRule {
    fn kind(&self) -> EventKind {
        EventKind::PaceSlow
    }

    fn check(&mut self, sample: &Sample, _tracker: &RunTracker) -> bool {
        self.target_pace_min_per_km
            .is_some_and(|target| {
                sample.pace_min_per_km - target - self.threshold_min_per_km > PACE_GAP_EPSILON
            })
    }

    fn build_context(
        &self,
        sample: &Sample,
        _unit: Option<&UnitStats>,
        tracker: &RunTracker,
        builder: &PromptContextBuilder,
    ) -> PromptContext {
        builder.build(Some(sample), None, tracker.summarize().as_ref())
    }

    fn reset(&mut self) {}
}
