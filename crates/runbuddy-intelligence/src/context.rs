// ABOUTME: Prompt context builder merging a sample, unit statistics, and run summary
// ABOUTME: Produces a flat, deterministic key/value mapping with fixed numeric precision
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Context
//!
//! The text generation collaborator never sees raw telemetry: it receives a
//! [`PromptContext`], a flat string mapping whose numbers are already
//! formatted. Distances use one decimal (km), paces two decimals (min/km),
//! heart rates are integers. Keys are emitted only when their source value
//! is known, so the field set depends on the event type.

use std::collections::btree_map::Iter;
use std::collections::BTreeMap;

use runbuddy_core::constants::precision;
use runbuddy_core::constants::units::METERS_PER_KM;
use runbuddy_core::Sample;
use serde::{Deserialize, Serialize};

use crate::aggregation::UnitStats;
use crate::config::RunPlan;
use crate::run_tracker::RunSummary;

/// Context keys emitted by [`PromptContextBuilder`]
pub mod keys {
    /// Distance covered (km)
    pub const DONE_KM: &str = "done_km";
    /// Distance left to the planned total (km)
    pub const REMAIN_KM: &str = "remain_km";
    /// Instantaneous pace (min/km)
    pub const PACE_NOW: &str = "pace_now";
    /// Target pace (min/km)
    pub const PACE_OBJ: &str = "pace_obj";
    /// Current pace minus target pace (min/km)
    pub const PACE_GAP: &str = "pace_gap";
    /// Instantaneous heart rate (bpm)
    pub const HEART_RATE: &str = "heart_rate";
    /// Index of the reported unit
    pub const UNIT: &str = "unit";
    /// Average pace of the reported unit (min/km)
    pub const UNIT_AVG_PACE: &str = "unit_avg_pace";
    /// Pace CV of the reported unit
    pub const UNIT_PACE_CV: &str = "unit_pace_cv";
    /// Average heart rate of the reported unit (bpm)
    pub const UNIT_AVG_HR: &str = "unit_avg_hr";
    /// Average pace of the run so far (min/km)
    pub const PACE_AVG: &str = "pace_avg";
    /// Pace CV of the run so far
    pub const PACE_CV: &str = "pace_cv";
    /// Average heart rate of the run so far (bpm)
    pub const AVG_HR: &str = "avg_hr";
    /// Elapsed running time (minutes)
    pub const TIME_RUN_MIN: &str = "time_run_min";
    /// Distance covered in distance units
    pub const TOTAL_UNITS: &str = "total_units";
    /// Elapsed time minus the time the target pace allows for the distance done (minutes)
    pub const ETA_GAP_MIN: &str = "eta_gap_min";
}

/// Flat key/value context handed to the text generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptContext(BTreeMap<String, String>);

impl PromptContext {
    /// Formatted value for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether the key is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in key order
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.0.iter()
    }

    fn put(&mut self, key: &str, value: String) {
        self.0.insert(key.to_owned(), value);
    }
}

impl<'a> IntoIterator for &'a PromptContext {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn whole(value: f64) -> String {
    format!("{value:.0}")
}

/// Pure builder of [`PromptContext`] values for one run plan
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PromptContextBuilder {
    plan: RunPlan,
}

impl PromptContextBuilder {
    /// Builder for the given targets
    #[must_use]
    pub const fn new(plan: RunPlan) -> Self {
        Self { plan }
    }

    /// Targets used for gaps and remaining distance
    #[must_use]
    pub const fn plan(&self) -> &RunPlan {
        &self.plan
    }

    /// Merge the available inputs into one context
    ///
    /// Same inputs always produce the same mapping.
    #[must_use]
    pub fn build(
        &self,
        sample: Option<&Sample>,
        unit: Option<&UnitStats>,
        summary: Option<&RunSummary>,
    ) -> PromptContext {
        let mut context = PromptContext::default();
        if let Some(sample) = sample {
            self.add_sample(&mut context, sample);
        }
        if let Some(unit) = unit {
            Self::add_unit(&mut context, unit);
        }
        if let Some(summary) = summary {
            self.add_summary(&mut context, summary, sample);
        }
        context
    }

    fn add_sample(&self, context: &mut PromptContext, sample: &Sample) {
        let done_km = sample.distance_km();
        context.put(keys::DONE_KM, fixed(done_km, precision::DISTANCE));
        if let Some(total_m) = self.plan.total_distance_m {
            let remain_km = ((total_m - sample.distance_m) / METERS_PER_KM).max(0.0);
            context.put(keys::REMAIN_KM, fixed(remain_km, precision::DISTANCE));
        }
        context.put(
            keys::PACE_NOW,
            fixed(sample.pace_min_per_km, precision::PACE),
        );
        if let Some(target) = self.plan.target_pace_min_per_km {
            context.put(keys::PACE_OBJ, fixed(target, precision::PACE));
            context.put(
                keys::PACE_GAP,
                fixed(sample.pace_min_per_km - target, precision::PACE),
            );
        }
        if let Some(hr) = sample.heart_rate_bpm {
            context.put(keys::HEART_RATE, hr.to_string());
        }
    }

    fn add_unit(context: &mut PromptContext, unit: &UnitStats) {
        context.put(keys::UNIT, unit.unit_index.to_string());
        context.put(keys::UNIT_AVG_PACE, fixed(unit.avg_pace, precision::PACE));
        context.put(keys::UNIT_PACE_CV, fixed(unit.pace_cv, precision::CV));
        if let Some(hr) = unit.avg_heart_rate {
            context.put(keys::UNIT_AVG_HR, whole(hr));
        }
    }

    fn add_summary(&self, context: &mut PromptContext, summary: &RunSummary, sample: Option<&Sample>) {
        context.put(keys::PACE_AVG, fixed(summary.avg_pace, precision::PACE));
        context.put(keys::PACE_CV, fixed(summary.pace_cv, precision::CV));
        context.put(
            keys::TIME_RUN_MIN,
            fixed(summary.duration_minutes, precision::MINUTES),
        );
        context.put(
            keys::TOTAL_UNITS,
            fixed(summary.total_distance_units, precision::UNIT_COUNT),
        );
        if let Some(hr) = summary.avg_heart_rate {
            context.put(keys::AVG_HR, whole(hr));
        }
        if let (Some(target), Some(sample)) = (self.plan.target_pace_min_per_km, sample) {
            let eta_gap = summary.duration_minutes - target * sample.distance_km();
            context.put(keys::ETA_GAP_MIN, fixed(eta_gap, precision::MINUTES));
        }
    }
}
