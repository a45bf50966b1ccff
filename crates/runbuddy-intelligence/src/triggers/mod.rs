// ABOUTME: Edge-triggered coaching rules evaluated once per telemetry sample
// ABOUTME: Defines the rule capability trait, the closed rule set, and the fired event type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Triggers
//!
//! A trigger is a named condition evaluated against each sample and the run
//! tracker. Rules own their state (a fired flag, the last unit reported) and
//! belong to one [`TriggerEngine`], which is rebuilt or reset for every run.
//!
//! New rule types are added as new [`TriggerRule`] variants implementing
//! [`TriggerCheck`].

mod engine;
mod rules;

pub use engine::TriggerEngine;
pub use rules::{NewUnitCompleteRule, PaceTooSlowRule, RunStartRule};

use runbuddy_core::{EventKind, Sample};
use serde::{Deserialize, Serialize};

use crate::aggregation::UnitStats;
use crate::context::{PromptContext, PromptContextBuilder};
use crate::run_tracker::RunTracker;

/// Capability shared by every coaching rule
pub trait TriggerCheck {
    /// Event kind reported when the rule fires
    fn kind(&self) -> EventKind;

    /// Evaluate the rule for one sample; may update the rule's own state
    fn check(&mut self, sample: &Sample, tracker: &RunTracker) -> bool;

    /// Statistics of the unit this rule reports on, if any
    fn completed_unit(&self, _tracker: &RunTracker) -> Option<UnitStats> {
        None
    }

    /// Structured context for the text generator after the rule fired
    fn build_context(
        &self,
        sample: &Sample,
        unit: Option<&UnitStats>,
        tracker: &RunTracker,
        builder: &PromptContextBuilder,
    ) -> PromptContext;

    /// Forget per-run state
    fn reset(&mut self);
}

/// Closed set of built-in coaching rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TriggerRule {
    /// First sample of the run
    RunStart(RunStartRule),
    /// A new distance unit was completed
    NewUnitComplete(NewUnitCompleteRule),
    /// Pace is behind target by more than the threshold
    PaceTooSlow(PaceTooSlowRule),
}

impl TriggerRule {
    fn as_check(&self) -> &dyn TriggerCheck {
        match self {
            Self::RunStart(rule) => rule,
            Self::NewUnitComplete(rule) => rule,
            Self::PaceTooSlow(rule) => rule,
        }
    }

    fn as_check_mut(&mut self) -> &mut dyn TriggerCheck {
        match self {
            Self::RunStart(rule) => rule,
            Self::NewUnitComplete(rule) => rule,
            Self::PaceTooSlow(rule) => rule,
        }
    }
}

impl TriggerCheck for TriggerRule {
    fn kind(&self) -> EventKind {
        self.as_check().kind()
    }

    fn check(&mut self, sample: &Sample, tracker: &RunTracker) -> bool {
        self.as_check_mut().check(sample, tracker)
    }

    fn completed_unit(&self, tracker: &RunTracker) -> Option<UnitStats> {
        self.as_check().completed_unit(tracker)
    }

    fn build_context(
        &self,
        sample: &Sample,
        unit: Option<&UnitStats>,
        tracker: &RunTracker,
        builder: &PromptContextBuilder,
    ) -> PromptContext {
        self.as_check().build_context(sample, unit, tracker, builder)
    }

    fn reset(&mut self) {
        self.as_check_mut().reset();
    }
}

/// A rule that fired for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Which rule fired
    pub kind: EventKind,
    /// Context for the text generator
    pub context: PromptContext,
    /// Sample that made the rule fire
    pub sample: Sample,
    /// Statistics of the unit being reported, for unit recaps
    pub unit_stats: Option<UnitStats>,
}
