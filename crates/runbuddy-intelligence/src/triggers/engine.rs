// ABOUTME: Trigger engine evaluating coaching rules in priority order for each sample
// ABOUTME: First matching rule wins, so at most one coaching event fires per sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use runbuddy_core::Sample;
use tracing::{debug, info};

use super::{
    NewUnitCompleteRule, PaceTooSlowRule, RunStartRule, TriggerCheck, TriggerEvent, TriggerRule,
};
use crate::config::{ConfigError, RunPlan, TriggerConfig};
use crate::context::PromptContextBuilder;
use crate::run_tracker::RunTracker;

/// Ordered rule list owned by one run
///
/// Rules are checked in order and evaluation stops at the first rule whose
/// check returns true; later rules do not see that sample, so their state is
/// left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEngine {
    rules: Vec<TriggerRule>,
    builder: PromptContextBuilder,
}

impl TriggerEngine {
    /// Engine with the built-in rules: run start, new unit, pace too slow
    ///
    /// # Errors
    ///
    /// Returns an error if the thresholds or the plan are invalid.
    pub fn new(plan: RunPlan, config: &TriggerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        plan.validate()?;
        let rules = vec![
            TriggerRule::RunStart(RunStartRule::default()),
            TriggerRule::NewUnitComplete(NewUnitCompleteRule::default()),
            TriggerRule::PaceTooSlow(PaceTooSlowRule::new(
                config.pace_slow_threshold,
                plan.target_pace_min_per_km,
            )),
        ];
        Ok(Self::with_rules(rules, PromptContextBuilder::new(plan)))
    }

    /// Engine with a custom rule order
    #[must_use]
    pub const fn with_rules(rules: Vec<TriggerRule>, builder: PromptContextBuilder) -> Self {
        Self { rules, builder }
    }

    /// Rules in priority order
    #[must_use]
    pub fn rules(&self) -> &[TriggerRule] {
        &self.rules
    }

    /// Context builder shared by every rule
    #[must_use]
    pub const fn context_builder(&self) -> &PromptContextBuilder {
        &self.builder
    }

    /// Evaluate the rules for a sample already absorbed by `tracker`
    pub fn evaluate(&mut self, sample: &Sample, tracker: &RunTracker) -> Option<TriggerEvent> {
        let position = self
            .rules
            .iter_mut()
            .position(|rule| rule.check(sample, tracker))?;
        let rule = self.rules.get(position)?;

        let unit_stats = rule.completed_unit(tracker);
        let context = rule.build_context(sample, unit_stats.as_ref(), tracker, &self.builder);
        info!(
            event = %rule.kind(),
            distance_m = sample.distance_m,
            pace = sample.pace_min_per_km,
            "coaching trigger fired"
        );
        Some(TriggerEvent {
            kind: rule.kind(),
            context,
            sample: *sample,
            unit_stats,
        })
    }

    /// Clear every rule's per-run state
    pub fn reset(&mut self) {
        debug!("resetting trigger state");
        for rule in &mut self.rules {
            rule.reset();
        }
    }
}
