// ABOUTME: Offline coaching text generator filling fixed sentences from the prompt context
// ABOUTME: Used for replays and environments without a language model server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use runbuddy_core::{AppResult, EventKind};
use runbuddy_intelligence::context::keys;
use runbuddy_intelligence::PromptContext;

use super::{CoachPrompt, CoachTextGenerator};

/// Deterministic generator that never leaves the process
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Create the generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Message for an event, built only from fields present in the context
    #[must_use]
    pub fn render(event: EventKind, context: &PromptContext) -> String {
        let field = |key: &str| context.get(key).unwrap_or("?");
        let mut parts = Vec::new();
        match event {
            EventKind::RunStart => {
                parts.push("Let's go! Settle into your rhythm.".to_owned());
                if let Some(target) = context.get(keys::PACE_OBJ) {
                    parts.push(format!("Target pace today is {target} min/km."));
                }
            }
            EventKind::NewUnit => {
                parts.push(format!(
                    "Unit {} done at {} min/km (pace CV {}).",
                    field(keys::UNIT),
                    field(keys::UNIT_AVG_PACE),
                    field(keys::UNIT_PACE_CV)
                ));
                if let Some(hr) = context.get(keys::UNIT_AVG_HR) {
                    parts.push(format!("Average heart rate {hr} bpm."));
                }
            }
            EventKind::PaceSlow => {
                parts.push(format!(
                    "You're at {} min/km, {} behind your {} target. Shorten your stride and lift your cadence.",
                    field(keys::PACE_NOW),
                    field(keys::PACE_GAP),
                    field(keys::PACE_OBJ)
                ));
            }
            EventKind::CoachRequest => {
                parts.push(format!(
                    "{} km done at {} min/km.",
                    field(keys::DONE_KM),
                    field(keys::PACE_NOW)
                ));
                if let Some(remain) = context.get(keys::REMAIN_KM) {
                    parts.push(format!("{remain} km to go."));
                }
            }
            EventKind::RunEnd => {
                parts.push(format!(
                    "Run complete: {} units at an average of {} min/km in {} min.",
                    field(keys::TOTAL_UNITS),
                    field(keys::PACE_AVG),
                    field(keys::TIME_RUN_MIN)
                ));
            }
        }
        if let Some(hr) = context.get(keys::HEART_RATE) {
            if event != EventKind::NewUnit {
                parts.push(format!("Heart rate {hr} bpm."));
            }
        }
        parts.join(" ")
    }
}

#[async_trait]
impl CoachTextGenerator for TemplateGenerator {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn generate(&self, prompt: &CoachPrompt) -> AppResult<String> {
        Ok(Self::render(prompt.event, &prompt.context))
    }
}
