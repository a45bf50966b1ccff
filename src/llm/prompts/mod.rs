// ABOUTME: Coach persona and per-event prompt rendering for text generation
// ABOUTME: Renders a prompt context as an event header followed by labelled lines in a fixed order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Prompts
//!
//! The persona is loaded at compile time from a markdown file. Prompt bodies
//! are rendered from a [`PromptContext`] in a fixed field order, so the same
//! context always yields the same prompt text.

use std::fmt::Write;

use runbuddy_core::EventKind;
use runbuddy_intelligence::context::keys;
use runbuddy_intelligence::PromptContext;

use super::CoachPrompt;

/// `RunBuddy` coach persona used as the system prompt
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Field order and labels of rendered prompts
const FIELD_LABELS: &[(&str, &str)] = &[
    (keys::DONE_KM, "Distance covered (km)"),
    (keys::REMAIN_KM, "Distance remaining (km)"),
    (keys::PACE_NOW, "Current pace (min/km)"),
    (keys::PACE_OBJ, "Target pace (min/km)"),
    (keys::PACE_GAP, "Gap to target pace (min/km)"),
    (keys::HEART_RATE, "Heart rate (bpm)"),
    (keys::UNIT, "Completed unit"),
    (keys::UNIT_AVG_PACE, "Unit average pace (min/km)"),
    (keys::UNIT_PACE_CV, "Unit pace variability (CV)"),
    (keys::UNIT_AVG_HR, "Unit average heart rate (bpm)"),
    (keys::PACE_AVG, "Run average pace (min/km)"),
    (keys::PACE_CV, "Run pace variability (CV)"),
    (keys::AVG_HR, "Run average heart rate (bpm)"),
    (keys::TIME_RUN_MIN, "Time running (min)"),
    (keys::TOTAL_UNITS, "Distance units covered"),
    (keys::ETA_GAP_MIN, "Time behind target (min)"),
];

/// Header placed before the data for each event kind
#[must_use]
pub const fn event_header(event: EventKind) -> &'static str {
    match event {
        EventKind::RunStart => {
            "=== Run start ===\n(Greet the runner and set the tone for the run)"
        }
        EventKind::NewUnit => "=== Split recap: last distance unit ===",
        EventKind::PaceSlow => {
            "=== Alert: pace behind target ===\n(React with short, incisive advice)"
        }
        EventKind::CoachRequest => {
            "=== The runner asks for advice ===\n(Give a full assessment of the current situation)"
        }
        EventKind::RunEnd => {
            "=== Run finished ===\n(Summarize the run and give one thing to work on next time)"
        }
    }
}

/// Render the context as labelled lines, known fields first in fixed order
#[must_use]
pub fn render_context(context: &PromptContext) -> String {
    let mut body = String::from("Current data\n");
    for (key, label) in FIELD_LABELS {
        if let Some(value) = context.get(key) {
            // Writing into a String cannot fail
            let _ = writeln!(body, "{label}: {value}");
        }
    }
    for (key, value) in context {
        if !FIELD_LABELS.iter().any(|(known, _)| *known == key.as_str()) {
            let _ = writeln!(body, "{key}: {value}");
        }
    }
    body
}

/// Build the full prompt for an event
#[must_use]
pub fn render_prompt(event: EventKind, context: &PromptContext) -> CoachPrompt {
    CoachPrompt {
        event,
        system: COACH_SYSTEM_PROMPT.to_owned(),
        prompt: format!("{}\n\n{}", event_header(event), render_context(context)),
        context: context.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_pace_header_asks_for_short_advice() {
        assert!(event_header(EventKind::PaceSlow).contains("short, incisive advice"));
    }

    #[test]
    fn test_empty_context_renders_title_only() {
        let prompt = render_prompt(EventKind::RunStart, &PromptContext::default());
        assert!(prompt.prompt.starts_with("=== Run start ==="));
        assert!(prompt.prompt.ends_with("Current data\n"));
        assert_eq!(prompt.system, COACH_SYSTEM_PROMPT);
    }
}
