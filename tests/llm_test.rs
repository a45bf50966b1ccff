// ABOUTME: Unit tests for coaching prompt rendering and the text generators
// ABOUTME: Covers field order, persona, offline templates, and Ollama connection failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{init_test_logging, sample_hr};
use runbuddy_coach::config::{CoachConfig, LlmConfig};
use runbuddy_coach::llm::prompts::render_context;
use runbuddy_coach::llm::{
    render_prompt, CoachTextGenerator, OllamaGenerator, TemplateGenerator, COACH_SYSTEM_PROMPT,
};
use runbuddy_coach::services::CoachingService;
use runbuddy_coach::{ErrorCode, EventKind, PromptContextBuilder, RunPlan, UnitStats};

fn unreachable_ollama() -> LlmConfig {
    LlmConfig {
        base_url: "http://127.0.0.1:1".to_owned(),
        model: "gemma:latest".to_owned(),
        timeout_secs: 5,
    }
}

#[test]
fn test_prompt_lists_fields_in_fixed_order() {
    let builder = PromptContextBuilder::new(RunPlan::new(5.0, 10_000.0));
    let context = builder.build(Some(&sample_hr(2400.0, 5.5, 161)), None, None);

    let prompt = render_prompt(EventKind::PaceSlow, &context);
    assert!(prompt.prompt.starts_with("=== Alert: pace behind target ==="));
    assert_eq!(prompt.system, COACH_SYSTEM_PROMPT);
    assert_eq!(prompt.context, context);

    let body = render_context(&context);
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Current data",
            "Distance covered (km): 2.4",
            "Distance remaining (km): 7.6",
            "Current pace (min/km): 5.50",
            "Target pace (min/km): 5.00",
            "Gap to target pace (min/km): 0.50",
            "Heart rate (bpm): 161",
        ]
    );
}

#[test]
fn test_every_event_has_its_own_header() {
    let builder = PromptContextBuilder::default();
    let context = builder.build(None, None, None);
    let headers: Vec<String> = [
        EventKind::RunStart,
        EventKind::NewUnit,
        EventKind::PaceSlow,
        EventKind::CoachRequest,
        EventKind::RunEnd,
    ]
    .into_iter()
    .map(|event| render_prompt(event, &context).prompt)
    .collect();

    for (i, header) in headers.iter().enumerate() {
        for other in &headers[i + 1..] {
            assert_ne!(header, other);
        }
    }
}

#[test]
fn test_split_header_does_not_assume_kilometres() {
    let context = PromptContextBuilder::default().build(None, None, None);
    let prompt = render_prompt(EventKind::NewUnit, &context).prompt;
    assert!(prompt.starts_with("=== Split recap: last distance unit ==="));
    assert!(!prompt.contains("kilometre"));
}

#[test]
fn test_persona_is_not_empty() {
    assert!(!COACH_SYSTEM_PROMPT.trim().is_empty());
}

#[test]
fn test_template_unit_recap() {
    let unit = UnitStats {
        unit_index: 3,
        avg_pace: 5.08,
        pace_cv: 0.021,
        avg_heart_rate: Some(149.0),
        sample_count: 10,
    };
    let context = PromptContextBuilder::default().build(None, Some(&unit), None);

    let text = TemplateGenerator::render(EventKind::NewUnit, &context);
    assert!(text.contains("Unit 3 done at 5.08 min/km"));
    assert!(text.contains("149 bpm"));
}

#[test]
fn test_template_never_invents_missing_values() {
    let context = PromptContextBuilder::default().build(None, None, None);
    let text = TemplateGenerator::render(EventKind::RunStart, &context);
    assert!(!text.contains("Target pace"));
    assert!(!text.contains("Heart rate"));
}

#[tokio::test]
async fn test_template_generator_answers_prompt() {
    let builder = PromptContextBuilder::new(RunPlan::new(5.0, 10_000.0));
    let context = builder.build(Some(&sample_hr(600.0, 5.6, 165)), None, None);
    let prompt = render_prompt(EventKind::PaceSlow, &context);

    let generator = TemplateGenerator::new();
    assert_eq!(generator.name(), "template");
    let text = generator.generate(&prompt).await.unwrap();
    assert!(text.contains("5.60 min/km"));
    assert!(text.contains("0.60 behind"));
}

#[tokio::test]
async fn test_ollama_unreachable_is_external_service_error() {
    init_test_logging();
    let generator = OllamaGenerator::new(unreachable_ollama()).unwrap();
    assert_eq!(generator.name(), "ollama");

    let context = PromptContextBuilder::default().build(None, None, None);
    let prompt = render_prompt(EventKind::RunStart, &context);
    let error = generator.generate(&prompt).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_service_falls_back_when_ollama_is_down() {
    init_test_logging();
    let config = CoachConfig {
        llm: unreachable_ollama(),
        ..CoachConfig::default()
    };
    let generator = OllamaGenerator::new(config.llm.clone()).unwrap();
    let service = CoachingService::new(config, Arc::new(generator)).unwrap();
    service.start_run(None).await.unwrap();

    let outcome = service.tick(sample_hr(30.0, 5.2, 140)).await.unwrap();
    let reply = outcome.message.unwrap();
    assert!(reply.is_fallback());
    assert_eq!(
        service.audit_entries().await.unwrap()[0].fallback_reason,
        reply.fallback_reason
    );
}
