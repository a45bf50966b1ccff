// ABOUTME: Text generation abstraction turning a coaching prompt into a natural-language message
// ABOUTME: Defines the async generator contract plus the Ollama and offline template generators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Text Generators
//!
//! The session service never formats coaching text itself. It renders a
//! [`CoachPrompt`] from the structured context and hands it to a
//! [`CoachTextGenerator`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use runbuddy_coach::llm::{render_prompt, CoachTextGenerator, OllamaGenerator};
//! use runbuddy_coach::{EventKind, PromptContext};
//!
//! async fn example() -> runbuddy_coach::AppResult<()> {
//!     let generator = OllamaGenerator::from_env()?;
//!     let prompt = render_prompt(EventKind::RunStart, &PromptContext::default());
//!     let text = generator.generate(&prompt).await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

mod ollama;
pub mod prompts;
mod template;

pub use ollama::OllamaGenerator;
pub use prompts::{render_prompt, COACH_SYSTEM_PROMPT};
pub use template::TemplateGenerator;

use async_trait::async_trait;
use runbuddy_core::{AppResult, EventKind};
use runbuddy_intelligence::PromptContext;
use serde::{Deserialize, Serialize};

/// Fully rendered request for one coaching message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachPrompt {
    /// Event the message answers
    pub event: EventKind,
    /// Coach persona
    pub system: String,
    /// Event header followed by the labelled context lines
    pub prompt: String,
    /// Structured context the prompt was rendered from
    pub context: PromptContext,
}

/// Contract for anything that can write a coaching message
#[async_trait]
pub trait CoachTextGenerator: Send + Sync {
    /// Short identifier used in logs and fallback reasons
    fn name(&self) -> &'static str;

    /// Produce the coaching text for a prompt
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers with an
    /// unusable response.
    async fn generate(&self, prompt: &CoachPrompt) -> AppResult<String>;
}
