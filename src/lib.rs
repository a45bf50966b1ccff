// ABOUTME: Main library entry point for the RunBuddy live running coach
// ABOUTME: Wires the aggregation engine to text generation, configuration, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `RunBuddy` Coach
//!
//! Turns a live stream of running telemetry into per-kilometre statistics
//! and short coaching messages.
//!
//! ## Architecture
//!
//! - **`runbuddy-core`**: errors, the telemetry `Sample`, event kinds, constants
//! - **`runbuddy-intelligence`**: run tracker, trigger engine, prompt context, audit log
//! - **services**: the coaching session owning the single active run
//! - **llm**: text generator contract, Ollama client, offline templates
//! - **config** and **logging**: environment-driven setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use runbuddy_coach::config::CoachConfig;
//! use runbuddy_coach::llm::TemplateGenerator;
//! use runbuddy_coach::services::CoachingService;
//! use runbuddy_coach::{AppResult, RunPlan, Sample};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let service = CoachingService::new(CoachConfig::default(), Arc::new(TemplateGenerator))?;
//!     service.start_run(Some(RunPlan::new(5.0, 10_000.0))).await?;
//!
//!     let outcome = service.tick(Sample::new(50.0, 5.1, Some(150))?).await?;
//!     if let Some(message) = outcome.message {
//!         println!("{}", message.text);
//!     }
//!
//!     let report = service.end_run().await?;
//!     println!("{} units recorded", report.history.len());
//!     Ok(())
//! }
//! ```

/// Environment-driven service configuration
pub mod config;

/// Coaching text generators and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Replay of recorded sample streams
pub mod replay;

/// Coaching session service
pub mod services;

pub use runbuddy_core::{constants, errors, models};
pub use runbuddy_core::{AppError, AppResult, ErrorCode, EventKind, Sample, SampleError};
pub use runbuddy_intelligence::{
    aggregation, audit, context, run_tracker, statistics, triggers, AuditEntry, AuditLog,
    CoachReply, ConfigError, PromptContext, PromptContextBuilder, RunPlan, RunSummary, RunTracker,
    TrackerConfig, TriggerConfig, TriggerEngine, TriggerEvent, TriggerRule, UnitRecord, UnitStats,
    FALLBACK_PREFIX,
};
