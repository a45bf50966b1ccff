// ABOUTME: Service configuration aggregating segmentation, triggers, run plan, and text generation
// ABOUTME: Environment loading lives in the environment submodule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the coaching service
//!
//! Environment-only configuration: every setting has a default and can be
//! overridden with a `RUNBUDDY_*` variable (see [`CoachConfig::from_env`]).

/// Environment variable loading
pub mod environment;

use std::time::Duration;

use runbuddy_core::constants::defaults;
use runbuddy_core::{AppError, AppResult};
use runbuddy_intelligence::{RunPlan, TrackerConfig, TriggerConfig};
use serde::{Deserialize, Serialize};

/// Text generation server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama-compatible server
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Hard limit for one generation call, in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LLM_BASE_URL.to_owned(),
            model: defaults::LLM_MODEL.to_owned(),
            timeout_secs: defaults::LLM_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Generation timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete configuration of the coaching service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Distance segmentation for every run
    pub tracker: TrackerConfig,
    /// Trigger thresholds for every run
    pub triggers: TriggerConfig,
    /// Plan used when a run starts implicitly or without explicit targets
    pub default_plan: RunPlan,
    /// Start a run implicitly when a tick arrives without an active run
    pub auto_start: bool,
    /// Text generation settings
    pub llm: LlmConfig,
}

impl CoachConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error for the first invalid value.
    pub fn validate(&self) -> AppResult<()> {
        self.tracker.validate()?;
        self.triggers.validate()?;
        self.default_plan.validate()?;
        if self.llm.timeout_secs == 0 {
            return Err(AppError::config_invalid("llm timeout must be > 0 seconds"));
        }
        Ok(())
    }
}
