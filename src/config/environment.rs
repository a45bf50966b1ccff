// ABOUTME: Environment variable loading for the coaching service configuration
// ABOUTME: Parses RUNBUDDY_* variables over defaults and rejects unparsable or out-of-range values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use runbuddy_core::constants::env_config;
use runbuddy_core::{AppError, AppResult};
use runbuddy_intelligence::{RunPlan, TrackerConfig, TriggerConfig};
use tracing::info;

use super::{CoachConfig, LlmConfig};

impl CoachConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `RUNBUDDY_UNIT_LENGTH_M`, `RUNBUDDY_SEGMENT_LENGTH_M`,
    /// `RUNBUDDY_PACE_SLOW_THRESHOLD`, `RUNBUDDY_TARGET_PACE`,
    /// `RUNBUDDY_TOTAL_DISTANCE_M`, `RUNBUDDY_AUTO_START`,
    /// `RUNBUDDY_LLM_BASE_URL`, `RUNBUDDY_LLM_MODEL` and
    /// `RUNBUDDY_LLM_TIMEOUT_SECS`. Unset or empty variables keep their default.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error if a value cannot be parsed or is out
    /// of range.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let config = Self {
            tracker: TrackerConfig {
                unit_length_m: env_parse_or(
                    env_config::UNIT_LENGTH_M,
                    defaults.tracker.unit_length_m,
                )?,
                segment_length_m: env_parse_or(
                    env_config::SEGMENT_LENGTH_M,
                    defaults.tracker.segment_length_m,
                )?,
            },
            triggers: TriggerConfig {
                pace_slow_threshold: env_parse_or(
                    env_config::PACE_SLOW_THRESHOLD,
                    defaults.triggers.pace_slow_threshold,
                )?,
            },
            default_plan: RunPlan {
                target_pace_min_per_km: env_parse_optional(env_config::TARGET_PACE)?,
                total_distance_m: env_parse_optional(env_config::TOTAL_DISTANCE_M)?,
            },
            auto_start: env_bool_or(env_config::AUTO_START, defaults.auto_start)?,
            llm: LlmConfig {
                base_url: env_string_or(env_config::LLM_BASE_URL, &defaults.llm.base_url),
                model: env_string_or(env_config::LLM_MODEL, &defaults.llm.model),
                timeout_secs: env_parse_or(
                    env_config::LLM_TIMEOUT_SECS,
                    defaults.llm.timeout_secs,
                )?,
            },
        };
        config.validate()?;

        info!(
            unit_length_m = config.tracker.unit_length_m,
            segment_length_m = config.tracker.segment_length_m,
            pace_slow_threshold = config.triggers.pace_slow_threshold,
            auto_start = config.auto_start,
            llm.model = %config.llm.model,
            "Coaching configuration loaded"
        );
        Ok(config)
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn env_string_or(key: &str, default: &str) -> String {
    env_value(key).unwrap_or_else(|| default.to_owned())
}

fn env_parse_optional<T>(key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    env_value(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))
            })
        })
        .transpose()
}

fn env_parse_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(env_parse_optional(key)?.unwrap_or(default))
}

fn env_bool_or(key: &str, default: bool) -> AppResult<bool> {
    match env_value(key).map(|raw| raw.to_lowercase()).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(AppError::config_invalid(format!(
            "Invalid {key} value '{other}': expected a boolean"
        ))),
    }
}

