// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults for segmentation and triggers, unit conversions, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large file.

/// Unit conversion and measurement constants
pub mod units {
    /// Metres in one kilometre
    pub const METERS_PER_KM: f64 = 1000.0;
}

/// Default values used when no configuration overrides them
pub mod defaults {
    /// Length of one distance unit (one kilometre)
    pub const UNIT_LENGTH_M: u32 = 1000;
    /// Length of one sub-segment inside a unit
    pub const SEGMENT_LENGTH_M: u32 = 100;
    /// Pace gap (min/km) above which the runner is considered too slow
    pub const PACE_SLOW_THRESHOLD_MIN_PER_KM: f64 = 0.20;
    /// Base URL of the local Ollama server
    pub const LLM_BASE_URL: &str = "http://localhost:11434";
    /// Model used for coaching messages
    pub const LLM_MODEL: &str = "gemma:latest";
    /// Hard limit for one text generation call
    pub const LLM_TIMEOUT_SECS: u64 = 180;
    /// Service name reported in structured logs
    pub const SERVICE_NAME: &str = "runbuddy-coach";
}

/// Output formatting precision for prompt contexts
pub mod precision {
    /// Decimal places for distances (km)
    pub const DISTANCE: usize = 1;
    /// Decimal places for paces (min/km)
    pub const PACE: usize = 2;
    /// Decimal places for coefficients of variation
    pub const CV: usize = 3;
    /// Decimal places for durations (minutes)
    pub const MINUTES: usize = 1;
    /// Decimal places for distance covered expressed in units
    pub const UNIT_COUNT: usize = 2;
}

/// Environment variable names read by the service configuration
pub mod env_config {
    /// Distance unit length in metres
    pub const UNIT_LENGTH_M: &str = "RUNBUDDY_UNIT_LENGTH_M";
    /// Segment length in metres
    pub const SEGMENT_LENGTH_M: &str = "RUNBUDDY_SEGMENT_LENGTH_M";
    /// Slow-pace alert threshold in min/km
    pub const PACE_SLOW_THRESHOLD: &str = "RUNBUDDY_PACE_SLOW_THRESHOLD";
    /// Default target pace in min/km
    pub const TARGET_PACE: &str = "RUNBUDDY_TARGET_PACE";
    /// Default planned run distance in metres
    pub const TOTAL_DISTANCE_M: &str = "RUNBUDDY_TOTAL_DISTANCE_M";
    /// Start a run implicitly when a tick arrives without one
    pub const AUTO_START: &str = "RUNBUDDY_AUTO_START";
    /// Text generation server base URL
    pub const LLM_BASE_URL: &str = "RUNBUDDY_LLM_BASE_URL";
    /// Text generation model
    pub const LLM_MODEL: &str = "RUNBUDDY_LLM_MODEL";
    /// Text generation timeout in seconds
    pub const LLM_TIMEOUT_SECS: &str = "RUNBUDDY_LLM_TIMEOUT_SECS";
}
