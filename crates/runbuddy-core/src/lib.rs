// ABOUTME: Core types and constants for the RunBuddy live running coach
// ABOUTME: Foundation crate with error handling, telemetry samples, event kinds, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `RunBuddy` Core
//!
//! Foundation crate providing shared types and constants for the `RunBuddy`
//! live coaching engine. This crate is designed to change infrequently, so the
//! aggregation engine and the service layer can evolve on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and sample validation errors
//! - **constants**: Defaults, unit conversions, and environment variable names
//! - **models**: Telemetry `Sample` and coaching `EventKind`

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (telemetry samples, coaching event kinds)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode, SampleError};
pub use models::{EventKind, Sample};
