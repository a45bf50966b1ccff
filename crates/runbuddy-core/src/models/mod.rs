// ABOUTME: Core data models shared by the aggregation engine and the coaching service
// ABOUTME: Re-exports telemetry samples and coaching event kinds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Coaching event kinds
mod event;
/// Telemetry sample
mod sample;

pub use event::EventKind;
pub use sample::Sample;
