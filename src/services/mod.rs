// ABOUTME: Service layer owning run lifecycle on top of the aggregation and trigger engine
// ABOUTME: Reusable from the replay CLI and any transport that exposes start, tick, coach, and end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Service layer
//!
//! Services are transport-agnostic: the replay binary and any request layer
//! call the same operations and get the same rules.

/// Single active run: sample ingestion, coaching messages, and run reports
pub mod coaching_session;

pub use coaching_session::{CoachingService, RunReport, RunStarted, TickOutcome};
