// ABOUTME: Distance-based aggregation of live telemetry into units and sub-segments
// ABOUTME: Re-exports segment and unit aggregators with their exported records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Fixed-length sub-segment of a unit
mod segment;
/// One full distance unit
mod unit;

pub use segment::{SegmentAggregator, SegmentRecord};
pub use unit::{DistanceUnitAggregator, UnitRecord, UnitStats};
