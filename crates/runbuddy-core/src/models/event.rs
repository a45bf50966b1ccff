// ABOUTME: Coaching event kinds fired by triggers or requested by the runner
// ABOUTME: Stable wire names used in prompt headers and audit log entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of coaching event sent to the text generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// First sample of a run
    RunStart,
    /// A full distance unit has been completed
    NewUnit,
    /// Current pace is behind target by more than the threshold
    PaceSlow,
    /// The runner asked for feedback explicitly
    CoachRequest,
    /// The run was ended and summarized
    RunEnd,
}

impl EventKind {
    /// Wire name of the event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunStart => "RUN_START",
            Self::NewUnit => "NEW_UNIT",
            Self::PaceSlow => "PACE_SLOW",
            Self::CoachRequest => "COACH_REQUEST",
            Self::RunEnd => "RUN_END",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
