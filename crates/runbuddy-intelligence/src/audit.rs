// ABOUTME: Append-only audit log of coaching events and the replies produced for them
// ABOUTME: Entries are timestamped at write time and exportable as JSON for offline review
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Audit Log
//!
//! Every fired trigger and every manual coaching request leaves one entry,
//! including requests answered by the fallback message. Entries are never
//! mutated after they are written.

use chrono::{DateTime, Utc};
use runbuddy_core::{AppResult, EventKind, Sample};
use serde::{Deserialize, Serialize};

use crate::aggregation::UnitStats;
use crate::context::PromptContext;
use crate::triggers::TriggerEvent;

/// Prefix of the message shown when the text generator could not answer
pub const FALLBACK_PREFIX: &str = "⚠️ Coach unavailable";

/// Coaching text delivered to the runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachReply {
    /// Text shown to the runner
    pub text: String,
    /// Why the generator failed, when `text` is the fallback message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl CoachReply {
    /// Reply produced by the text generator
    #[must_use]
    pub fn generated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fallback_reason: None,
        }
    }

    /// Placeholder reply when generation failed
    #[must_use]
    pub fn fallback(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            text: format!("{FALLBACK_PREFIX}: {reason}"),
            fallback_reason: Some(reason),
        }
    }

    /// Whether this reply is the fallback message
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// One audited coaching interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// UTC write time
    pub ts: DateTime<Utc>,
    /// Event that caused the request
    pub event: EventKind,
    /// Context given to the text generator
    pub context: PromptContext,
    /// Triggering sample, absent for requests made without telemetry
    pub data: Option<Sample>,
    /// Unit statistics attached to unit recaps
    pub unit_stats: Option<UnitStats>,
    /// Text delivered to the runner
    pub response: String,
    /// Generator failure, if the response is the fallback message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Per-run, append-only list of [`AuditEntry`] values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    /// Empty log
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record one interaction, stamped with the current UTC time
    pub fn append(
        &mut self,
        event: EventKind,
        context: PromptContext,
        data: Option<Sample>,
        unit_stats: Option<UnitStats>,
        reply: &CoachReply,
    ) -> &AuditEntry {
        let index = self.entries.len();
        self.entries.push(AuditEntry {
            ts: Utc::now(),
            event,
            context,
            data,
            unit_stats,
            response: reply.text.clone(),
            fallback_reason: reply.fallback_reason.clone(),
        });
        &self.entries[index]
    }

    /// Record the reply given for a fired trigger
    pub fn append_event(&mut self, event: TriggerEvent, reply: &CoachReply) -> &AuditEntry {
        self.append(
            event.kind,
            event.context,
            Some(event.sample),
            event.unit_stats,
            reply,
        )
    }

    /// Entries in write order
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, used when a new run starts
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Pretty JSON array of all entries
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}
