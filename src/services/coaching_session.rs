// ABOUTME: Coaching session service owning the single active run and its tracker, triggers, and audit log
// ABOUTME: Drives sample ingestion, text generation with fallback, manual coaching, and run end reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Session Service
//!
//! Exactly one run is active at a time. Its tracker, trigger engine and audit
//! log sit behind one async mutex so that absorbing a sample and evaluating
//! the triggers is a single step. Text generation runs after the lock is
//! released; the reply is audited once the lock is taken again, provided the
//! same run is still active.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use runbuddy_core::{AppError, AppResult, EventKind, Sample};
use runbuddy_intelligence::{
    AuditEntry, AuditLog, CoachReply, PromptContext, RunPlan, RunSummary, RunTracker,
    TriggerEngine, UnitRecord, UnitStats,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CoachConfig;
use crate::llm::{render_prompt, CoachTextGenerator, OllamaGenerator};

/// Confirmation returned when a run starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStarted {
    /// Identifier of the new run
    pub run_id: Uuid,
    /// UTC start time
    pub started_at: DateTime<Utc>,
    /// Targets in effect for the run
    pub plan: RunPlan,
}

/// Result of ingesting one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Run that absorbed the sample
    pub run_id: Uuid,
    /// Event fired by the sample, if any
    pub event: Option<EventKind>,
    /// Coaching message delivered for the event
    pub message: Option<CoachReply>,
}

/// Everything known about a run once it ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier of the finished run
    pub run_id: Uuid,
    /// UTC start time
    pub started_at: DateTime<Utc>,
    /// UTC end time
    pub ended_at: DateTime<Utc>,
    /// Final statistics, `None` when no sample was absorbed
    pub summary: Option<RunSummary>,
    /// Per-unit history export
    pub history: Vec<UnitRecord>,
    /// Audit entries of the run, including the final summary message
    pub audit: Vec<AuditEntry>,
    /// Closing coaching message, `None` when no sample was absorbed
    pub message: Option<CoachReply>,
}

#[derive(Debug)]
struct ActiveRun {
    id: Uuid,
    started_at: DateTime<Utc>,
    plan: RunPlan,
    tracker: RunTracker,
    engine: TriggerEngine,
    audit: AuditLog,
    last_sample: Option<Sample>,
}

/// Owning layer of the coaching engine
pub struct CoachingService {
    config: CoachConfig,
    generator: Arc<dyn CoachTextGenerator>,
    active: Mutex<Option<ActiveRun>>,
}

impl CoachingService {
    /// Create a service with no active run
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error if the configuration is invalid.
    pub fn new(config: CoachConfig, generator: Arc<dyn CoachTextGenerator>) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            active: Mutex::new(None),
        })
    }

    /// Create a service from environment variables, generating text with Ollama
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn from_env() -> AppResult<Self> {
        let config = CoachConfig::from_env()?;
        let generator = OllamaGenerator::new(config.llm.clone())?;
        Self::new(config, Arc::new(generator))
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Identifier of the active run, if any
    pub async fn active_run_id(&self) -> Option<Uuid> {
        self.active.lock().await.as_ref().map(|run| run.id)
    }

    /// Start a new run, replacing any active one
    ///
    /// Trigger state and the audit log start empty. Without a plan the
    /// configured default plan applies.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error if the plan is invalid.
    pub async fn start_run(&self, plan: Option<RunPlan>) -> AppResult<RunStarted> {
        let run = self.new_run(plan.unwrap_or(self.config.default_plan))?;
        let started = RunStarted {
            run_id: run.id,
            started_at: run.started_at,
            plan: run.plan,
        };

        let mut active = self.active.lock().await;
        if let Some(previous) = active.replace(run) {
            info!(run_id = %previous.id, "Replacing active run");
        }
        info!(run_id = %started.run_id, "Run started");
        Ok(started)
    }

    /// Ingest one sample and deliver the coaching message it triggers
    ///
    /// # Errors
    ///
    /// Returns `NO_ACTIVE_RUN` when no run is active and auto start is off,
    /// or `INVALID_SAMPLE` when the sample is rejected. A rejected sample
    /// leaves the run untouched.
    pub async fn tick(&self, sample: Sample) -> AppResult<TickOutcome> {
        sample.validate()?;

        let (run_id, fired) = {
            let mut active = self.active.lock().await;
            if active.is_none() {
                if !self.config.auto_start {
                    return Err(AppError::no_active_run());
                }
                let run = self.new_run(self.config.default_plan)?;
                info!(run_id = %run.id, "Run started implicitly by first sample");
                *active = Some(run);
            }
            let run = active.as_mut().ok_or_else(AppError::no_active_run)?;

            if let Err(e) = run.tracker.add_sample(&sample) {
                warn!(run_id = %run.id, error = %e, "Rejected sample");
                return Err(e.into());
            }
            run.last_sample = Some(sample);
            (run.id, run.engine.evaluate(&sample, &run.tracker))
        };

        let Some(event) = fired else {
            return Ok(TickOutcome {
                run_id,
                event: None,
                message: None,
            });
        };

        let kind = event.kind;
        let reply = self.generate_reply(kind, &event.context).await;
        self.audit_if_current(run_id, |audit| {
            audit.append_event(event, &reply);
        })
        .await;

        Ok(TickOutcome {
            run_id,
            event: Some(kind),
            message: Some(reply),
        })
    }

    /// Ask the coach for advice outside the trigger rules
    ///
    /// The sample, when given, describes the runner's current state for this
    /// request only; it is not absorbed by the tracker. Without one the last
    /// absorbed sample is used.
    ///
    /// # Errors
    ///
    /// Returns `NO_ACTIVE_RUN` when no run is active or `INVALID_SAMPLE` for
    /// an invalid sample.
    pub async fn coach(&self, sample: Option<Sample>) -> AppResult<CoachReply> {
        if let Some(sample) = &sample {
            sample.validate()?;
        }

        let (run_id, data, unit_stats, context) = {
            let active = self.active.lock().await;
            let run = active.as_ref().ok_or_else(AppError::no_active_run)?;
            let data = sample.or(run.last_sample);
            let unit_stats = run.tracker.current_unit_stats();
            let context = run.engine.context_builder().build(
                data.as_ref(),
                unit_stats.as_ref(),
                run.tracker.summarize().as_ref(),
            );
            (run.id, data, unit_stats, context)
        };

        info!(run_id = %run_id, "Manual coaching request");
        let reply = self
            .generate_reply(EventKind::CoachRequest, &context)
            .await;
        self.audit_if_current(run_id, |audit| {
            audit.append(EventKind::CoachRequest, context, data, unit_stats, &reply);
        })
        .await;
        Ok(reply)
    }

    /// End the active run and produce its report
    ///
    /// A closing summary message is generated and audited when at least one
    /// sample was absorbed.
    ///
    /// # Errors
    ///
    /// Returns `NO_ACTIVE_RUN` when no run is active.
    pub async fn end_run(&self) -> AppResult<RunReport> {
        let mut run = self
            .active
            .lock()
            .await
            .take()
            .ok_or_else(AppError::no_active_run)?;

        let summary = run.tracker.summarize();
        let mut message = None;
        if let Some(summary) = &summary {
            let context = run.engine.context_builder().build(
                run.last_sample.as_ref(),
                None,
                Some(summary),
            );
            let reply = self.generate_reply(EventKind::RunEnd, &context).await;
            run.audit
                .append(EventKind::RunEnd, context, run.last_sample, None, &reply);
            message = Some(reply);
        }

        info!(
            run_id = %run.id,
            units = run.tracker.units().len(),
            audit_entries = run.audit.len(),
            "Run ended"
        );
        Ok(RunReport {
            run_id: run.id,
            started_at: run.started_at,
            ended_at: Utc::now(),
            summary,
            history: run.tracker.history(),
            audit: run.audit.entries().to_vec(),
            message,
        })
    }

    /// Per-unit history of the active run
    ///
    /// # Errors
    ///
    /// Returns `NO_ACTIVE_RUN` when no run is active.
    pub async fn history(&self) -> AppResult<Vec<UnitRecord>> {
        let active = self.active.lock().await;
        let run = active.as_ref().ok_or_else(AppError::no_active_run)?;
        Ok(run.tracker.history())
    }

    /// Summary of the active run so far
    ///
    /// # Errors
    ///
    /// Returns `NO_ACTIVE_RUN` when no run is active.
    pub async fn summary(&self) -> AppResult<Option<RunSummary>> {
        let active = self.active.lock().await;
        let run = active.as_ref().ok_or_else(AppError::no_active_run)?;
        Ok(run.tracker.summarize())
    }

    /// Statistics of a unit of the active run
    ///
    /// # Errors
    ///
    /// Returns `NO_ACTIVE_RUN` when no run is active.
    pub async fn unit_stats(&self, unit_index: u32) -> AppResult<Option<UnitStats>> {
        let active = self.active.lock().await;
        let run = active.as_ref().ok_or_else(AppError::no_active_run)?;
        Ok(run.tracker.unit_stats(unit_index))
    }

    /// Audit entries of the active run
    ///
    /// # Errors
    ///
    /// Returns `NO_ACTIVE_RUN` when no run is active.
    pub async fn audit_entries(&self) -> AppResult<Vec<AuditEntry>> {
        let active = self.active.lock().await;
        let run = active.as_ref().ok_or_else(AppError::no_active_run)?;
        Ok(run.audit.entries().to_vec())
    }

    fn new_run(&self, plan: RunPlan) -> AppResult<ActiveRun> {
        Ok(ActiveRun {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            plan,
            tracker: RunTracker::new(self.config.tracker)?,
            engine: TriggerEngine::new(plan, &self.config.triggers)?,
            audit: AuditLog::new(),
            last_sample: None,
        })
    }

    async fn audit_if_current(&self, run_id: Uuid, record: impl FnOnce(&mut AuditLog) + Send) {
        let mut active = self.active.lock().await;
        let Some(run) = active.as_mut().filter(|run| run.id == run_id) else {
            debug!(run_id = %run_id, "Run ended before the reply arrived; not audited");
            return;
        };
        record(&mut run.audit);
    }

    async fn generate_reply(&self, event: EventKind, context: &PromptContext) -> CoachReply {
        let prompt = render_prompt(event, context);
        let generator = self.generator.name();
        let limit = self.config.llm.timeout();

        let failure = match timeout(limit, self.generator.generate(&prompt)).await {
            Ok(Ok(text)) => {
                debug!(%event, generator, chars = text.len(), "Coaching message generated");
                return CoachReply::generated(text);
            }
            Ok(Err(e)) => e,
            Err(_) => AppError::external_timeout(generator, self.config.llm.timeout_secs),
        };

        warn!(
            %event,
            generator,
            error = %failure,
            "Coach text generation failed, delivering fallback message"
        );
        CoachReply::fallback(failure.message)
    }
}
