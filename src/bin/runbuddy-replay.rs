// ABOUTME: RunBuddy replay CLI feeding a recorded run through the coaching session
// ABOUTME: Prints coaching messages as they fire and writes run history and audit log as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Replay with the local Ollama model
//! runbuddy-replay run.json --target-pace 5.0 --total-distance 10000
//!
//! # Replay offline and keep the history and audit files
//! runbuddy-replay run.json --offline --history-out history.json --audit-out audit.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use runbuddy_coach::config::CoachConfig;
use runbuddy_coach::llm::{CoachTextGenerator, OllamaGenerator, TemplateGenerator};
use runbuddy_coach::logging::{LogFormat, LoggingConfig};
use runbuddy_coach::replay::{load_samples, replay, write_json};
use runbuddy_coach::services::CoachingService;
use runbuddy_coach::{AppResult, RunPlan, Sample};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "runbuddy-replay",
    about = "Replay a recorded run through the RunBuddy coach",
    long_about = "Feeds a JSON array of telemetry samples through a coaching session, printing every coaching message as it fires."
)]
struct Cli {
    /// JSON file holding an array of samples
    samples: PathBuf,

    /// Target pace in min/km (overrides RUNBUDDY_TARGET_PACE)
    #[arg(long)]
    target_pace: Option<f64>,

    /// Planned distance in metres (overrides RUNBUDDY_TOTAL_DISTANCE_M)
    #[arg(long)]
    total_distance: Option<f64>,

    /// Write the per-unit history to this file
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Write the audit log to this file
    #[arg(long)]
    audit_out: Option<PathBuf>,

    /// Use the built-in templates instead of the language model
    #[arg(long)]
    offline: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: if cli.verbose { "debug" } else { "info" }.to_owned(),
        format: LogFormat::Compact,
        ..LoggingConfig::from_env()
    };
    if let Err(e) = logging.init() {
        eprintln!("Logging disabled: {e}");
    }

    let config = CoachConfig::from_env()?;
    let plan = RunPlan {
        target_pace_min_per_km: cli
            .target_pace
            .or(config.default_plan.target_pace_min_per_km),
        total_distance_m: cli.total_distance.or(config.default_plan.total_distance_m),
    };

    let generator: Arc<dyn CoachTextGenerator> = if cli.offline {
        Arc::new(TemplateGenerator::new())
    } else {
        Arc::new(OllamaGenerator::new(config.llm.clone())?)
    };
    info!(generator = generator.name(), "Starting replay");
    let service = CoachingService::new(config, generator)?;

    let samples = load_samples(&cli.samples).await?;
    let outcome = replay(&service, Some(plan), &samples).await?;

    for message in &outcome.messages {
        let distance_km = samples
            .get(message.sample_index)
            .map_or(0.0, Sample::distance_km);
        println!("[{distance_km:>5.1} km] {}: {}", message.event, message.reply.text);
    }
    if let Some(closing) = &outcome.report.message {
        println!("[  end   ] {}", closing.text);
    }
    if !outcome.rejected.is_empty() {
        println!("Skipped {} invalid samples", outcome.rejected.len());
    }

    if let Some(path) = &cli.history_out {
        write_json(path, &outcome.report.history).await?;
        info!(path = %path.display(), "History written");
    }
    if let Some(path) = &cli.audit_out {
        write_json(path, &outcome.report.audit).await?;
        info!(path = %path.display(), "Audit log written");
    }
    Ok(())
}
