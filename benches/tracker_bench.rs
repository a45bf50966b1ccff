// ABOUTME: Criterion benchmarks for the per-sample hot path of a live run
// ABOUTME: Measures sample absorption, trigger evaluation, summaries, and history export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for run tracking.
//!
//! Every telemetry tick absorbs one sample and evaluates the triggers, so
//! that path must stay well below the sampling interval.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use runbuddy_coach::{RunPlan, RunTracker, Sample, TrackerConfig, TriggerConfig, TriggerEngine};

/// Run lengths in metres, sampled every 10 m
const RUN_LENGTHS_M: [u32; 3] = [5_000, 10_000, 42_195];

fn generate_samples(length_m: u32) -> Vec<Sample> {
    (0..length_m / 10)
        .map(|step| {
            let wobble = f64::from(step % 7) * 0.05;
            Sample {
                distance_m: f64::from(step * 10),
                pace_min_per_km: 5.0 + wobble,
                heart_rate_bpm: Some(140 + step % 25),
            }
        })
        .collect()
}

fn tracked_run(samples: &[Sample]) -> RunTracker {
    let mut tracker = RunTracker::new(TrackerConfig::default()).unwrap();
    for sample in samples {
        let _ = tracker.add_sample(sample);
    }
    tracker
}

fn bench_live_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_ticks");

    for length_m in RUN_LENGTHS_M {
        let samples = generate_samples(length_m);
        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("add_sample_and_evaluate", length_m),
            &samples,
            |b, samples| {
                b.iter(|| {
                    let mut tracker = RunTracker::new(TrackerConfig::default()).unwrap();
                    let plan = RunPlan::new(5.1, f64::from(length_m));
                    let mut engine = TriggerEngine::new(plan, &TriggerConfig::default()).unwrap();
                    let mut fired = 0_usize;
                    for sample in samples {
                        if tracker.add_sample(sample).is_ok()
                            && engine.evaluate(sample, &tracker).is_some()
                        {
                            fired += 1;
                        }
                    }
                    black_box(fired)
                });
            },
        );
    }

    group.finish();
}

fn bench_run_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_reports");

    for length_m in RUN_LENGTHS_M {
        let tracker = tracked_run(&generate_samples(length_m));
        group.bench_with_input(BenchmarkId::new("summarize", length_m), &tracker, |b, t| {
            b.iter(|| black_box(t.summarize()));
        });
        group.bench_with_input(BenchmarkId::new("history", length_m), &tracker, |b, t| {
            b.iter(|| black_box(t.history()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_live_ticks, bench_run_reports);
criterion_main!(benches);
