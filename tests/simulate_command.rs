#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for simulation playback.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use repoplan_cli::config::PlanConfig;
use repoplan_cli::simulation::{LogEntryType, Playback, RecordingSink, render_simulation_log};

#[test]
fn playback_streams_compiled_plan() {
    let compilation = compile_default(&PlanConfig::default());
    let entries = render_simulation_log(&compilation.change_plan);
    assert_eq!(entries.len(), compilation.change_plan.operations.len());

    let sink = Arc::new(RecordingSink::new());
    let mut playback = Playback::new(sink.clone(), Duration::from_millis(1));
    playback.start(entries.clone()).unwrap();
    playback.wait().unwrap();

    let played = sink.entries();
    assert_eq!(played, entries);
    assert_eq!(played.last().unwrap().kind, LogEntryType::Success);
}

#[test]
fn restarting_with_new_plan_replaces_log() {
    let first = render_simulation_log(&compile_default(&PlanConfig::default()).change_plan);
    let mut config = PlanConfig::default();
    config.docs.readme = false;
    let second = render_simulation_log(&compile_default(&config).change_plan);

    let sink = Arc::new(RecordingSink::new());
    let mut playback = Playback::new(sink.clone(), Duration::from_millis(1));
    playback.start(first).unwrap();
    playback.start(second.clone()).unwrap();
    playback.wait().unwrap();

    assert_eq!(sink.entries(), second);
    assert_eq!(sink.resets(), 2);
}

#[test]
fn stopped_playback_emits_nothing_more() {
    let entries = render_simulation_log(&compile_default(&PlanConfig::default()).change_plan);
    let sink = Arc::new(RecordingSink::new());
    let mut playback = Playback::new(sink.clone(), Duration::from_secs(60));
    playback.start(entries).unwrap();
    playback.stop().unwrap();
    assert!(!playback.is_running());
    assert!(sink.entries().is_empty());
    assert!(!sink.is_finished());
}
