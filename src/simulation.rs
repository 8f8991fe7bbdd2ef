//! Simulated bootstrap output.
//!
//! [`render_simulation_log`] turns a change plan into log entries and
//! [`Playback`] streams them to a [`PlaybackSink`] one tick at a time on a
//! worker thread. A run can be stopped at any point; starting a new run
//! always stops the previous one first and clears the sink.
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::{ChangePlan, OperationType};
use crate::error::PlaybackError;

/// Default delay between streamed entries.
pub const SIMULATION_TICK_MS: u64 = 400;

/// Kind of a streamed log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEntryType {
    /// Progress message.
    Info,
    /// A file was created.
    File,
    /// The plan completed.
    Success,
}

/// One streamed line of a simulated bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationLogEntry {
    /// Id of the operation it came from.
    pub id: String,
    /// Line kind.
    #[serde(rename = "type")]
    pub kind: LogEntryType,
    /// Text shown to the user.
    pub message: String,
    /// Created file, for `file` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// One entry per operation, in plan order.
#[must_use]
pub fn render_simulation_log(plan: &ChangePlan) -> Vec<SimulationLogEntry> {
    plan.operations
        .iter()
        .map(|op| SimulationLogEntry {
            id: op.id.clone(),
            kind: match op.kind {
                OperationType::CreateFile => LogEntryType::File,
                OperationType::Complete => LogEntryType::Success,
                _ => LogEntryType::Info,
            },
            message: op.message.clone(),
            file_name: op.target.clone(),
        })
        .collect()
}

/// Receives streamed entries. Called from the playback worker thread.
pub trait PlaybackSink: Send + Sync {
    /// Clear anything shown by a previous run.
    fn reset(&self);

    /// Show one entry.
    fn emit(&self, entry: &SimulationLogEntry);

    /// Every entry of the run was emitted.
    fn finish(&self) {}
}

struct Run {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// A restartable, cancelable playback loop.
pub struct Playback {
    tick: Duration,
    sink: Arc<dyn PlaybackSink>,
    run: Option<Run>,
}

impl fmt::Debug for Playback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playback")
            .field("tick", &self.tick)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl Playback {
    /// Idle playback that emits to `sink` every `tick`.
    #[must_use]
    pub fn new(sink: Arc<dyn PlaybackSink>, tick: Duration) -> Self {
        Self {
            tick,
            sink,
            run: None,
        }
    }

    /// Stream `entries`, replacing any run in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous worker panicked or a new worker
    /// cannot be spawned.
    pub fn start(&mut self, entries: Vec<SimulationLogEntry>) -> Result<(), PlaybackError> {
        self.stop()?;
        self.sink.reset();

        let (stop, stopped) = mpsc::channel::<()>();
        let sink = Arc::clone(&self.sink);
        let tick = self.tick;
        let handle = thread::Builder::new()
            .name("playback".to_string())
            .spawn(move || {
                for entry in &entries {
                    match stopped.recv_timeout(tick) {
                        Err(RecvTimeoutError::Timeout) => sink.emit(entry),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
                sink.finish();
            })
            .map_err(PlaybackError::Spawn)?;

        tracing::debug!(tick_ms = tick.as_millis(), "playback started");
        self.run = Some(Run { stop, handle });
        Ok(())
    }

    /// Cancel the current run, if any, and wait for its worker to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::WorkerPanicked`] if the worker panicked.
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        let Some(run) = self.run.take() else {
            return Ok(());
        };
        // The worker may already be done, in which case nobody is listening.
        let _ = run.stop.send(());
        run.handle
            .join()
            .map_err(|_| PlaybackError::WorkerPanicked)?;
        tracing::debug!("playback stopped");
        Ok(())
    }

    /// Block until the current run has emitted every entry.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::WorkerPanicked`] if the worker panicked.
    pub fn wait(&mut self) -> Result<(), PlaybackError> {
        let Some(Run { stop, handle }) = self.run.take() else {
            return Ok(());
        };
        let joined = handle.join();
        drop(stop);
        joined.map_err(|_| PlaybackError::WorkerPanicked)
    }

    /// Whether a worker is still emitting.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|run| !run.handle.is_finished())
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Keeps every emitted entry in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<SimulationLogEntry>>,
    resets: AtomicUsize,
    finished: AtomicBool,
}

impl RecordingSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries emitted since the last reset.
    #[must_use]
    pub fn entries(&self) -> Vec<SimulationLogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times playback restarted.
    #[must_use]
    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::Acquire)
    }

    /// Whether the last run played to the end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

impl PlaybackSink for RecordingSink {
    fn reset(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.finished.store(false, Ordering::Release);
        self.resets.fetch_add(1, Ordering::AcqRel);
    }

    fn emit(&self, entry: &SimulationLogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::engine::{compile_repo_spec, materialize_change_plan};
    use crate::packs::{OwnerOverrides, PackCatalog};
    use std::time::Instant;

    fn default_log() -> Vec<SimulationLogEntry> {
        let spec = compile_repo_spec(
            &PlanConfig::default(),
            &PackCatalog::builtin(),
            &OwnerOverrides::new(),
        );
        render_simulation_log(&materialize_change_plan(&spec))
    }

    fn entry(id: &str) -> SimulationLogEntry {
        SimulationLogEntry {
            id: id.to_string(),
            kind: LogEntryType::Info,
            message: id.to_string(),
            file_name: None,
        }
    }

    #[test]
    fn log_entry_types_follow_operations() {
        let log = default_log();
        assert_eq!(log[0].id, "init");
        assert_eq!(log[0].kind, LogEntryType::Info);
        let files: Vec<&SimulationLogEntry> =
            log.iter().filter(|e| e.kind == LogEntryType::File).collect();
        assert_eq!(files.len(), 11);
        assert!(files.iter().all(|e| e.file_name.is_some()));
        let last = log.last().unwrap();
        assert_eq!(last.kind, LogEntryType::Success);
        assert_eq!(last.message, "Bootstrap complete. Ready to code.");
        assert_eq!(last.file_name, None);
    }

    #[test]
    fn log_entry_serializes_file_name() {
        let log = default_log();
        let file = log.iter().find(|e| e.kind == LogEntryType::File).unwrap();
        let json = serde_json::to_value(file).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["fileName"], ".env.example");
    }

    #[test]
    fn plays_every_entry_in_order() {
        let sink = Arc::new(RecordingSink::new());
        let mut playback = Playback::new(sink.clone(), Duration::from_millis(1));
        let entries = default_log();
        playback.start(entries.clone()).unwrap();
        playback.wait().unwrap();
        assert_eq!(sink.entries(), entries);
        assert!(sink.is_finished());
        assert!(!playback.is_running());
    }

    #[test]
    fn stop_cancels_promptly() {
        let sink = Arc::new(RecordingSink::new());
        let mut playback = Playback::new(sink.clone(), Duration::from_secs(30));
        playback.start(vec![entry("a"), entry("b")]).unwrap();
        let started = Instant::now();
        playback.stop().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(sink.entries().is_empty());
        assert!(!sink.is_finished());
    }

    #[test]
    fn restart_replaces_previous_run() {
        let sink = Arc::new(RecordingSink::new());
        let mut playback = Playback::new(sink.clone(), Duration::from_millis(1));
        playback.start(vec![entry("a"), entry("b"), entry("c")]).unwrap();
        playback.start(vec![entry("x")]).unwrap();
        playback.wait().unwrap();
        assert_eq!(sink.entries(), vec![entry("x")]);
        assert_eq!(sink.resets(), 2);
    }

    #[test]
    fn stop_without_run_is_noop() {
        let sink = Arc::new(RecordingSink::new());
        let mut playback = Playback::new(sink, Duration::from_millis(1));
        playback.stop().unwrap();
        playback.wait().unwrap();
        assert!(!playback.is_running());
    }

    #[test]
    fn drop_stops_worker() {
        let sink = Arc::new(RecordingSink::new());
        {
            let mut playback = Playback::new(sink.clone(), Duration::from_secs(30));
            playback.start(vec![entry("a")]).unwrap();
            assert!(playback.is_running());
        }
        assert!(sink.entries().is_empty());
    }
}
