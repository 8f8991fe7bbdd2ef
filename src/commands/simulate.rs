//! Command: play the change plan back as a timed log.
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context as _, Result};

use super::{CommandSetup, write_stdout};
use crate::cli::{GlobalOpts, SimulateOpts};
use crate::logging::{Logger, StepStatus};
use crate::simulation::{LogEntryType, Playback, PlaybackSink, SimulationLogEntry, render_simulation_log};

/// How often the foreground thread checks for Ctrl-C and completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Prints entries to stdout as they arrive.
#[derive(Debug)]
struct ConsoleSink;

impl PlaybackSink for ConsoleSink {
    fn reset(&self) {}

    fn emit(&self, entry: &SimulationLogEntry) {
        let marker = match entry.kind {
            LogEntryType::Info => "\x1b[2m›\x1b[0m",
            LogEntryType::File => "\x1b[34m+\x1b[0m",
            LogEntryType::Success => "\x1b[32m✓\x1b[0m",
        };
        write_stdout(&format!("{marker} {}", entry.message)).ok();
    }
}

/// Stream the simulation log until it finishes or Ctrl-C is pressed.
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared, the Ctrl-C
/// handler cannot be installed, or the playback worker fails.
pub fn run(global: &GlobalOpts, opts: &SimulateOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let compilation = setup.compile(log);
    let entries = render_simulation_log(&compilation.change_plan);
    let total = entries.len();

    let (interrupt, interrupted) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = interrupt.send(());
    })
    .context("installing Ctrl-C handler")?;

    log.stage("Simulating bootstrap");
    let mut playback = Playback::new(Arc::new(ConsoleSink), Duration::from_millis(opts.tick_ms));
    playback.start(entries)?;

    let mut cancelled = false;
    while playback.is_running() {
        match interrupted.recv_timeout(POLL_INTERVAL) {
            Ok(()) => {
                playback.stop()?;
                cancelled = true;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => std::thread::sleep(POLL_INTERVAL),
        }
    }
    playback.wait()?;

    if cancelled {
        log.warn("simulation interrupted");
        log.record_step("simulate", StepStatus::Skipped, Some("interrupted"));
    } else {
        log.record_step("simulate", StepStatus::Ok, Some(&format!("{total} entries")));
    }
    log.print_summary();
    Ok(())
}
