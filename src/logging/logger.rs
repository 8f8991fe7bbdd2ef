//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{Log, StepEntry, StepStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// `record_step` is not included because its signature differs from the
/// `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// All messages are also written to a persistent log file at
/// `$XDG_CACHE_HOME/repoplan/<command>.log` (default
/// `~/.cache/repoplan/<command>.log`) with timestamps and ANSI codes
/// stripped, regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary. The file
    /// itself is created by [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded steps.
    #[must_use]
    pub fn step_entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Print the summary of all recorded steps.
    pub fn print_summary(&self) {
        let steps = self.step_entries();
        if steps.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut warned = 0u32;
        let mut dry_run = 0u32;
        let mut skipped = 0u32;

        for step in &steps {
            let (icon, color) = match step.status {
                StepStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                StepStatus::Warned => {
                    warned += 1;
                    ("!", "\x1b[33m")
                }
                StepStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                StepStatus::Skipped => {
                    skipped += 1;
                    ("·", "\x1b[2m")
                }
            };

            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", step.name));
        }

        let total = ok + warned + dry_run + skipped;
        self.info(&format!(
            "{total} steps: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{warned} warned\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[2m{skipped} skipped\x1b[0m"
        ));

        if let Some(path) = self.log_path() {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        self.record_step(name, status, message);
    }
}
