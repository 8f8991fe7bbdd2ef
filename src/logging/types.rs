//! Core logging types: step entries, status, and the [`Log`] trait.

/// One pipeline step recorded for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// Human-readable step name.
    pub name: String,
    /// Outcome of the step.
    pub status: StepStatus,
    /// Optional detail (counts, reason for a warning).
    pub message: Option<String>,
}

/// Outcome of a recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step produced its output.
    Ok,
    /// The step completed but reported contention or validation warnings.
    Warned,
    /// The step only described what it would do.
    DryRun,
    /// The step did not apply to this configuration.
    Skipped,
}

/// Abstraction over logging backends.
///
/// Commands log through this trait so tests can substitute a recorder.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>);
}
