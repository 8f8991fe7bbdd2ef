//! Command: diff the change plans of two configurations.
use anyhow::Result;

use super::{CommandSetup, print_json};
use crate::cli::{DiffOpts, GlobalOpts};
use crate::engine::{ChangePlanDiff, build_change_plan_diff};
use crate::logging::{Log, Logger, StepStatus};

/// Compile both configurations with the same presets and overrides and
/// diff the resulting plans.
///
/// # Errors
///
/// Returns an error if either configuration cannot be prepared.
pub fn diff_configs(global: &GlobalOpts, opts: &DiffOpts, log: &dyn Log) -> Result<ChangePlanDiff> {
    let before = CommandSetup::from_path(Some(&opts.before), global, log)?.compile(log);
    let after = CommandSetup::from_path(Some(&opts.after), global, log)?.compile(log);
    let diff = build_change_plan_diff(&before.change_plan, &after.change_plan);

    let detail = format!("{} added, {} removed", diff.added.len(), diff.removed.len());
    log.info(&detail);
    log.record_step("diff plans", StepStatus::Ok, Some(&detail));
    Ok(diff)
}

/// Print the operations added and removed between two configurations.
///
/// # Errors
///
/// Returns an error if either configuration cannot be prepared.
pub fn run(global: &GlobalOpts, opts: &DiffOpts, log: &Logger) -> Result<()> {
    let diff = diff_configs(global, opts, log)?;
    print_json(&diff)?;
    log.print_summary();
    Ok(())
}
