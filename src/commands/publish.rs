//! Command: map the change plan onto a publish target.
use anyhow::Result;

use super::{CommandSetup, print_json};
use crate::cli::{GlobalOpts, PublishOpts};
use crate::logging::{Log, Logger, StepStatus};
use crate::publisher::{PublishOptions, PublisherAction, UserMode, publish_from_change_plan};

/// Compile and describe publishing to the requested target.
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared.
pub fn publisher_actions(
    global: &GlobalOpts,
    opts: &PublishOpts,
    log: &dyn Log,
) -> Result<Vec<PublisherAction>> {
    let setup = CommandSetup::init(global, log)?;
    let compilation = setup.compile(log);

    let options = PublishOptions {
        dry_run: global.dry_run,
        user_mode: if opts.power {
            UserMode::Power
        } else {
            UserMode::Basic
        },
        target: opts.target.into(),
    };
    log.stage(&format!("Publishing to {}", options.target.prefix()));
    let actions = publish_from_change_plan(
        &setup.config,
        &compilation.repo_spec,
        &compilation.change_plan,
        options,
    );
    for action in &actions {
        let line = format!("{} {}", action.action, action.target);
        if global.dry_run {
            log.dry_run(&line);
        } else {
            log.debug(&line);
        }
    }
    log.record_step(
        "map publisher actions",
        if global.dry_run {
            StepStatus::DryRun
        } else {
            StepStatus::Ok
        },
        Some(&format!("{} action(s)", actions.len())),
    );
    Ok(actions)
}

/// Print the publisher actions.
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared.
pub fn run(global: &GlobalOpts, opts: &PublishOpts, log: &Logger) -> Result<()> {
    let actions = publisher_actions(global, opts, log)?;
    print_json(&actions)?;
    log.print_summary();
    Ok(())
}
