//! Command: render publisher artifacts.
use anyhow::Result;

use super::{CommandSetup, print_json};
use crate::cli::{GlobalOpts, RenderOpts};
use crate::logging::{Logger, StepStatus};
use crate::renderer::{RenderOptions, render_publisher_artifacts};

/// Print the rendered artifacts.
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared.
pub fn run(global: &GlobalOpts, opts: &RenderOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let compilation = setup.compile(log);

    log.stage("Rendering artifacts");
    let artifacts = render_publisher_artifacts(
        &setup.config,
        &compilation.repo_spec,
        RenderOptions {
            dry_run: global.dry_run,
            enable_rust_experimental: opts.power,
        },
    );
    for artifact in &artifacts {
        if global.dry_run {
            log.dry_run(&artifact.description);
        } else {
            log.debug(&artifact.description);
        }
    }
    let status = if global.dry_run {
        StepStatus::DryRun
    } else {
        StepStatus::Ok
    };
    log.record_step(
        "render artifacts",
        status,
        Some(&format!("{} artifact(s)", artifacts.len())),
    );

    print_json(&artifacts)?;
    log.print_summary();
    Ok(())
}
