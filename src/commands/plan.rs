//! Command: print the change plan.
use anyhow::Result;

use super::{CommandSetup, print_json};
use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Print the materialized [`ChangePlan`](crate::engine::ChangePlan).
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let compilation = setup.compile(log);
    print_json(&compilation.change_plan)?;
    log.print_summary();
    Ok(())
}
