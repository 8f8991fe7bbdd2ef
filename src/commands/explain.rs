//! Command: explain the compiled plan.
use anyhow::Result;

use super::{CommandSetup, print_json};
use crate::cli::GlobalOpts;
use crate::engine::decisions::create_engine_decisions;
use crate::logging::Logger;

/// Print one decision payload per pipeline stage.
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let compilation = setup.compile(log);
    let decisions = create_engine_decisions(
        &setup.config,
        &compilation.repo_spec,
        &compilation.change_plan,
    );
    print_json(&decisions)
}
