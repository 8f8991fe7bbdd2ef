//! Command: rank automation profiles.
use anyhow::Result;

use super::{CommandSetup, print_json};
use crate::cli::GlobalOpts;
use crate::engine::recommend_automation_candidates;
use crate::logging::Logger;

/// Print the three automation candidates, best first.
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let compilation = setup.compile(log);
    let candidates = recommend_automation_candidates(&setup.config, &compilation.repo_spec);
    let [best, ..] = &candidates;
    log.info(&format!("best fit: {} ({})", best.label, best.score));
    print_json(&candidates)?;
    Ok(())
}
