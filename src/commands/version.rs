//! Command: print version information.
use anyhow::Result;

use super::write_stdout;

/// Print the repoplan version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    let version = option_env!("REPOPLAN_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    write_stdout(&format!("repoplan {version}"))
}
