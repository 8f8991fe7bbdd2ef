//! Command: compile the configuration into a repository specification.
use anyhow::{Context as _, Result};

use super::{CommandSetup, print_json, write_stdout};
use crate::cli::{CompileOpts, GlobalOpts};
use crate::engine::fingerprint::fingerprint;
use crate::logging::Logger;

/// Print the compiled [`RepoSpec`](crate::engine::RepoSpec), or just its
/// fingerprint.
///
/// # Errors
///
/// Returns an error if the configuration cannot be prepared or the output
/// cannot be written.
pub fn run(global: &GlobalOpts, opts: &CompileOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let compilation = setup.compile(log);

    if opts.fingerprint {
        let hex = fingerprint(&compilation.repo_spec).context("fingerprinting specification")?;
        write_stdout(&hex)?;
    } else {
        print_json(&compilation.repo_spec)?;
    }

    log.print_summary();
    Ok(())
}
