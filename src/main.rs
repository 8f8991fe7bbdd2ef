//! `repoplan` command-line entry point.
use anyhow::Result;
use clap::Parser;

use repoplan_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command.name();
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    match &args.command {
        cli::Command::Compile(opts) => commands::compile::run(&args.global, opts, &log),
        cli::Command::Plan => commands::plan::run(&args.global, &log),
        cli::Command::Diff(opts) => commands::diff::run(&args.global, opts, &log),
        cli::Command::Recommend => commands::recommend::run(&args.global, &log),
        cli::Command::Render(opts) => commands::render::run(&args.global, opts, &log),
        cli::Command::Publish(opts) => commands::publish::run(&args.global, opts, &log),
        cli::Command::Simulate(opts) => commands::simulate::run(&args.global, opts, &log),
        cli::Command::Explain => commands::explain::run(&args.global, &log),
        cli::Command::Presets => commands::presets::run(),
        cli::Command::Completions(opts) => {
            commands::completions::run(opts);
            Ok(())
        }
        cli::Command::Version => commands::version::run(),
    }
}
