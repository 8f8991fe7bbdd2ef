//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::publisher::PublishTarget;
use crate::simulation::SIMULATION_TICK_MS;

/// Top-level CLI entry point for the repository blueprint compiler.
#[derive(Parser, Debug)]
#[command(
    name = "repoplan",
    about = "Compile repository blueprints into packs, governance and bootstrap plans",
    version
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file (TOML, or JSON for `.json` paths); defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Preset bundle to layer onto the configuration (repeatable)
    #[arg(long = "preset", global = true, value_name = "ID")]
    pub presets: Vec<String>,

    /// Force the owner of a capability (repeatable)
    #[arg(long = "owner", global = true, value_name = "CAPABILITY=PACK")]
    pub owners: Vec<String>,

    /// Describe render and publish steps as previews
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile the configuration into a repository specification
    Compile(CompileOpts),
    /// Print the ordered bootstrap change plan
    Plan,
    /// Compare the change plans of two configuration files
    Diff(DiffOpts),
    /// Rank automation profiles against the configured noise budget
    Recommend,
    /// Render the artifacts publishing would produce
    Render(RenderOpts),
    /// Map the change plan onto a publish target's actions
    Publish(PublishOpts),
    /// Play the change plan back as a timed log
    Simulate(SimulateOpts),
    /// Explain the decisions behind the compiled plan
    Explain,
    /// List the available preset bundles
    Presets,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the command's log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Compile(_) => "compile",
            Self::Plan => "plan",
            Self::Diff(_) => "diff",
            Self::Recommend => "recommend",
            Self::Render(_) => "render",
            Self::Publish(_) => "publish",
            Self::Simulate(_) => "simulate",
            Self::Explain => "explain",
            Self::Presets => "presets",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `compile` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct CompileOpts {
    /// Print only the SHA-256 fingerprint of the compiled specification
    #[arg(long)]
    pub fingerprint: bool,
}

/// Options for the `diff` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DiffOpts {
    /// Configuration before the change
    pub before: PathBuf,
    /// Configuration after the change
    pub after: PathBuf,
}

/// Options for the `render` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct RenderOpts {
    /// Enable power-user renderers (experimental Rust synthesis)
    #[arg(long)]
    pub power: bool,
}

/// Publish targets as spelled on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetArg {
    /// Write into the local working copy
    #[default]
    Local,
    /// Stage on branches and open a pull request
    Pr,
    /// Create and seed a new hosted repository
    CreateRepo,
}

impl From<TargetArg> for PublishTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Local => Self::Local,
            TargetArg::Pr => Self::Pr,
            TargetArg::CreateRepo => Self::CreateRepo,
        }
    }
}

/// Options for the `publish` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct PublishOpts {
    /// Where the plan would be published
    #[arg(long, value_enum, default_value_t = TargetArg::Local)]
    pub target: TargetArg,

    /// Enable power-user renderers (experimental Rust synthesis)
    #[arg(long)]
    pub power: bool,
}

/// Options for the `simulate` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SimulateOpts {
    /// Delay between log entries in milliseconds
    #[arg(long, default_value_t = SIMULATION_TICK_MS)]
    pub tick_ms: u64,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_compile_with_config() {
        let cli = Cli::parse_from(["repoplan", "--config", "plan.toml", "compile"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("plan.toml")));
        assert!(matches!(cli.command, Command::Compile(_)));
    }

    #[test]
    fn parse_config_short() {
        let cli = Cli::parse_from(["repoplan", "-c", "plan.json", "plan"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("plan.json")));
        assert!(matches!(cli.command, Command::Plan));
    }

    #[test]
    fn parse_repeated_presets_and_owners() {
        let cli = Cli::parse_from([
            "repoplan",
            "--preset",
            "bundle.stack.go-api",
            "--preset",
            "bundle.governance.enterprise",
            "compile",
            "--owner",
            "release:ownership=pack.release.gh-release",
        ]);
        assert_eq!(
            cli.global.presets,
            vec!["bundle.stack.go-api", "bundle.governance.enterprise"]
        );
        assert_eq!(cli.global.owners, vec!["release:ownership=pack.release.gh-release"]);
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["repoplan", "-d", "render"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_diff_paths() {
        let cli = Cli::parse_from(["repoplan", "diff", "a.toml", "b.toml"]);
        let Command::Diff(opts) = cli.command else {
            panic!("expected diff command");
        };
        assert_eq!(opts.before, PathBuf::from("a.toml"));
        assert_eq!(opts.after, PathBuf::from("b.toml"));
    }

    #[test]
    fn publish_defaults_to_local() {
        let cli = Cli::parse_from(["repoplan", "publish"]);
        let Command::Publish(opts) = cli.command else {
            panic!("expected publish command");
        };
        assert_eq!(opts.target, TargetArg::Local);
        assert!(!opts.power);
    }

    #[test]
    fn publish_target_kebab_case() {
        let cli = Cli::parse_from(["repoplan", "publish", "--target", "create-repo", "--power"]);
        let Command::Publish(opts) = cli.command else {
            panic!("expected publish command");
        };
        assert_eq!(PublishTarget::from(opts.target), PublishTarget::CreateRepo);
        assert!(opts.power);
    }

    #[test]
    fn simulate_default_tick() {
        let cli = Cli::parse_from(["repoplan", "simulate"]);
        let Command::Simulate(opts) = cli.command else {
            panic!("expected simulate command");
        };
        assert_eq!(opts.tick_ms, 400);
    }

    #[test]
    fn parse_completions_shell() {
        let cli = Cli::parse_from(["repoplan", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Command::Completions(CompletionsOpts {
                shell: clap_complete::Shell::Bash
            })
        ));
    }

    #[test]
    fn parse_version_and_verbose() {
        let cli = Cli::parse_from(["repoplan", "-v", "version"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.name(), "version");
    }

    #[test]
    fn unknown_target_rejected() {
        assert!(Cli::try_parse_from(["repoplan", "publish", "--target", "ftp"]).is_err());
    }
}
