//! Command handlers and the setup sequence they share.
pub mod compile;
pub mod completions;
pub mod diff;
pub mod explain;
pub mod plan;
pub mod presets;
pub mod publish;
pub mod recommend;
pub mod render;
pub mod simulate;
pub mod version;

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::config::PlanConfig;
use crate::config::presets::apply_preset_bundles;
use crate::config::validation::validate_all;
use crate::engine::Compilation;
use crate::error::ConfigError;
use crate::logging::{Log, StepStatus};
use crate::packs::{OwnerOverrides, PackCatalog, parse_owner_override};

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates configuration loading, preset application and override
/// parsing so that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded configuration with presets applied.
    pub config: PlanConfig,
    /// Pack catalog used for resolution and validation.
    pub catalog: PackCatalog,
    /// Capability owners forced with `--owner`.
    pub overrides: OwnerOverrides,
}

impl CommandSetup {
    /// Load the configuration named by `--config` and prepare it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, a preset is unknown, or
    /// an owner override is malformed.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        Self::from_path(global.config.as_deref(), global, log)
    }

    /// Load the configuration at `path` (defaults when `None`) and apply the
    /// global presets and overrides to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, a preset is unknown, or
    /// an owner override is malformed.
    pub fn from_path(path: Option<&Path>, global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        log.stage("Loading configuration");
        let base = PlanConfig::load(path).with_context(|| {
            path.map_or_else(
                || "loading default configuration".to_string(),
                |p| format!("loading {}", p.display()),
            )
        })?;
        log.info(&path.map_or_else(
            || "config: defaults".to_string(),
            |p| format!("config: {}", p.display()),
        ));

        let catalog = PackCatalog::builtin();
        let config = apply_preset_bundles(&base, &global.presets, &catalog)?;
        for preset in &global.presets {
            log.info(&format!("preset: {preset}"));
        }

        let overrides = parse_overrides(&global.owners)?;
        for (capability, pack) in &overrides {
            log.debug(&format!("owner override: {capability} -> {pack}"));
        }

        let warnings = validate_all(&config, &overrides, &catalog);
        if warnings.is_empty() {
            log.record_step("load configuration", StepStatus::Ok, None);
        } else {
            log.warn(&format!(
                "found {} configuration warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
            log.record_step(
                "load configuration",
                StepStatus::Warned,
                Some(&format!("{} warning(s)", warnings.len())),
            );
        }

        Ok(Self {
            config,
            catalog,
            overrides,
        })
    }

    /// Run the full compiler pipeline and report pack contention.
    #[must_use]
    pub fn compile(&self, log: &dyn Log) -> Compilation {
        log.stage("Compiling repository plan");
        let compilation = Compilation::run(&self.config, &self.catalog, &self.overrides);
        report_packs(&compilation, log);
        log.record_step(
            "compile plan",
            StepStatus::Ok,
            Some(&format!(
                "{} files, {} operations",
                compilation.repo_spec.files.len(),
                compilation.change_plan.operations.len()
            )),
        );
        compilation
    }
}

fn report_packs(compilation: &Compilation, log: &dyn Log) {
    let Some(packs) = &compilation.repo_spec.packs else {
        log.record_step("resolve packs", StepStatus::Skipped, None);
        return;
    };
    log.info(&format!("selected {} pack(s)", packs.selected_packs.len()));
    for pack in &packs.selected_packs {
        log.debug(&format!("pack: {pack}"));
    }
    for conflict in &packs.capability_conflicts {
        log.warn(&format!(
            "{}: {} kept over {}. {}",
            conflict.capability,
            conflict.owner.pack_id,
            conflict.challenger.pack_id,
            conflict.downstream_impact
        ));
    }
    for conflict in &packs.pack_conflicts {
        log.debug(&format!(
            "{} dropped for {} ({})",
            conflict.dropped_pack_id, conflict.winner_pack_id, conflict.reason
        ));
    }
    if packs.capability_conflicts.is_empty() {
        log.record_step("resolve packs", StepStatus::Ok, None);
    } else {
        log.record_step(
            "resolve packs",
            StepStatus::Warned,
            Some(&format!(
                "{} capability conflict(s)",
                packs.capability_conflicts.len()
            )),
        );
    }
}

/// Parse every `capability=pack` pair; later pairs win.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOverride`] for the first malformed pair.
pub fn parse_overrides(raw: &[String]) -> Result<OwnerOverrides, ConfigError> {
    raw.iter().map(|pair| parse_owner_override(pair)).collect()
}

/// Write `line` and a newline to stdout.
///
/// Command data goes to stdout; everything logged goes to stderr.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn write_stdout(line: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{line}").context("writing to stdout")
}

/// Write `value` to stdout as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails or stdout cannot be written.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serializing output")?;
    write_stdout(&out)
}
