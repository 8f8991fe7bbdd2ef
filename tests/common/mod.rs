// Shared helpers for integration tests.
//
// Provides temporary-directory-backed configuration files and compile
// shortcuts so each integration test can set up an isolated scenario
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use repoplan_cli::cli::GlobalOpts;
use repoplan_cli::config::PlanConfig;
use repoplan_cli::engine::Compilation;
use repoplan_cli::packs::{OwnerOverrides, PackCatalog};

/// Compile `config` against the built-in catalog.
pub fn compile(config: &PlanConfig, overrides: &OwnerOverrides) -> Compilation {
    Compilation::run(config, &PackCatalog::builtin(), overrides)
}

/// Compile `config` with no owner overrides.
pub fn compile_default(config: &PlanConfig) -> Compilation {
    compile(config, &OwnerOverrides::new())
}

/// Build an override table from `capability, pack` pairs.
pub fn overrides(pairs: &[(&str, &str)]) -> OwnerOverrides {
    pairs
        .iter()
        .map(|(capability, pack)| ((*capability).to_string(), (*pack).to_string()))
        .collect()
}

/// A scratch directory holding configuration files, backed by a
/// [`tempfile::TempDir`] and deleted on drop.
pub struct ConfigDir {
    pub root: tempfile::TempDir,
}

impl ConfigDir {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write `content` to `name` and return the full path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::write(&path, content).expect("write config file");
        path
    }

    /// Global options pointing at `config`.
    pub fn global(&self, config: &Path) -> GlobalOpts {
        GlobalOpts {
            config: Some(config.to_path_buf()),
            ..GlobalOpts::default()
        }
    }
}

/// A test logger that discards output.
#[derive(Debug, Default)]
pub struct NullLog {
    pub steps: std::sync::Mutex<Vec<String>>,
}

impl repoplan_cli::logging::Log for NullLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn dry_run(&self, _msg: &str) {}
    fn record_step(
        &self,
        name: &str,
        _status: repoplan_cli::logging::StepStatus,
        _message: Option<&str>,
    ) {
        self.steps
            .lock()
            .expect("steps lock")
            .push(name.to_string());
    }
}
