#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for diffing the change plans of two configurations.

mod common;

use common::*;
use repoplan_cli::cli::{DiffOpts, GlobalOpts};
use repoplan_cli::commands::diff::diff_configs;

#[test]
fn identical_files_have_empty_diff() {
    let dir = ConfigDir::new();
    let before = dir.write("before.toml", "projectName = \"svc\"\n");
    let after = dir.write("after.toml", "projectName = \"svc\"\n");
    let diff = diff_configs(
        &GlobalOpts::default(),
        &DiffOpts { before, after },
        &NullLog::default(),
    )
    .unwrap();
    assert!(diff.is_empty());
}

#[test]
fn disabling_docs_removes_files() {
    let dir = ConfigDir::new();
    let before = dir.write("before.toml", "");
    let after = dir.write("after.toml", "[docs]\ncontributing = false\n");
    let diff = diff_configs(
        &GlobalOpts::default(),
        &DiffOpts { before, after },
        &NullLog::default(),
    )
    .unwrap();
    let removed: Vec<&str> = diff
        .removed
        .iter()
        .filter_map(|op| op.target.as_deref())
        .collect();
    assert!(removed.contains(&"CONTRIBUTING.md"));
    assert!(diff.added.iter().all(|op| op.target.as_deref() != Some("CONTRIBUTING.md")));
}

#[test]
fn global_presets_apply_to_both_sides() {
    let dir = ConfigDir::new();
    let before = dir.write("before.toml", "");
    let after = dir.write("after.toml", "");
    let global = GlobalOpts {
        presets: vec!["bundle.stack.go-api".to_string()],
        ..GlobalOpts::default()
    };
    let diff = diff_configs(&global, &DiffOpts { before, after }, &NullLog::default()).unwrap();
    assert!(diff.is_empty());
}
