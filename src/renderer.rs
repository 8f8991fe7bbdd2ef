//! Illustrative generated-file artifacts for a compiled repository.
//!
//! Output branches on the stack language (and, for Rust, on the requested
//! mode plus the experimental gate). Every branch ends with the same two
//! governance artifacts.
use serde::{Deserialize, Serialize};

use crate::config::{GovernancePosture, Language, PlanConfig, RustMode};
use crate::engine::RepoSpec;
use crate::engine::governance::{
    RequiredChecks, ReviewConstraints, RulesetProfile, SecurityDefaults,
};

/// Synth artifacts listed for generator-based stacks.
const GENERATOR_SYNTH_LIMIT: usize = 6;

/// Synth targets summarized by the experimental Rust renderer.
const RUST_EXPERIMENTAL_SYNTH_LIMIT: usize = 8;

/// Files published directly for stacks without a generator.
const DIRECT_PUBLISH_LIMIT: usize = 4;

/// Governance hints emitted for every stack.
pub const GOVERNANCE_HINTS_PATH: &str = ".github/governance-hints.json";
/// Ruleset preview emitted for every stack.
pub const RULESET_PREVIEW_PATH: &str = ".github/rulesets/preview.json";
/// Bootstrap template for the Rust stack.
pub const RUST_TEMPLATE_PATH: &str = "templates/rust/bootstrap-template.md";
/// Summary written by the experimental Rust generator.
pub const RUST_EXPERIMENTAL_SUMMARY_PATH: &str = ".projen/rust-experimental-summary.json";

/// What applying an artifact would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// A concrete file write.
    File,
    /// Rendered output kept for review.
    Artifact,
    /// A non-destructive preview.
    PlannedAction,
}

/// A rendered file or planned action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Repository-relative path.
    pub path: String,
    /// What applying it would do.
    pub kind: ArtifactKind,
    /// Rendered content, when the artifact has any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Human-readable summary.
    pub description: String,
}

impl Artifact {
    fn new(path: impl Into<String>, kind: ArtifactKind, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            content: None,
            description: description.into(),
        }
    }

    fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }
}

/// Switches for a render run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Describe actions as "Would X" rather than "X". Never changes kinds.
    pub dry_run: bool,
    /// Allow the experimental Rust generator; derived from power mode.
    pub enable_rust_experimental: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dry_run: true,
            enable_rust_experimental: false,
        }
    }
}

fn describe(dry_run: bool, planned: &str, done: &str) -> String {
    if dry_run {
        format!("Would {planned}")
    } else {
        done.to_string()
    }
}

/// Serialize plain data to indented JSON.
fn pretty_json<T: Serialize>(value: &T) -> String {
    // Only structs with string keys reach here, which always serialize.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GovernanceHints<'a> {
    posture: GovernancePosture,
    ruleset_profile: &'a RulesetProfile,
    required_checks: &'a RequiredChecks,
    review_constraints: &'a ReviewConstraints,
    security_defaults: &'a SecurityDefaults,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RulesetPreview<'a> {
    mode: &'static str,
    ruleset: &'a RulesetProfile,
    required_checks: &'a RequiredChecks,
    review_constraints: &'a ReviewConstraints,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RustExperimentalSummary<'a> {
    mode: &'static str,
    project: &'a str,
    synth_targets: &'a [String],
}

fn governance_artifacts(spec: &RepoSpec, dry_run: bool) -> [Artifact; 2] {
    let governance = &spec.governance;
    let model = &governance.artifact_model;
    let hints = GovernanceHints {
        posture: governance.posture,
        ruleset_profile: &model.ruleset_profile,
        required_checks: &model.required_checks,
        review_constraints: &model.review_constraints,
        security_defaults: &governance.security_defaults,
    };
    let preview = RulesetPreview {
        mode: "preview",
        ruleset: &model.ruleset_profile,
        required_checks: &model.required_checks,
        review_constraints: &model.review_constraints,
    };
    [
        Artifact::new(
            GOVERNANCE_HINTS_PATH,
            ArtifactKind::Artifact,
            describe(
                dry_run,
                "publish governance hints artifact",
                "Published governance hints artifact",
            ),
        )
        .with_content(pretty_json(&hints)),
        Artifact::new(
            RULESET_PREVIEW_PATH,
            ArtifactKind::PlannedAction,
            "Governance ruleset preview (non-destructive)",
        )
        .with_content(pretty_json(&preview)),
    ]
}

fn generator_artifacts(config: &PlanConfig, spec: &RepoSpec, dry_run: bool) -> Vec<Artifact> {
    let (path, content) = if config.stack.language == Language::Python {
        (
            ".projenrc.py",
            format!(
                "from projen import Project\n\nproject = Project(name='{}')\nproject.synth()\n",
                spec.name
            ),
        )
    } else {
        (
            ".projenrc.ts",
            format!(
                "import {{ javascript }} from 'projen';\n\nconst project = new javascript.NodeProject({{\n  name: '{}',\n}});\nproject.synth();\n",
                spec.name
            ),
        )
    };

    let mut artifacts = vec![
        Artifact::new(
            path,
            ArtifactKind::File,
            describe(dry_run, &format!("write {path}"), &format!("Wrote {path}")),
        )
        .with_content(content),
    ];
    artifacts.extend(spec.files.iter().take(GENERATOR_SYNTH_LIMIT).map(|file| {
        Artifact::new(
            file.as_str(),
            ArtifactKind::Artifact,
            describe(
                dry_run,
                &format!("synthesize {file}"),
                &format!("Synthesized {file}"),
            ),
        )
    }));
    artifacts
}

fn rust_template_artifacts(spec: &RepoSpec, dry_run: bool) -> Vec<Artifact> {
    let mut lines = vec!["# Rust Template Renderer".to_string(), String::new()];
    lines.extend(spec.files.iter().map(|file| format!("- {file}")));
    vec![
        Artifact::new(
            RUST_TEMPLATE_PATH,
            ArtifactKind::File,
            describe(
                dry_run,
                "render Rust template output",
                "Rendered Rust template output",
            ),
        )
        .with_content(lines.join("\n")),
    ]
}

fn rust_experimental_artifacts(spec: &RepoSpec, dry_run: bool) -> Vec<Artifact> {
    let targets_end = spec.files.len().min(RUST_EXPERIMENTAL_SYNTH_LIMIT);
    let summary = RustExperimentalSummary {
        mode: "projen-experimental",
        project: &spec.name,
        synth_targets: spec.files.get(..targets_end).unwrap_or_default(),
    };
    vec![
        Artifact::new(
            ".projenrc.ts",
            ArtifactKind::File,
            describe(
                dry_run,
                "invoke projen-rust synth",
                "Invoked projen-rust synth",
            ),
        )
        .with_content(format!(
            "// Experimental projen-rust entrypoint\nconst project = '{}';\n",
            spec.name
        )),
        Artifact::new(
            RUST_EXPERIMENTAL_SUMMARY_PATH,
            ArtifactKind::Artifact,
            describe(
                dry_run,
                "publish experimental synth summary",
                "Published experimental synth summary",
            ),
        )
        .with_content(pretty_json(&summary)),
    ]
}

fn direct_publish_artifacts(spec: &RepoSpec, dry_run: bool) -> Vec<Artifact> {
    spec.files
        .iter()
        .take(DIRECT_PUBLISH_LIMIT)
        .map(|file| {
            Artifact::new(
                file.as_str(),
                ArtifactKind::Artifact,
                describe(dry_run, &format!("publish {file}"), &format!("Published {file}")),
            )
        })
        .collect()
}

/// Render the artifacts publishing `spec` would produce.
#[must_use]
pub fn render_publisher_artifacts(
    config: &PlanConfig,
    spec: &RepoSpec,
    options: RenderOptions,
) -> Vec<Artifact> {
    let RenderOptions {
        dry_run,
        enable_rust_experimental,
    } = options;

    let mut artifacts = match config.stack.language {
        Language::TypeScript | Language::Python => generator_artifacts(config, spec, dry_run),
        Language::Rust
            if config.stack.rust_mode == RustMode::ProjenExperimental
                && enable_rust_experimental =>
        {
            rust_experimental_artifacts(spec, dry_run)
        }
        Language::Rust => rust_template_artifacts(spec, dry_run),
        Language::Go | Language::Java | Language::Ruby => direct_publish_artifacts(spec, dry_run),
    };
    artifacts.extend(governance_artifacts(spec, dry_run));
    artifacts
}
