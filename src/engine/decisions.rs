//! Explanation payloads describing what each pipeline stage decided.
use serde::{Deserialize, Serialize};

use super::change_plan::ChangePlan;
use super::normalize::normalize_config;
use super::recommend::{RecommendationCandidate, recommend_automation_candidates};
use super::repo_spec::RepoSpec;
use crate::config::{Architecture, DependencyStrategy, Language, PlanConfig, RustMode};

/// How firmly a decision follows from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Follows directly from an explicit setting.
    High,
    /// Inferred from related settings.
    Medium,
    /// Falls back to a default.
    Low,
}

/// One explained decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineDecision {
    /// Stable decision key.
    pub key: String,
    /// `normalize`, `repo-spec` or `change-plan`.
    pub stage: String,
    /// Short heading.
    pub title: String,
    /// What was chosen.
    pub recommendation: String,
    /// Reasoning behind the choice.
    pub why: String,
    /// Costs of the choice.
    pub trade_offs: Vec<String>,
    /// Options that were passed over.
    pub alternatives: Vec<String>,
    /// How firm the decision is.
    pub confidence: Confidence,
    /// Scored alternatives, when the stage ranks any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<RecommendationCandidate>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn architecture_decision(config: &PlanConfig) -> EngineDecision {
    let architecture = config.architecture.label();
    EngineDecision {
        key: "architecture-normalization".to_string(),
        stage: "normalize".to_string(),
        title: "Architecture Baseline".to_string(),
        recommendation: architecture.to_string(),
        why: format!(
            "{} workflows are normalized around {architecture} boundaries to keep service ownership explicit.",
            config.project_type.label()
        ),
        trade_offs: strings(&[
            "Higher initial scaffolding effort",
            "Requires team alignment on folder contracts",
        ]),
        alternatives: [
            Architecture::Standard,
            Architecture::VerticalSlice,
            Architecture::Mvc,
        ]
        .into_iter()
        .filter(|candidate| *candidate != config.architecture)
        .map(|candidate| candidate.label().to_string())
        .collect(),
        confidence: Confidence::High,
        candidates: Vec::new(),
    }
}

fn stack_decision(config: &PlanConfig, spec: &RepoSpec) -> EngineDecision {
    let framework = if config.stack.framework.is_empty() {
        "Core runtime"
    } else {
        config.stack.framework.as_str()
    };
    let dependency_posture = match config.stack.dependency_strategy {
        DependencyStrategy::Pinned => "pinning dependencies for deterministic builds",
        DependencyStrategy::Semver => "using semver for faster library adoption",
    };
    let pack_count = spec.packs.as_ref().map_or(0, |p| p.selected_packs.len());
    EngineDecision {
        key: "stack-resolution".to_string(),
        stage: "repo-spec".to_string(),
        title: "Stack Resolution".to_string(),
        recommendation: format!("{} + {framework}", config.stack.language.label()),
        why: format!(
            "Repo pack resolution selected {} with {dependency_posture}, {pack_count} packs and {} generated files.",
            spec.package_manager,
            spec.files.len()
        ),
        trade_offs: strings(&[
            "Switching package manager later can invalidate lockfiles",
            "Framework-specific conventions reduce portability",
        ]),
        alternatives: strings(&["TypeScript + Express", "Go + Gin", "Python + FastAPI"]),
        confidence: Confidence::Medium,
        candidates: Vec::new(),
    }
}

fn rust_mode_decision(config: &PlanConfig) -> EngineDecision {
    let (recommendation, why, alternative) = match config.stack.rust_mode {
        RustMode::Template => (
            "Template renderer",
            "Rust repositories render a static template manifest listing every planned file.",
            "Experimental projen-rust synthesis",
        ),
        RustMode::ProjenExperimental => (
            "Experimental projen-rust synthesis",
            "The generator entrypoint is only rendered when power mode is on; otherwise the template renderer is used.",
            "Template renderer",
        ),
    };
    EngineDecision {
        key: "rust-mode".to_string(),
        stage: "repo-spec".to_string(),
        title: "Rust Renderer Mode".to_string(),
        recommendation: recommendation.to_string(),
        why: why.to_string(),
        trade_offs: strings(&[
            "Experimental synthesis output may change between releases",
            "Template output must be kept in sync by hand",
        ]),
        alternatives: vec![alternative.to_string()],
        confidence: Confidence::Medium,
        candidates: Vec::new(),
    }
}

fn publishing_decision(config: &PlanConfig, spec: &RepoSpec, plan: &ChangePlan) -> EngineDecision {
    let security = &config.security;
    let recommendation = if security.code_scanning && security.secret_scanning {
        "comprehensive repository scanning enabled"
    } else {
        "incremental scanning posture enabled"
    };
    let [best, second, third] = recommend_automation_candidates(config, spec);
    EngineDecision {
        key: "change-plan-publishing".to_string(),
        stage: "change-plan".to_string(),
        title: "Publishing Sequence".to_string(),
        recommendation: recommendation.to_string(),
        why: format!(
            "Change plan emits {} operations to realize repository bootstrap and governance automation; {} automation scores highest ({}).",
            plan.operations.len(),
            best.label,
            best.score
        ),
        trade_offs: strings(&[
            "More guardrails may slow first merge",
            "Automation requires permissions upfront",
        ]),
        alternatives: vec![second.label.clone(), third.label.clone()],
        confidence: Confidence::High,
        candidates: vec![best, second, third],
    }
}

/// Explain the decisions behind `spec` and `plan`.
///
/// The Rust renderer decision only appears for Rust stacks.
#[must_use]
pub fn create_engine_decisions(
    config: &PlanConfig,
    spec: &RepoSpec,
    plan: &ChangePlan,
) -> Vec<EngineDecision> {
    let config = normalize_config(config);
    let mut decisions = vec![architecture_decision(&config), stack_decision(&config, spec)];
    if config.stack.language == Language::Rust {
        decisions.push(rust_mode_decision(&config));
    }
    decisions.push(publishing_decision(&config, spec, plan));
    decisions
}
