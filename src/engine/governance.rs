//! Branch-protection and security policy derived from the governance posture.
use serde::{Deserialize, Serialize};

use super::automation::AutomationProfile;
use crate::config::{GovernancePosture, UpdateFrequency};

/// Named ruleset a posture maps onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetProfile {
    /// `lenient`, `standard` or `strict`.
    pub id: String,
    /// Display name.
    pub label: String,
    /// One-line summary.
    pub description: String,
}

/// Status checks gating merges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredChecks {
    /// Whether checks must pass before merging.
    pub require_status_checks: bool,
    /// Check names.
    pub checks: Vec<String>,
}

/// Review rules for the default branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // independent protection flags, serialized as-is
#[serde(rename_all = "camelCase")]
pub struct ReviewConstraints {
    /// Changes must go through a pull request.
    pub require_pr: bool,
    /// Approvals needed to merge.
    pub required_reviewers: u32,
    /// Code owners must approve.
    pub require_code_owners: bool,
    /// Merge commits are rejected.
    pub require_linear_history: bool,
    /// Commits must be signed.
    pub require_signed_commits: bool,
}

/// Everything the renderer needs to emit governance artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceArtifactModel {
    /// Ruleset the posture maps onto.
    pub ruleset_profile: RulesetProfile,
    /// Merge-gating checks.
    pub required_checks: RequiredChecks,
    /// Review rules.
    pub review_constraints: ReviewConstraints,
}

/// Branch protection flags applied to the default branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // independent protection flags, serialized as-is
#[serde(rename_all = "camelCase")]
pub struct BranchPolicy {
    /// Changes must go through a pull request.
    pub require_pr: bool,
    /// Approvals needed to merge.
    pub required_reviewers: u32,
    /// Code owners must approve.
    pub require_code_owners: bool,
    /// Merge commits are rejected.
    pub require_linear_history: bool,
    /// Commits must be signed.
    pub require_signed_commits: bool,
    /// Status checks must pass.
    pub require_status_checks: bool,
}

/// Repository security features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDefaults {
    /// Code scanning enabled.
    pub code_scanning: bool,
    /// Secret scanning enabled.
    pub secret_scanning: bool,
    /// Dependency-update bot enabled.
    pub dependency_updates: bool,
    /// Bot schedule.
    pub dependency_update_frequency: UpdateFrequency,
}

/// Compiled governance for a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceProfile {
    /// Posture the profile was compiled from.
    pub posture: GovernancePosture,
    /// Ruleset id.
    pub ruleset: String,
    /// Default-branch protection.
    pub branch: BranchPolicy,
    /// Checks required on the default branch.
    pub status_checks: Vec<String>,
    /// Input for the governance renderers.
    pub artifact_model: GovernanceArtifactModel,
    /// Security feature toggles.
    pub security_defaults: SecurityDefaults,
}

fn checks(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// The fixed policy table for a posture.
#[must_use]
pub fn artifact_model(posture: GovernancePosture) -> GovernanceArtifactModel {
    match posture {
        GovernancePosture::Relaxed => GovernanceArtifactModel {
            ruleset_profile: RulesetProfile {
                id: "lenient".to_string(),
                label: "Relaxed".to_string(),
                description:
                    "Minimal branch protections for fast iteration and optional policy checks."
                        .to_string(),
            },
            required_checks: RequiredChecks {
                require_status_checks: false,
                checks: Vec::new(),
            },
            review_constraints: ReviewConstraints {
                require_pr: false,
                required_reviewers: 0,
                require_code_owners: false,
                require_linear_history: false,
                require_signed_commits: false,
            },
        },
        GovernancePosture::Strict => GovernanceArtifactModel {
            ruleset_profile: RulesetProfile {
                id: "strict".to_string(),
                label: "Strict".to_string(),
                description:
                    "High-assurance governance with mandatory reviews, checks, and signed history."
                        .to_string(),
            },
            required_checks: RequiredChecks {
                require_status_checks: true,
                checks: checks(&["lint", "test", "build", "codeql"]),
            },
            review_constraints: ReviewConstraints {
                require_pr: true,
                required_reviewers: 2,
                require_code_owners: true,
                require_linear_history: true,
                require_signed_commits: true,
            },
        },
        GovernancePosture::TeamStandard => GovernanceArtifactModel {
            ruleset_profile: RulesetProfile {
                id: "standard".to_string(),
                label: "Team Standard".to_string(),
                description:
                    "Balanced governance with required PRs and core CI checks for team delivery."
                        .to_string(),
            },
            required_checks: RequiredChecks {
                require_status_checks: true,
                checks: checks(&["lint", "test", "build"]),
            },
            review_constraints: ReviewConstraints {
                require_pr: true,
                required_reviewers: 1,
                require_code_owners: false,
                require_linear_history: true,
                require_signed_commits: false,
            },
        },
    }
}

/// Compile governance for `posture`; the dependency-update cadence comes
/// from the already compiled automation profile.
#[must_use]
pub fn compile_governance(
    posture: GovernancePosture,
    automation: &AutomationProfile,
) -> GovernanceProfile {
    let model = artifact_model(posture);
    let enforced = model.ruleset_profile.id != "lenient";
    let review = &model.review_constraints;

    GovernanceProfile {
        posture,
        ruleset: model.ruleset_profile.id.clone(),
        branch: BranchPolicy {
            require_pr: review.require_pr,
            required_reviewers: review.required_reviewers,
            require_code_owners: review.require_code_owners,
            require_linear_history: review.require_linear_history,
            require_signed_commits: review.require_signed_commits,
            require_status_checks: model.required_checks.require_status_checks,
        },
        status_checks: model.required_checks.checks.clone(),
        security_defaults: SecurityDefaults {
            code_scanning: enforced,
            secret_scanning: enforced,
            dependency_updates: true,
            dependency_update_frequency: automation.dependabot.schedule,
        },
        artifact_model: model,
    }
}
