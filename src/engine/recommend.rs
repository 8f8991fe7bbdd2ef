//! Advisory scoring of three canonical automation profiles.
//!
//! Each profile is rebuilt at a fixed target noise level and scored against
//! the noise the user asked for, so the ranking is independent of the
//! automation actually compiled into the [`RepoSpec`].
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::automation::{
    CiProfile, DependabotProfile, Grouping, MatrixBreadth, automation_for_noise,
    resolve_noise_level,
};
use super::repo_spec::RepoSpec;
use crate::config::{GovernancePosture, PlanConfig, UpdateFrequency};

/// Labels and target noise levels, in insertion (noise-ascending) order.
pub const PROFILES: [(&str, f64); 3] = [
    ("Quiet Guardrails", 20.0),
    ("Balanced Throughput", 50.0),
    ("Aggressive Freshness", 80.0),
];

/// A scored automation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCandidate {
    /// Slug of the label.
    pub id: String,
    /// Display name.
    pub label: String,
    /// Overall ranking score, higher is better.
    pub score: f64,
    /// Closeness to the requested noise level.
    pub fit: f64,
    /// Upkeep estimate.
    pub maintenance_cost: f64,
    /// Complexity estimate for the matrix and required checks.
    pub complexity_risk: f64,
    /// Expected bot pull requests per month.
    pub bot_prs_per_month: u32,
    /// Relative CI cost.
    pub ci_minutes_proxy: u32,
    /// How the profile treats security updates.
    pub security_posture_note: String,
    /// Dependency-update settings.
    pub dependabot: DependabotProfile,
    /// CI matrix.
    pub ci: CiProfile,
}

/// One decimal place. Adding `0.0` turns a rounded `-0.0` into `0.0`.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0 + 0.0
}

/// `lower-case-label` with whitespace runs collapsed to `-`.
fn candidate_id(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn ci_minutes_proxy(dimensions: usize, testing: bool, build: bool) -> u32 {
    let per_dimension = if testing && build { 20.0 } else { 12.0 };
    let quality_factor = if testing { 1.2 } else { 0.9 };
    (dimensions as f64 * per_dimension * quality_factor).round() as u32
}

const fn matrix_risk(breadth: MatrixBreadth) -> f64 {
    match breadth {
        MatrixBreadth::Minimal => 8.0,
        MatrixBreadth::Standard => 14.0,
        MatrixBreadth::Broad => 26.0,
    }
}

fn security_posture_note(config: &PlanConfig, schedule: UpdateFrequency) -> String {
    let security = &config.security;
    let coverage = match (security.code_scanning, security.secret_scanning) {
        (true, true) => "Full scanning coverage",
        (false, false) => "Manual scanning posture",
        _ => "Partial scanning coverage",
    };
    format!("{coverage}; dependency updates {}.", schedule.as_str())
}

fn score_candidate(
    config: &PlanConfig,
    spec: &RepoSpec,
    label: &str,
    target_noise: f64,
) -> RecommendationCandidate {
    let requested = resolve_noise_level(&config.noise_budget);
    let automation = automation_for_noise(target_noise);

    let strict_penalty = if spec.governance.posture == GovernancePosture::Strict {
        10.0
    } else {
        0.0
    };
    let fit = ((requested - target_noise).abs().mul_add(-1.8, 110.0) - strict_penalty).max(5.0);

    let ci_minutes = ci_minutes_proxy(
        automation.ci.dimensions.len(),
        config.quality.testing,
        config.ci.build_artifacts,
    );
    let maintenance_cost = f64::from(automation.dependabot.estimated_monthly_prs)
        .mul_add(1.5, f64::from(ci_minutes) / 12.0);

    let grouping_risk = if automation.dependabot.grouping == Grouping::None {
        12.0
    } else {
        4.0
    };
    let checks_risk = if spec.governance.branch.require_status_checks {
        6.0
    } else {
        0.0
    };
    let complexity_risk = matrix_risk(automation.ci.matrix_breadth) + grouping_risk + checks_risk;

    RecommendationCandidate {
        id: candidate_id(label),
        label: label.to_string(),
        score: round1(fit - maintenance_cost - complexity_risk),
        fit,
        maintenance_cost: round1(maintenance_cost),
        complexity_risk: round1(complexity_risk),
        bot_prs_per_month: automation.dependabot.estimated_monthly_prs,
        ci_minutes_proxy: ci_minutes,
        security_posture_note: security_posture_note(config, automation.dependabot.schedule),
        dependabot: automation.dependabot,
        ci: automation.ci,
    }
}

/// Score the three canonical profiles, best first.
///
/// Ties keep insertion order, which is noise-ascending.
#[must_use]
pub fn recommend_automation_candidates(
    config: &PlanConfig,
    spec: &RepoSpec,
) -> [RecommendationCandidate; 3] {
    let mut candidates =
        PROFILES.map(|(label, target)| score_candidate(config, spec, label, target));
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::config::NoiseBudget;
    use crate::engine::repo_spec::compile_repo_spec;
    use crate::packs::{OwnerOverrides, PackCatalog};

    fn recommend(config: &PlanConfig) -> [RecommendationCandidate; 3] {
        let spec = compile_repo_spec(config, &PackCatalog::builtin(), &OwnerOverrides::new());
        recommend_automation_candidates(config, &spec)
    }

    fn labels_and_scores(candidates: &[RecommendationCandidate; 3]) -> Vec<(&str, f64)> {
        candidates
            .iter()
            .map(|c| (c.label.as_str(), c.score))
            .collect()
    }

    #[test]
    fn default_config_prefers_balanced() {
        let candidates = recommend(&PlanConfig::default());
        assert_eq!(
            labels_and_scores(&candidates),
            vec![
                ("Balanced Throughput", 73.0),
                ("Quiet Guardrails", 33.0),
                ("Aggressive Freshness", -32.0),
            ]
        );
    }

    #[test]
    fn low_noise_prefers_quiet() {
        let mut config = PlanConfig::default();
        config.noise_budget = NoiseBudget::low();
        let candidates = recommend(&config);
        assert_eq!(candidates[0].label, "Quiet Guardrails");
        assert_eq!(candidates[0].score, 87.0);
        assert_eq!(candidates[2].label, "Aggressive Freshness");
    }

    #[test]
    fn high_noise_prefers_aggressive() {
        let mut config = PlanConfig::default();
        config.noise_budget = NoiseBudget::high();
        let candidates = recommend(&config);
        assert_eq!(candidates[0].label, "Aggressive Freshness");
        assert_eq!(candidates[0].score, 22.0);
        let quiet = candidates.iter().position(|c| c.label == "Quiet Guardrails").unwrap();
        assert_eq!(quiet, 2);
    }

    #[test]
    fn candidate_fields() {
        let candidates = recommend(&PlanConfig::default());
        let balanced = &candidates[0];
        assert_eq!(balanced.id, "balanced-throughput");
        assert_eq!(balanced.fit, 110.0);
        assert_eq!(balanced.ci_minutes_proxy, 48);
        assert_eq!(balanced.maintenance_cost, 13.0);
        assert_eq!(balanced.complexity_risk, 24.0);
        assert_eq!(balanced.bot_prs_per_month, 6);
        assert_eq!(
            balanced.security_posture_note,
            "Full scanning coverage; dependency updates weekly."
        );
    }

    #[test]
    fn strict_posture_lowers_fit() {
        let mut config = PlanConfig::default();
        config.governance_posture = GovernancePosture::Strict;
        let candidates = recommend(&config);
        let balanced = candidates
            .iter()
            .find(|c| c.label == "Balanced Throughput")
            .unwrap();
        assert_eq!(balanced.fit, 100.0);
    }

    #[test]
    fn fit_has_a_floor() {
        let mut config = PlanConfig::default();
        config.noise_budget = NoiseBudget::Level(100.0);
        config.governance_posture = GovernancePosture::Strict;
        let candidates = recommend(&config);
        let quiet = candidates
            .iter()
            .find(|c| c.label == "Quiet Guardrails")
            .unwrap();
        // 110 - 80 * 1.8 - 10 is negative
        assert_eq!(quiet.fit, 5.0);
    }

    #[test]
    fn partial_scanning_note() {
        let mut config = PlanConfig::default();
        config.security.secret_scanning = false;
        let candidates = recommend(&config);
        assert!(candidates
            .iter()
            .all(|c| c.security_posture_note.starts_with("Partial scanning coverage")));
    }

    #[test]
    fn deterministic() {
        let config = PlanConfig::default();
        assert_eq!(recommend(&config), recommend(&config));
    }

    #[test]
    fn near_zero_score_is_positive_zero() {
        let mut config = PlanConfig::default();
        config.noise_budget = NoiseBudget::Level(6.1);
        config.governance_posture = GovernancePosture::Relaxed;
        let candidates = recommend(&config);
        let balanced = candidates
            .iter()
            .find(|c| c.label == "Balanced Throughput")
            .unwrap();
        assert!(balanced.score.is_sign_positive());
        assert_eq!(serde_json::to_string(&balanced.score).unwrap(), "0.0");
    }

    #[test]
    fn round1_never_yields_negative_zero() {
        assert!(round1(-0.02).is_sign_positive());
        assert!(round1(-0.04).is_sign_positive());
        assert_eq!(round1(-0.06), -0.1);
        assert_eq!(round1(12.34), 12.3);
    }

    #[test]
    fn ci_minutes_without_tests() {
        assert_eq!(ci_minutes_proxy(2, false, true), 22);
        assert_eq!(ci_minutes_proxy(4, true, false), 58);
    }
}
