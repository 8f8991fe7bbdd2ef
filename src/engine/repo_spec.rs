//! The compiled repository specification.
use serde::{Deserialize, Serialize};

use super::automation::{AutomationProfile, compile_automation};
use super::governance::{GovernanceProfile, compile_governance};
use super::normalize::normalize_config;
use crate::config::{Architecture, Language, PlanConfig};
use crate::packs::resolve::resolve_normalized;
use crate::packs::{OwnerOverrides, PackCatalog, PackResolution};

/// Canonical, serializable description of the target repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSpec {
    /// Normalized project name.
    pub name: String,
    /// Package manager used for installs.
    pub package_manager: String,
    /// Repository layout.
    pub architecture: Architecture,
    /// Dependency and CI automation.
    pub automation: AutomationProfile,
    /// Branch protection and security.
    pub governance: GovernanceProfile,
    /// Manifest paths, sorted.
    pub files: Vec<String>,
    /// Resolved packs, when any were selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packs: Option<PackResolution>,
}

/// Paths the bootstrap will create, sorted.
#[must_use]
pub fn resolve_files(config: &PlanConfig) -> Vec<String> {
    let mut files = vec![".github/settings.yml", ".gitignore", "package.json"];

    if config.docs.readme {
        files.push("README.md");
    }
    if config.docs.contributing {
        files.push("CONTRIBUTING.md");
    }
    if config.stack.language == Language::TypeScript {
        files.push("tsconfig.json");
    }
    if config.quality.linter == "ESLint" {
        files.push(".eslintrc.json");
    }
    if config.ci.run_tests || config.ci.build_artifacts {
        files.push(".github/workflows/ci.yml");
    }
    if config.security.manage_env {
        files.push(".env.example");
    }

    if config.architecture == Architecture::Hexagonal {
        files.extend([
            "src/adapters/http/handler.ts",
            "src/domain/entity.ts",
            "src/ports/repository.ts",
        ]);
    } else {
        files.extend(["src/index.ts", "src/utils.ts"]);
    }

    let mut files: Vec<String> = files.into_iter().map(str::to_string).collect();
    files.sort();
    files
}

/// Compile a configuration into a [`RepoSpec`].
///
/// The input is normalized first and never modified.
#[must_use]
pub fn compile_repo_spec(
    config: &PlanConfig,
    catalog: &PackCatalog,
    overrides: &OwnerOverrides,
) -> RepoSpec {
    let normalized = normalize_config(config);
    let automation = compile_automation(&normalized.noise_budget);
    let governance = compile_governance(normalized.governance_posture, &automation);

    RepoSpec {
        name: normalized.project_name.clone(),
        package_manager: normalized.stack.package_manager.clone(),
        architecture: normalized.architecture,
        files: resolve_files(&normalized),
        packs: Some(resolve_normalized(&normalized, catalog, overrides)),
        automation,
        governance,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{GovernancePosture, NoiseBudget, UpdateFrequency};
    use crate::engine::automation::MatrixBreadth;

    fn compile(config: &PlanConfig) -> RepoSpec {
        compile_repo_spec(config, &PackCatalog::builtin(), &OwnerOverrides::new())
    }

    #[test]
    fn default_manifest() {
        let spec = compile(&PlanConfig::default());
        assert_eq!(
            spec.files,
            vec![
                ".env.example",
                ".eslintrc.json",
                ".github/settings.yml",
                ".github/workflows/ci.yml",
                ".gitignore",
                "CONTRIBUTING.md",
                "README.md",
                "package.json",
                "src/index.ts",
                "src/utils.ts",
                "tsconfig.json",
            ]
        );
    }

    #[test]
    fn hexagonal_layout_replaces_flat_sources() {
        let mut config = PlanConfig::default();
        config.architecture = Architecture::Hexagonal;
        let files = resolve_files(&config);
        assert!(files.contains(&"src/ports/repository.ts".to_string()));
        assert!(!files.contains(&"src/index.ts".to_string()));
    }

    #[test]
    fn minimal_manifest_keeps_fixed_files() {
        let mut config = PlanConfig::default();
        config.docs.readme = false;
        config.docs.contributing = false;
        config.stack.language = Language::Go;
        config.quality.linter = "None".to_string();
        config.ci.run_tests = false;
        config.ci.build_artifacts = false;
        config.security.manage_env = false;
        assert_eq!(
            resolve_files(&config),
            vec![
                ".github/settings.yml",
                ".gitignore",
                "package.json",
                "src/index.ts",
                "src/utils.ts",
            ]
        );
    }

    #[test]
    fn noise_and_posture_flow_into_spec() {
        let mut config = PlanConfig::default();
        config.noise_budget = NoiseBudget::low();
        config.governance_posture = GovernancePosture::Strict;
        let spec = compile(&config);
        assert_eq!(spec.automation.dependabot.schedule, UpdateFrequency::Monthly);
        assert_eq!(spec.automation.ci.matrix_breadth, MatrixBreadth::Minimal);
        assert_eq!(spec.governance.ruleset, "strict");
    }

    #[test]
    fn name_is_trimmed() {
        let mut config = PlanConfig::default();
        config.project_name = "  padded  ".to_string();
        assert_eq!(compile(&config).name, "padded");
    }

    #[test]
    fn packs_are_always_present() {
        let spec = compile(&PlanConfig::default());
        assert!(spec.packs.is_some());
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_value(compile(&PlanConfig::default())).unwrap();
        assert_eq!(json["packageManager"], "pnpm");
        assert_eq!(json["governance"]["ruleset"], "standard");
        assert!(json["packs"]["selectedPacks"].is_array());
    }
}
