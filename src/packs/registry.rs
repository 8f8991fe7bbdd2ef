//! Built-in pack definitions.
use crate::config::{DependencyStrategy, PlanConfig};

use super::{Effects, PackDefinition, PresetPatch};

const fn version_for(config: &PlanConfig) -> &'static str {
    match config.stack.dependency_strategy {
        DependencyStrategy::Pinned => "1.0.0",
        DependencyStrategy::Semver => "^1.0.0",
    }
}

fn framework_effects(config: &PlanConfig) -> Effects {
    let framework = config.stack.framework.trim();
    if framework.is_empty() {
        return Effects::new();
    }
    Effects::new().dependency(&framework.to_lowercase(), version_for(config))
}

fn vite_effects(_: &PlanConfig) -> Effects {
    Effects::new()
        .script("dev", "vite")
        .script("build", "vite build")
        .patch(PresetPatch::Builder("Vite".to_string()))
}

fn eslint_effects(config: &PlanConfig) -> Effects {
    Effects::new()
        .script("lint", "eslint .")
        .dev_dependency("eslint", version_for(config))
        .patch(PresetPatch::Linter("ESLint".to_string()))
}

fn biome_lint_effects(_: &PlanConfig) -> Effects {
    Effects::new().patch(PresetPatch::Linter("Biome".to_string()))
}

fn prettier_effects(config: &PlanConfig) -> Effects {
    Effects::new()
        .script("format", "prettier --write .")
        .dev_dependency("prettier", version_for(config))
        .patch(PresetPatch::Formatter("Prettier".to_string()))
}

fn biome_format_effects(_: &PlanConfig) -> Effects {
    Effects::new().patch(PresetPatch::Formatter("Biome".to_string()))
}

fn vitest_effects(config: &PlanConfig) -> Effects {
    Effects::new()
        .script("test", "vitest")
        .dev_dependency("vitest", version_for(config))
}

fn jest_effects(config: &PlanConfig) -> Effects {
    Effects::new()
        .script("test", "jest")
        .dev_dependency("jest", version_for(config))
}

fn release_effects(_: &PlanConfig) -> Effects {
    Effects::new().patch(PresetPatch::AutomaticRelease(true))
}

fn docs_effects(_: &PlanConfig) -> Effects {
    Effects::new().patch(PresetPatch::Readme(true))
}

/// The pack set shipped with repoplan.
#[must_use]
pub fn builtin_packs() -> Vec<PackDefinition> {
    vec![
        PackDefinition::new("pack.runtime.framework", "Runtime framework dependency", 100)
            .requires(&["stack:framework:present"])
            .claims("runtime:framework")
            .with_effects(framework_effects),
        PackDefinition::new("pack.build.vite", "Vite build scripts", 80)
            .requires(&["builder:vite"])
            .claims("build:scripts")
            .with_effects(vite_effects),
        PackDefinition::new("pack.quality.lint-eslint", "ESLint quality gate", 90)
            .requires(&["quality:linter:eslint"])
            .conflicts_with(&["pack.quality.lint-biome"])
            .claims("quality:linter")
            .with_effects(eslint_effects),
        PackDefinition::new("pack.quality.lint-biome", "Biome quality gate", 85)
            .requires(&["quality:linter:biome"])
            .conflicts_with(&["pack.quality.lint-eslint"])
            .claims("quality:linter")
            .with_effects(biome_lint_effects),
        PackDefinition::new("pack.quality.format-prettier", "Prettier formatter", 80)
            .requires(&["quality:formatter:prettier"])
            .conflicts_with(&["pack.quality.format-biome"])
            .claims("quality:formatter")
            .with_effects(prettier_effects),
        PackDefinition::new("pack.quality.format-biome", "Biome formatter", 75)
            .requires(&["quality:formatter:biome"])
            .conflicts_with(&["pack.quality.format-prettier"])
            .claims("quality:formatter")
            .with_effects(biome_format_effects),
        PackDefinition::new("pack.quality.test-vitest", "Vitest unit testing", 82)
            .requires(&["quality:testing:on", "quality:test:vitest"])
            .conflicts_with(&["pack.quality.test-jest"])
            .claims("quality:test-runner")
            .with_effects(vitest_effects),
        PackDefinition::new("pack.quality.test-jest", "Jest unit testing", 80)
            .requires(&["quality:testing:on", "quality:test:jest"])
            .conflicts_with(&["pack.quality.test-vitest"])
            .claims("quality:test-runner")
            .with_effects(jest_effects),
        PackDefinition::new("pack.release.semantic", "Semantic release owner", 75)
            .requires(&["ci:auto-release:on"])
            .conflicts_with(&["pack.release.gh-release"])
            .claims("release:ownership")
            .with_effects(release_effects),
        PackDefinition::new("pack.release.gh-release", "GitHub release owner", 70)
            .requires(&["ci:auto-release:on"])
            .conflicts_with(&["pack.release.semantic"])
            .claims("release:ownership")
            .with_effects(release_effects),
        PackDefinition::new("pack.docs.templates", "Docs template scaffolding", 40)
            .requires(&["docs:readme:on"])
            .shares("docs:content")
            .with_effects(docs_effects),
    ]
}
