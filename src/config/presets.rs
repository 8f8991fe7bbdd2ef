//! Named preset bundles: partial configuration patches plus the packs each
//! bundle is built around.
use serde_json::{Value, json};

use super::PlanConfig;
use crate::error::ConfigError;
use crate::packs::PackCatalog;

/// A curated starting point the user can layer onto a configuration.
#[derive(Debug, Clone)]
pub struct PresetBundle {
    /// Stable identifier used on the command line.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Packs whose preset patches the bundle also applies.
    pub packs: &'static [&'static str],
    /// Partial configuration in the same camelCase shape as a config file.
    pub config: Value,
}

/// Every bundle, in catalog order.
#[must_use]
pub fn bundles() -> Vec<PresetBundle> {
    vec![
        PresetBundle {
            id: "bundle.governance.solo-quickstart",
            name: "Solo Quickstart Governance",
            description: "Lean defaults for solo and hackathon projects.",
            packs: &["pack.quality.lint-eslint"],
            config: json!({
                "visibility": "public",
                "quality": { "testing": false, "coverageTarget": 0 },
                "ci": { "runTests": true, "buildArtifacts": true, "automaticRelease": false, "deployToCloud": true },
                "security": { "codeScanning": false, "secretScanning": true, "dependencyUpdates": true, "dependencyUpdateFrequency": "monthly" },
            }),
        },
        PresetBundle {
            id: "bundle.governance.team-standard",
            name: "Team Standard Governance",
            description: "Balanced quality and security posture for product teams.",
            packs: &[
                "pack.quality.lint-eslint",
                "pack.quality.format-prettier",
                "pack.quality.test-vitest",
            ],
            config: json!({
                "visibility": "private",
                "quality": { "testing": true, "coverageTarget": 80 },
                "ci": { "runTests": true, "buildArtifacts": true, "automaticRelease": true, "deployToCloud": false },
                "security": { "codeScanning": true, "secretScanning": true, "dependencyUpdates": true, "dependencyUpdateFrequency": "weekly" },
            }),
        },
        PresetBundle {
            id: "bundle.governance.enterprise",
            name: "Hardened Enterprise Governance",
            description: "Strict controls with high-assurance defaults.",
            packs: &[
                "pack.quality.lint-eslint",
                "pack.quality.format-prettier",
                "pack.quality.test-vitest",
                "pack.release.semantic",
            ],
            config: json!({
                "visibility": "private",
                "structure": "Monorepo",
                "quality": { "testing": true, "coverageTarget": 95 },
                "ci": { "runTests": true, "buildArtifacts": true, "automaticRelease": true, "deployToCloud": false },
                "security": { "codeScanning": true, "secretScanning": true, "dependencyUpdates": true, "dependencyUpdateFrequency": "daily" },
                "docs": { "readme": true, "contributing": true, "adr": true, "codeowners": true },
            }),
        },
        PresetBundle {
            id: "bundle.stack.next-full",
            name: "Full-Stack Next.js",
            description: "Opinionated Next.js stack with testing and deploy-ready defaults.",
            packs: &[
                "pack.runtime.framework",
                "pack.quality.lint-eslint",
                "pack.quality.format-prettier",
                "pack.quality.test-vitest",
            ],
            config: json!({
                "projectName": "next-app-starter",
                "stack": { "language": "TypeScript", "framework": "Next.js", "packageManager": "pnpm", "builder": "None" },
                "quality": { "testing": true, "testFramework": "Vitest", "e2eTests": true, "e2eFramework": "Playwright", "coverageTarget": 80 },
                "ci": { "runTests": true, "buildArtifacts": true, "deployToCloud": true },
                "basics": { "i18n": true },
            }),
        },
        PresetBundle {
            id: "bundle.stack.go-api",
            name: "High-Performance API Service",
            description: "Go API service with cloud deploy defaults.",
            packs: &["pack.runtime.framework"],
            config: json!({
                "projectName": "go-service-api",
                "type": "Service",
                "architecture": "Clean",
                "stack": { "language": "Go", "framework": "Gin", "packageManager": "npm", "builder": "Go Build" },
                "quality": { "linter": "None", "testing": true, "testFramework": "Go Test", "coverageTarget": 70 },
                "ci": { "runTests": true, "buildArtifacts": true, "deployToCloud": true },
                "security": { "codeScanning": true },
            }),
        },
        PresetBundle {
            id: "bundle.stack.docs-site",
            name: "VitePress Documentation",
            description: "Docs-first setup with GitHub Pages deployment.",
            packs: &[
                "pack.runtime.framework",
                "pack.build.vite",
                "pack.docs.templates",
            ],
            config: json!({
                "projectName": "docs-portal",
                "stack": { "language": "TypeScript", "framework": "VitePress", "packageManager": "yarn", "builder": "Vite" },
                "docs": { "framework": "vitepress", "deployToPages": true, "readme": true },
                "ci": { "runTests": false, "buildArtifacts": true, "deployToCloud": false },
            }),
        },
    ]
}

/// Look up a bundle by id.
#[must_use]
pub fn find_bundle(id: &str) -> Option<PresetBundle> {
    bundles().into_iter().find(|bundle| bundle.id == id)
}

/// Deep-merge `updates` into `base`.
///
/// Objects merge key by key; every other value (including arrays) replaces
/// what was there.
pub fn merge_patch(base: &mut Value, updates: &Value) {
    match (base, updates) {
        (Value::Object(base), Value::Object(updates)) => {
            for (key, value) in updates {
                match base.get_mut(key) {
                    Some(existing) => merge_patch(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, updates) => *base = updates.clone(),
    }
}

/// Select the requested bundles, in catalog order.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPreset`] for the first id not in the catalog.
pub fn select_bundles(ids: &[String]) -> Result<Vec<PresetBundle>, ConfigError> {
    if let Some(unknown) = ids.iter().find(|id| find_bundle(id).is_none()) {
        return Err(ConfigError::UnknownPreset(unknown.clone()));
    }
    Ok(bundles()
        .into_iter()
        .filter(|bundle| ids.iter().any(|id| id == bundle.id))
        .collect())
}

/// Fold the requested bundles into a single partial-configuration patch.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPreset`] for an unrecognised bundle id.
pub fn resolve_bundles_to_patch(ids: &[String]) -> Result<Value, ConfigError> {
    let mut patch = Value::Object(serde_json::Map::new());
    for bundle in select_bundles(ids)? {
        merge_patch(&mut patch, &bundle.config);
    }
    Ok(patch)
}

/// Produce a new configuration with the bundles and their packs' preset
/// patches layered onto `base`.
///
/// # Errors
///
/// Returns an error if a bundle id is unknown or the merged document no
/// longer deserializes as a configuration.
pub fn apply_preset_bundles(
    base: &PlanConfig,
    ids: &[String],
    catalog: &PackCatalog,
) -> Result<PlanConfig, ConfigError> {
    if ids.is_empty() {
        return Ok(base.clone());
    }
    let selected = select_bundles(ids)?;

    let mut document =
        serde_json::to_value(base).map_err(|e| ConfigError::Patch(e.to_string()))?;
    merge_patch(&mut document, &resolve_bundles_to_patch(ids)?);
    let mut config: PlanConfig =
        serde_json::from_value(document).map_err(|e| ConfigError::Patch(e.to_string()))?;

    let mut pack_ids: Vec<&str> = Vec::new();
    for bundle in &selected {
        for &id in bundle.packs {
            if !pack_ids.contains(&id) {
                pack_ids.push(id);
            }
        }
    }
    for id in pack_ids {
        let Some(pack) = catalog.get(id) else {
            tracing::warn!(pack = id, "preset references a pack missing from the catalog");
            continue;
        };
        for patch in pack.effects(&config).preset_patches {
            patch.apply(&mut config);
        }
    }
    Ok(config)
}
