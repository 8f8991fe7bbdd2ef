//! Optional feature packs: catalog, requirement matching, conflict graph and
//! capability resolution.
//!
//! A [`PackCatalog`] is plain immutable data. It is built once (usually
//! [`PackCatalog::builtin`]) and passed into every resolution call, so the
//! resolver stays a pure function of `(config, overrides, catalog)`.
pub mod graph;
pub mod registry;
pub mod requirements;
pub mod resolve;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::PlanConfig;
use crate::error::ConfigError;

pub use graph::ConflictGraph;
pub use requirements::RequirementTags;
pub use resolve::{
    CapabilityConflict, ConflictCandidate, PackConflict, PackResolution, resolve_packs,
};

/// Explicit winner per capability, chosen by the user.
///
/// Keyed by capability name; the value is the pack id to pin first.
pub type OwnerOverrides = BTreeMap<String, String>;

/// Parse a `capability=pack` override as accepted on the command line.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOverride`] if either side is missing.
pub fn parse_owner_override(raw: &str) -> Result<(String, String), ConfigError> {
    let (capability, pack) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidOverride(raw.to_string()))?;
    let (capability, pack) = (capability.trim(), pack.trim());
    if capability.is_empty() || pack.is_empty() {
        return Err(ConfigError::InvalidOverride(raw.to_string()));
    }
    Ok((capability.to_string(), pack.to_string()))
}

/// A named feature slot a pack claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// Capability name, e.g. `release:ownership`.
    pub name: String,
    /// Any number of non-conflicting packs may contribute.
    pub multi_owner: bool,
}

/// A typed change to the configuration a pack implies when pinned by a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum PresetPatch {
    /// Set `stack.builder`.
    Builder(String),
    /// Set `quality.linter`.
    Linter(String),
    /// Set `quality.formatter`.
    Formatter(String),
    /// Set `ci.automaticRelease`.
    AutomaticRelease(bool),
    /// Set `docs.readme`.
    Readme(bool),
}

impl PresetPatch {
    /// Write this patch into `config`.
    pub fn apply(&self, config: &mut PlanConfig) {
        match self {
            Self::Builder(builder) => config.stack.builder.clone_from(builder),
            Self::Linter(linter) => config.quality.linter.clone_from(linter),
            Self::Formatter(formatter) => config.quality.formatter.clone_from(formatter),
            Self::AutomaticRelease(on) => config.ci.automatic_release = *on,
            Self::Readme(on) => config.docs.readme = *on,
        }
    }
}

/// What a selected pack contributes.
///
/// Each category is its own sorted map; merging across packs is
/// last-writer-wins in ascending pack-id order (see [`resolve_packs`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    /// `package.json` scripts by name.
    pub scripts: BTreeMap<String, String>,
    /// Runtime dependencies with version ranges.
    pub dependencies: BTreeMap<String, String>,
    /// Development dependencies with version ranges.
    pub dev_dependencies: BTreeMap<String, String>,
    /// Configuration changes a preset applies with the pack.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preset_patches: Vec<PresetPatch>,
}

impl Effects {
    /// Empty contributions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a script.
    #[must_use]
    pub fn script(mut self, name: &str, command: &str) -> Self {
        self.scripts.insert(name.to_string(), command.to_string());
        self
    }

    /// Add a runtime dependency.
    #[must_use]
    pub fn dependency(mut self, name: &str, version: &str) -> Self {
        self.dependencies
            .insert(name.to_string(), version.to_string());
        self
    }

    /// Add a development dependency.
    #[must_use]
    pub fn dev_dependency(mut self, name: &str, version: &str) -> Self {
        self.dev_dependencies
            .insert(name.to_string(), version.to_string());
        self
    }

    /// Add a preset patch.
    #[must_use]
    pub fn patch(mut self, patch: PresetPatch) -> Self {
        self.preset_patches.push(patch);
        self
    }

    /// `true` when the pack adds no scripts or dependencies.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.scripts.is_empty() && self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }

    /// Short human-readable listing, e.g. `scripts [lint]; devDependencies [eslint]`.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.is_inert() {
            return "no scripts or dependencies".to_string();
        }
        [
            ("scripts", &self.scripts),
            ("dependencies", &self.dependencies),
            ("devDependencies", &self.dev_dependencies),
        ]
        .into_iter()
        .filter(|(_, map)| !map.is_empty())
        .map(|(label, map)| {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("{label} [{}]", keys.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
    }
}

/// An optional, composable feature unit.
#[derive(Debug, Clone)]
pub struct PackDefinition {
    /// Unique id, e.g. `pack.quality.lint-eslint`.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Requirement tags that must all be present for the pack to be eligible.
    pub requirements: Vec<String>,
    /// Pack ids this pack cannot coexist with (treated as bidirectional).
    pub conflicts: Vec<String>,
    /// Capabilities the pack claims or shares.
    pub capabilities: Vec<Capability>,
    /// Higher wins contended capabilities.
    pub priority: i32,
    /// Computes the pack's contributions for a configuration.
    pub resolve_effects: fn(&PlanConfig) -> Effects,
}

fn no_effects(_: &PlanConfig) -> Effects {
    Effects::default()
}

impl PackDefinition {
    /// Start a definition with no requirements, conflicts or capabilities.
    #[must_use]
    pub fn new(id: &str, title: &str, priority: i32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            requirements: Vec::new(),
            conflicts: Vec::new(),
            capabilities: Vec::new(),
            priority,
            resolve_effects: no_effects,
        }
    }

    /// Add requirement tags.
    #[must_use]
    pub fn requires(mut self, tags: &[&str]) -> Self {
        self.requirements
            .extend(tags.iter().map(ToString::to_string));
        self
    }

    /// Add conflicting pack ids.
    #[must_use]
    pub fn conflicts_with(mut self, ids: &[&str]) -> Self {
        self.conflicts.extend(ids.iter().map(ToString::to_string));
        self
    }

    /// Claim a single-owner capability.
    #[must_use]
    pub fn claims(mut self, capability: &str) -> Self {
        self.capabilities.push(Capability {
            name: capability.to_string(),
            multi_owner: false,
        });
        self
    }

    /// Contribute to a multi-owner capability.
    #[must_use]
    pub fn shares(mut self, capability: &str) -> Self {
        self.capabilities.push(Capability {
            name: capability.to_string(),
            multi_owner: true,
        });
        self
    }

    /// Replace the effects function.
    #[must_use]
    pub fn with_effects(mut self, resolve_effects: fn(&PlanConfig) -> Effects) -> Self {
        self.resolve_effects = resolve_effects;
        self
    }

    /// Compute this pack's contributions for `config`.
    #[must_use]
    pub fn effects(&self, config: &PlanConfig) -> Effects {
        (self.resolve_effects)(config)
    }

    /// Whether this pack declares `capability`.
    #[must_use]
    pub fn claims_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c.name == capability)
    }
}

/// Immutable set of pack definitions consulted by the resolver.
#[derive(Debug, Clone, Default)]
pub struct PackCatalog {
    packs: Vec<PackDefinition>,
}

impl PackCatalog {
    /// Catalog over `packs`, kept in the given order.
    #[must_use]
    pub const fn new(packs: Vec<PackDefinition>) -> Self {
        Self { packs }
    }

    /// The packs shipped with repoplan.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(registry::builtin_packs())
    }

    /// Every pack, in catalog order.
    #[must_use]
    pub fn packs(&self) -> &[PackDefinition] {
        &self.packs
    }

    /// Look a pack up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PackDefinition> {
        self.packs.iter().find(|p| p.id == id)
    }

    /// Every capability name declared by any pack, sorted.
    #[must_use]
    pub fn capability_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .packs
            .iter()
            .flat_map(|p| p.capabilities.iter().map(|c| c.name.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
