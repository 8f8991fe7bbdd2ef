//! Capability ownership resolution.
//!
//! Eligible packs are grouped per capability and each capability is decided
//! in sorted-name order against the set of packs selected so far. Conflicts
//! are never errors: every contention is recorded in the result so the host
//! can show what was kept and what was dropped.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{ConflictGraph, Effects, OwnerOverrides, PackCatalog, PackDefinition, RequirementTags};
use crate::config::PlanConfig;
use crate::engine::normalize::normalize_config;

/// A pack taking part in a contended capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCandidate {
    /// Pack id.
    pub pack_id: String,
    /// Pack priority.
    pub priority: i32,
    /// What the pack would contribute.
    pub effects: Effects,
}

/// A single-owner capability claimed by more than one eligible pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityConflict {
    /// Contended capability.
    pub capability: String,
    /// Pack that keeps the capability.
    pub owner: ConflictCandidate,
    /// Pack that loses it.
    pub challenger: ConflictCandidate,
    /// What changes because the challenger lost.
    pub downstream_impact: String,
}

/// A pack dropped because it conflicts with an already-selected pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackConflict {
    /// Pack that stayed selected.
    pub winner_pack_id: String,
    /// Pack that was dropped.
    pub dropped_pack_id: String,
    /// Why the pair cannot coexist.
    pub reason: String,
}

/// Outcome of pack resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackResolution {
    /// Merged scripts.
    pub scripts: BTreeMap<String, String>,
    /// Merged runtime dependencies.
    pub dependencies: BTreeMap<String, String>,
    /// Merged development dependencies.
    pub dev_dependencies: BTreeMap<String, String>,
    /// Selected pack ids, sorted.
    pub selected_packs: Vec<String>,
    /// Owning pack ids per capability.
    pub capability_owners: BTreeMap<String, Vec<String>>,
    /// Contended capabilities and how each was settled.
    pub capability_conflicts: Vec<CapabilityConflict>,
    /// Packs dropped for conflicting with a selected pack.
    pub pack_conflicts: Vec<PackConflict>,
}

#[derive(Clone, Copy)]
struct Candidate<'a> {
    pack: &'a PackDefinition,
    multi_owner: bool,
}

impl Candidate<'_> {
    fn id(&self) -> &str {
        &self.pack.id
    }
}

/// Descending priority, then ascending id.
fn by_rank(a: &PackDefinition, b: &PackDefinition) -> Ordering {
    b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id))
}

/// Resolve packs for `config` against `catalog`.
///
/// The configuration is normalized first, so callers may pass raw input.
#[must_use]
pub fn resolve_packs(
    config: &PlanConfig,
    catalog: &PackCatalog,
    overrides: &OwnerOverrides,
) -> PackResolution {
    resolve_normalized(&normalize_config(config), catalog, overrides)
}

/// Resolve packs for an already-normalized configuration.
pub(crate) fn resolve_normalized(
    config: &PlanConfig,
    catalog: &PackCatalog,
    overrides: &OwnerOverrides,
) -> PackResolution {
    let tags = RequirementTags::from_config(config);
    let mut eligible: Vec<&PackDefinition> = catalog
        .packs()
        .iter()
        .filter(|pack| tags.satisfies(&pack.requirements))
        .collect();
    eligible.sort_by(|a, b| by_rank(a, b));
    tracing::debug!(
        eligible = ?eligible.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        "eligible packs"
    );

    let effects: BTreeMap<&str, Effects> = eligible
        .iter()
        .map(|pack| (pack.id.as_str(), pack.effects(config)))
        .collect();

    let mut candidates: BTreeMap<&str, Vec<Candidate<'_>>> = BTreeMap::new();
    for pack in &eligible {
        for capability in &pack.capabilities {
            candidates
                .entry(capability.name.as_str())
                .or_default()
                .push(Candidate {
                    pack,
                    multi_owner: capability.multi_owner,
                });
        }
    }

    let graph = ConflictGraph::from_packs(eligible.iter().copied());
    let mut state = Resolver {
        graph: &graph,
        effects: &effects,
        selected: BTreeSet::new(),
        result: PackResolution::default(),
    };

    for (capability, group) in &candidates {
        if group.iter().all(|c| c.multi_owner) {
            state.resolve_shared(capability, group);
        } else {
            state.resolve_exclusive(capability, group, overrides.get(*capability));
        }
    }

    state.finish()
}

struct Resolver<'g> {
    graph: &'g ConflictGraph,
    effects: &'g BTreeMap<&'g str, Effects>,
    selected: BTreeSet<String>,
    result: PackResolution,
}

impl Resolver<'_> {
    fn candidate(&self, pack: &PackDefinition) -> ConflictCandidate {
        ConflictCandidate {
            pack_id: pack.id.clone(),
            priority: pack.priority,
            effects: self
                .effects
                .get(pack.id.as_str())
                .cloned()
                .unwrap_or_default(),
        }
    }

    fn record_pack_conflict(&mut self, winner: &str, dropped: &str, reason: String) {
        let duplicate = self
            .result
            .pack_conflicts
            .iter()
            .any(|c| c.winner_pack_id == winner && c.dropped_pack_id == dropped);
        if duplicate {
            return;
        }
        tracing::debug!(winner, dropped, "pack conflict recorded");
        self.result.pack_conflicts.push(PackConflict {
            winner_pack_id: winner.to_string(),
            dropped_pack_id: dropped.to_string(),
            reason,
        });
    }

    /// Every candidate is multi-owner: admit each one that does not conflict
    /// with something already selected.
    fn resolve_shared(&mut self, capability: &str, group: &[Candidate<'_>]) {
        let mut owners = Vec::new();
        for candidate in group {
            if let Some(blocker) = self.graph.blocker(candidate.id(), &self.selected) {
                let blocker = blocker.to_string();
                let impact = self
                    .effects
                    .get(candidate.id())
                    .map(Effects::describe)
                    .unwrap_or_default();
                self.record_pack_conflict(
                    &blocker,
                    candidate.id(),
                    format!(
                        "{} conflicts with selected pack {blocker}; its contribution to shared capability {capability} ({impact}) is dropped.",
                        candidate.id()
                    ),
                );
                continue;
            }
            self.selected.insert(candidate.id().to_string());
            owners.push(candidate.id().to_string());
        }
        self.result
            .capability_owners
            .insert(capability.to_string(), owners);
    }

    /// Single-owner capability: the pinned override goes first, then the
    /// first candidate not blocked by an existing selection wins.
    fn resolve_exclusive(
        &mut self,
        capability: &str,
        group: &[Candidate<'_>],
        pinned: Option<&String>,
    ) {
        let is_pinned = |c: &Candidate<'_>| pinned.is_some_and(|id| id == c.id());
        let mut ordered = group.to_vec();
        ordered.sort_by(|a, b| {
            is_pinned(b)
                .cmp(&is_pinned(a))
                .then_with(|| by_rank(a.pack, b.pack))
        });

        let owner = ordered
            .iter()
            .find(|c| self.graph.blocker(c.id(), &self.selected).is_none())
            .copied();

        let Some(owner) = owner else {
            self.result
                .capability_owners
                .insert(capability.to_string(), Vec::new());
            for candidate in &ordered {
                if let Some(blocker) = self.graph.blocker(candidate.id(), &self.selected) {
                    let blocker = blocker.to_string();
                    self.record_pack_conflict(
                        &blocker,
                        candidate.id(),
                        format!(
                            "{} conflicts with selected pack {blocker}; capability {capability} is left without an owner.",
                            candidate.id()
                        ),
                    );
                }
            }
            return;
        };

        tracing::debug!(capability, owner = owner.id(), "capability owner resolved");
        self.selected.insert(owner.id().to_string());
        self.result
            .capability_owners
            .insert(capability.to_string(), vec![owner.id().to_string()]);

        let owner_record = self.candidate(owner.pack);
        for challenger in ordered
            .iter()
            .filter(|c| c.id() != owner.id() && !c.multi_owner)
        {
            let challenger_record = self.candidate(challenger.pack);
            let downstream_impact = format!(
                "{} keeps {}; {} would have added {}.",
                owner.id(),
                owner_record.effects.describe(),
                challenger.id(),
                challenger_record.effects.describe()
            );
            self.result.capability_conflicts.push(CapabilityConflict {
                capability: capability.to_string(),
                owner: owner_record.clone(),
                challenger: challenger_record,
                downstream_impact,
            });

            let blocker = if self.graph.blocks(owner.id(), challenger.id()) {
                Some(owner.id().to_string())
            } else {
                self.graph
                    .blocker(challenger.id(), &self.selected)
                    .map(ToString::to_string)
            };
            if let Some(blocker) = blocker {
                self.record_pack_conflict(
                    &blocker,
                    challenger.id(),
                    format!(
                        "{} declares a conflict with {blocker}, which owns {capability}.",
                        challenger.id()
                    ),
                );
            }
        }
    }

    /// Merge effects of selected packs in ascending id order; later ids
    /// overwrite earlier keys.
    fn finish(mut self) -> PackResolution {
        for id in &self.selected {
            if let Some(effects) = self.effects.get(id.as_str()) {
                self.result.scripts.extend(effects.scripts.clone());
                self.result.dependencies.extend(effects.dependencies.clone());
                self.result
                    .dev_dependencies
                    .extend(effects.dev_dependencies.clone());
            }
        }
        self.result.selected_packs = self.selected.into_iter().collect();
        self.result
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn no_overrides() -> OwnerOverrides {
        OwnerOverrides::new()
    }

    fn release_config() -> PlanConfig {
        let mut config = PlanConfig::default();
        config.ci.automatic_release = true;
        config
    }

    #[test]
    fn default_config_selects_expected_packs() {
        let result = resolve_packs(&PlanConfig::default(), &PackCatalog::builtin(), &no_overrides());
        assert_eq!(
            result.selected_packs,
            vec![
                "pack.docs.templates",
                "pack.quality.format-prettier",
                "pack.quality.lint-eslint",
                "pack.quality.test-vitest",
                "pack.runtime.framework",
            ]
        );
        assert!(result.capability_conflicts.is_empty());
        assert!(result.pack_conflicts.is_empty());
        assert_eq!(result.scripts.get("lint").unwrap(), "eslint .");
        assert_eq!(result.scripts.get("test").unwrap(), "vitest");
        assert_eq!(result.dependencies.get("next.js").unwrap(), "^1.0.0");
        assert_eq!(
            result.capability_owners.get("docs:content").unwrap(),
            &vec!["pack.docs.templates".to_string()]
        );
    }

    #[test]
    fn capability_without_candidates_is_absent() {
        let result = resolve_packs(&PlanConfig::default(), &PackCatalog::builtin(), &no_overrides());
        assert!(!result.capability_owners.contains_key("release:ownership"));
        assert!(!result.capability_owners.contains_key("build:scripts"));
    }

    #[test]
    fn higher_priority_release_pack_wins() {
        let result = resolve_packs(&release_config(), &PackCatalog::builtin(), &no_overrides());
        assert!(result.selected_packs.contains(&"pack.release.semantic".to_string()));
        assert!(!result.selected_packs.contains(&"pack.release.gh-release".to_string()));
        assert_eq!(result.capability_conflicts.len(), 1);
        let conflict = &result.capability_conflicts[0];
        assert_eq!(conflict.capability, "release:ownership");
        assert_eq!(conflict.owner.pack_id, "pack.release.semantic");
        assert_eq!(conflict.challenger.pack_id, "pack.release.gh-release");
        assert_eq!(result.pack_conflicts.len(), 1);
        assert_eq!(result.pack_conflicts[0].dropped_pack_id, "pack.release.gh-release");
        assert_eq!(result.pack_conflicts[0].winner_pack_id, "pack.release.semantic");
    }

    #[test]
    fn override_pins_lower_priority_pack() {
        let mut overrides = no_overrides();
        overrides.insert(
            "release:ownership".to_string(),
            "pack.release.gh-release".to_string(),
        );
        let result = resolve_packs(&release_config(), &PackCatalog::builtin(), &overrides);
        assert!(result.selected_packs.contains(&"pack.release.gh-release".to_string()));
        assert!(!result.selected_packs.contains(&"pack.release.semantic".to_string()));
        assert_eq!(
            result.capability_owners.get("release:ownership").unwrap(),
            &vec!["pack.release.gh-release".to_string()]
        );
    }

    #[test]
    fn override_for_ineligible_pack_is_ignored() {
        let mut overrides = no_overrides();
        overrides.insert(
            "quality:linter".to_string(),
            "pack.quality.lint-biome".to_string(),
        );
        let result = resolve_packs(&PlanConfig::default(), &PackCatalog::builtin(), &overrides);
        assert!(result.selected_packs.contains(&"pack.quality.lint-eslint".to_string()));
    }

    #[test]
    fn one_sided_conflict_keeps_packs_apart() {
        let catalog = PackCatalog::new(vec![
            PackDefinition::new("pack.a", "A", 10).claims("alpha").conflicts_with(&["pack.b"]),
            PackDefinition::new("pack.b", "B", 5).shares("beta"),
        ]);
        let result = resolve_packs(&PlanConfig::default(), &catalog, &no_overrides());
        assert_eq!(result.selected_packs, vec!["pack.a"]);
        assert_eq!(result.capability_owners.get("beta").unwrap(), &Vec::<String>::new());
        assert_eq!(result.pack_conflicts.len(), 1);
        assert_eq!(result.pack_conflicts[0].winner_pack_id, "pack.a");
        assert_eq!(result.pack_conflicts[0].dropped_pack_id, "pack.b");
    }

    #[test]
    fn shared_capability_admits_every_compatible_pack() {
        let catalog = PackCatalog::new(vec![
            PackDefinition::new("pack.docs.a", "A", 10).shares("docs:content"),
            PackDefinition::new("pack.docs.b", "B", 20).shares("docs:content"),
        ]);
        let result = resolve_packs(&PlanConfig::default(), &catalog, &no_overrides());
        assert_eq!(
            result.capability_owners.get("docs:content").unwrap(),
            &vec!["pack.docs.b".to_string(), "pack.docs.a".to_string()]
        );
        assert!(result.capability_conflicts.is_empty());
    }

    #[test]
    fn fully_blocked_capability_gets_empty_owner_list() {
        // "alpha" is decided before "beta", so pack.x is selected first and
        // then blocks both beta candidates.
        let catalog = PackCatalog::new(vec![
            PackDefinition::new("pack.x", "X", 1).claims("alpha"),
            PackDefinition::new("pack.y", "Y", 9).claims("beta").conflicts_with(&["pack.x"]),
            PackDefinition::new("pack.z", "Z", 5).claims("beta").conflicts_with(&["pack.x"]),
        ]);
        let result = resolve_packs(&PlanConfig::default(), &catalog, &no_overrides());
        assert_eq!(result.selected_packs, vec!["pack.x"]);
        assert_eq!(result.capability_owners.get("beta").unwrap(), &Vec::<String>::new());
        let dropped: Vec<&str> = result
            .pack_conflicts
            .iter()
            .map(|c| c.dropped_pack_id.as_str())
            .collect();
        assert_eq!(dropped, vec!["pack.y", "pack.z"]);
        assert!(result.pack_conflicts.iter().all(|c| c.winner_pack_id == "pack.x"));
    }

    #[test]
    fn first_unblocked_candidate_wins_when_higher_one_is_blocked() {
        let catalog = PackCatalog::new(vec![
            PackDefinition::new("pack.x", "X", 1).claims("alpha"),
            PackDefinition::new("pack.y", "Y", 9).claims("beta").conflicts_with(&["pack.x"]),
            PackDefinition::new("pack.z", "Z", 5).claims("beta"),
        ]);
        let result = resolve_packs(&PlanConfig::default(), &catalog, &no_overrides());
        assert_eq!(result.selected_packs, vec!["pack.x", "pack.z"]);
        let conflict = &result.capability_conflicts[0];
        assert_eq!(conflict.owner.pack_id, "pack.z");
        assert_eq!(conflict.challenger.pack_id, "pack.y");
        assert_eq!(result.pack_conflicts[0].winner_pack_id, "pack.x");
    }

    #[test]
    fn merge_is_last_writer_wins_by_pack_id() {
        fn first(_: &PlanConfig) -> Effects {
            Effects::new().script("build", "first")
        }
        fn second(_: &PlanConfig) -> Effects {
            Effects::new().script("build", "second")
        }
        let catalog = PackCatalog::new(vec![
            PackDefinition::new("pack.b", "B", 1).claims("two").with_effects(second),
            PackDefinition::new("pack.a", "A", 99).claims("one").with_effects(first),
        ]);
        let result = resolve_packs(&PlanConfig::default(), &catalog, &no_overrides());
        assert_eq!(result.scripts.get("build").unwrap(), "second");
    }

    #[test]
    fn selected_packs_never_conflict() {
        let catalog = PackCatalog::builtin();
        let mut config = release_config();
        config.stack.builder = "Vite".to_string();
        let result = resolve_packs(&config, &catalog, &no_overrides());
        let graph = ConflictGraph::from_packs(catalog.packs());
        for a in &result.selected_packs {
            for b in &result.selected_packs {
                assert!(!graph.blocks(a, b), "{a} and {b} both selected");
            }
        }
    }

    #[test]
    fn impact_note_names_both_sides() {
        let mut config = release_config();
        config.quality.testing = true;
        let result = resolve_packs(&config, &PackCatalog::builtin(), &no_overrides());
        let note = &result.capability_conflicts[0].downstream_impact;
        assert!(note.contains("pack.release.semantic keeps"));
        assert!(note.contains("pack.release.gh-release would have added"));
    }
}
