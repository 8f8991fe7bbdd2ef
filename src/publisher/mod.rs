//! Target-specific publish actions derived from a change plan.
//!
//! Publishing never performs anything: it describes, in a target's own
//! vocabulary, what applying the plan would do. Artifact actions always come
//! first (renderer order), then one action per operation (plan order).
mod create_repo;
mod local;
mod pr;

pub use create_repo::CreateRepoChannel;
pub use local::LocalChannel;
pub use pr::{PullRequestChannel, branch_slug};

use serde::{Deserialize, Serialize};

use crate::config::PlanConfig;
use crate::engine::{ChangePlan, OperationType, RepoSpec};
use crate::renderer::{ArtifactKind, RenderOptions, render_publisher_artifacts};

/// Where a plan would be published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublishTarget {
    /// Write into a local working copy.
    #[default]
    Local,
    /// Stage on a branch and open a pull request.
    Pr,
    /// Create and seed a new hosted repository.
    CreateRepo,
}

impl PublishTarget {
    /// Action and id prefix for this target.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Pr => "pr",
            Self::CreateRepo => "create-repo",
        }
    }
}

/// `power` unlocks experimental renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMode {
    /// Stable output only.
    #[default]
    Basic,
    /// Experimental renderers enabled.
    Power,
}

/// One described publish step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherAction {
    /// `<prefix>-op-<n>` or `<prefix>-render-<n>`, one-based.
    pub id: String,
    /// `<prefix>.<verb>`.
    pub action: String,
    /// Where the channel puts the operation's output.
    pub target: String,
    /// Operation the action was derived from.
    pub source_operation_id: String,
}

/// How a publish run behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOptions {
    /// Describe actions without performing them.
    pub dry_run: bool,
    /// Mode that gates experimental output.
    pub user_mode: UserMode,
    /// Channel to publish through.
    pub target: PublishTarget,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            dry_run: true,
            user_mode: UserMode::Basic,
            target: PublishTarget::Local,
        }
    }
}

/// A publish target's vocabulary.
pub trait PublishChannel {
    /// Which target this channel speaks for.
    fn target(&self) -> PublishTarget;

    /// Verb for an operation of type `kind`.
    fn verb(&self, kind: OperationType) -> &'static str;

    /// Qualify the raw target of the action at `index` (zero-based within
    /// its group).
    fn qualify(&self, index: usize, raw: &str) -> String;
}

fn channel_for(config: &PlanConfig, spec: &RepoSpec, target: PublishTarget) -> Box<dyn PublishChannel> {
    match target {
        PublishTarget::Local => Box::new(LocalChannel),
        PublishTarget::Pr => Box::new(PullRequestChannel::new(&spec.name)),
        PublishTarget::CreateRepo => Box::new(CreateRepoChannel::new(config.visibility, &spec.name)),
    }
}

/// Describe publishing `plan` to `options.target`.
#[must_use]
pub fn publish_from_change_plan(
    config: &PlanConfig,
    spec: &RepoSpec,
    plan: &ChangePlan,
    options: PublishOptions,
) -> Vec<PublisherAction> {
    let channel = channel_for(config, spec, options.target);
    let prefix = channel.target().prefix();
    let artifacts = render_publisher_artifacts(
        config,
        spec,
        RenderOptions {
            dry_run: options.dry_run,
            enable_rust_experimental: options.user_mode == UserMode::Power,
        },
    );
    let source = plan.first_operation_id();

    let mut actions: Vec<PublisherAction> = artifacts
        .iter()
        .enumerate()
        .map(|(index, artifact)| {
            let verb = if artifact.kind == ArtifactKind::PlannedAction {
                "plan"
            } else {
                "render"
            };
            PublisherAction {
                id: format!("{prefix}-render-{}", index + 1),
                action: format!("{prefix}.{verb}"),
                // Artifacts land together, so they share the first qualifier.
                target: channel.qualify(0, &artifact.path),
                source_operation_id: source.to_string(),
            }
        })
        .collect();

    actions.extend(plan.operations.iter().enumerate().map(|(index, op)| {
        PublisherAction {
            id: format!("{prefix}-op-{}", index + 1),
            action: format!("{prefix}.{}", channel.verb(op.kind)),
            target: channel.qualify(index, op.target_or_message()),
            source_operation_id: op.id.clone(),
        }
    }));

    tracing::debug!(
        publish_target = prefix,
        artifacts = artifacts.len(),
        operations = plan.operations.len(),
        "mapped publisher actions"
    );
    actions
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::engine::{compile_repo_spec, materialize_change_plan};
    use crate::packs::{OwnerOverrides, PackCatalog};

    fn publish(config: &PlanConfig, target: PublishTarget) -> Vec<PublisherAction> {
        let spec = compile_repo_spec(config, &PackCatalog::builtin(), &OwnerOverrides::new());
        let plan = materialize_change_plan(&spec);
        publish_from_change_plan(
            config,
            &spec,
            &plan,
            PublishOptions {
                target,
                ..PublishOptions::default()
            },
        )
    }

    #[test]
    fn artifact_actions_precede_operation_actions() {
        let actions = publish(&PlanConfig::default(), PublishTarget::Local);
        let first_op = actions
            .iter()
            .position(|a| a.id.starts_with("local-op-"))
            .unwrap();
        assert!(actions[..first_op].iter().all(|a| a.id.starts_with("local-render-")));
        assert!(actions[first_op..].iter().all(|a| a.id.starts_with("local-op-")));
        // 9 artifacts for the default TypeScript stack, 18 operations.
        assert_eq!(first_op, 9);
        assert_eq!(actions.len(), 9 + 18);
    }

    #[test]
    fn planned_artifacts_map_to_plan_action() {
        let actions = publish(&PlanConfig::default(), PublishTarget::Local);
        let preview = actions
            .iter()
            .find(|a| a.target == ".github/rulesets/preview.json")
            .unwrap();
        assert_eq!(preview.action, "local.plan");
        assert_eq!(actions[0].action, "local.render");
        assert_eq!(actions[0].source_operation_id, "init");
    }

    #[test]
    fn operation_sources_follow_plan() {
        let actions = publish(&PlanConfig::default(), PublishTarget::Local);
        let ops: Vec<&PublisherAction> =
            actions.iter().filter(|a| a.id.contains("-op-")).collect();
        assert_eq!(ops[0].source_operation_id, "init");
        assert_eq!(ops.last().unwrap().source_operation_id, "complete");
        assert_eq!(ops.last().unwrap().action, "local.complete");
    }

    #[test]
    fn pr_targets_carry_branch() {
        let actions = publish(&PlanConfig::default(), PublishTarget::Pr);
        assert_eq!(
            actions[0].target,
            "codex/my-awesome-project/apply-1:.projenrc.ts"
        );
        let install = actions.iter().find(|a| a.action == "pr.update-lockfiles").unwrap();
        assert!(install.target.starts_with("codex/my-awesome-project/apply-"));
        assert!(install.target.ends_with(":Installing dependencies via pnpm..."));
    }

    #[test]
    fn create_repo_targets_carry_repository() {
        let actions = publish(&PlanConfig::default(), PublishTarget::CreateRepo);
        assert!(
            actions
                .iter()
                .all(|a| a.target.starts_with("public:my-awesome-project/"))
        );
        assert!(actions.iter().any(|a| a.action == "create-repo.seed-file"));
        assert!(actions.iter().any(|a| a.action == "create-repo.initialize"));
    }

    #[test]
    fn power_mode_enables_experimental_rust() {
        let mut config = PlanConfig::default();
        config.stack.language = crate::config::Language::Rust;
        config.stack.rust_mode = crate::config::RustMode::ProjenExperimental;
        let spec = compile_repo_spec(&config, &PackCatalog::builtin(), &OwnerOverrides::new());
        let plan = materialize_change_plan(&spec);
        let basic = publish_from_change_plan(&config, &spec, &plan, PublishOptions::default());
        let power = publish_from_change_plan(
            &config,
            &spec,
            &plan,
            PublishOptions {
                user_mode: UserMode::Power,
                ..PublishOptions::default()
            },
        );
        assert!(power.iter().any(|a| a.target == ".projenrc.ts"));
        assert!(!basic.iter().any(|a| a.target == ".projenrc.ts"));
    }

    #[test]
    fn target_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&PublishTarget::CreateRepo).unwrap(),
            "\"create-repo\""
        );
    }
}
