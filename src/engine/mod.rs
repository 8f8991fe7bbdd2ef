//! The compiler pipeline.
//!
//! Every stage is a pure function of its inputs: normalize, resolve packs,
//! compile automation and governance, materialize the change plan. A
//! [`Compilation`] bundles one pass so callers never mix outputs of
//! different configurations.
pub mod automation;
pub mod change_plan;
pub mod decisions;
pub mod diff;
pub mod fingerprint;
pub mod governance;
pub mod normalize;
pub mod recommend;
pub mod repo_spec;

pub use change_plan::{ChangePlan, Operation, OperationType, materialize_change_plan};
pub use diff::{ChangePlanDiff, build_change_plan_diff};
pub use recommend::{RecommendationCandidate, recommend_automation_candidates};
pub use repo_spec::{RepoSpec, compile_repo_spec};

use serde::Serialize;

use crate::config::PlanConfig;
use crate::packs::{OwnerOverrides, PackCatalog};

/// A consistent snapshot of one full pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compilation {
    /// Compiled specification.
    pub repo_spec: RepoSpec,
    /// Plan materialized from `repo_spec`.
    pub change_plan: ChangePlan,
}

impl Compilation {
    /// Compile `config` to completion.
    #[must_use]
    pub fn run(config: &PlanConfig, catalog: &PackCatalog, overrides: &OwnerOverrides) -> Self {
        let repo_spec = compile_repo_spec(config, catalog, overrides);
        let change_plan = materialize_change_plan(&repo_spec);
        tracing::debug!(
            files = repo_spec.files.len(),
            operations = change_plan.operations.len(),
            "compiled repository plan"
        );
        Self {
            repo_spec,
            change_plan,
        }
    }
}
