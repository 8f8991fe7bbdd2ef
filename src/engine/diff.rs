//! Operation-level diff between two change plans.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::change_plan::{ChangePlan, Operation};

/// Operations present in only one of two plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePlanDiff {
    /// Operations only in the newer plan.
    pub added: Vec<Operation>,
    /// Operations only in the older plan.
    pub removed: Vec<Operation>,
}

impl ChangePlanDiff {
    /// True when the plans hold the same operations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// `type|target|message`; ids are ignored since they are positional.
#[must_use]
pub fn operation_fingerprint(op: &Operation) -> String {
    format!(
        "{}|{}|{}",
        op.kind.as_str(),
        op.target.as_deref().unwrap_or_default(),
        op.message
    )
}

/// Diff `previous` against `next`, keeping each plan's order.
#[must_use]
pub fn build_change_plan_diff(previous: &ChangePlan, next: &ChangePlan) -> ChangePlanDiff {
    let before: HashSet<String> = previous.operations.iter().map(operation_fingerprint).collect();
    let after: HashSet<String> = next.operations.iter().map(operation_fingerprint).collect();

    ChangePlanDiff {
        added: next
            .operations
            .iter()
            .filter(|op| !before.contains(&operation_fingerprint(op)))
            .cloned()
            .collect(),
        removed: previous
            .operations
            .iter()
            .filter(|op| !after.contains(&operation_fingerprint(op)))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::{Architecture, PlanConfig};
    use crate::engine::change_plan::{OperationType, materialize_change_plan};
    use crate::engine::repo_spec::compile_repo_spec;
    use crate::packs::{OwnerOverrides, PackCatalog};

    fn plan_for(config: &PlanConfig) -> ChangePlan {
        materialize_change_plan(&compile_repo_spec(
            config,
            &PackCatalog::builtin(),
            &OwnerOverrides::new(),
        ))
    }

    #[test]
    fn identical_plans_have_empty_diff() {
        let plan = plan_for(&PlanConfig::default());
        assert!(build_change_plan_diff(&plan, &plan).is_empty());
    }

    #[test]
    fn fingerprint_ignores_id() {
        let op = Operation {
            id: "create-3".to_string(),
            kind: OperationType::CreateFile,
            message: "Created a".to_string(),
            target: Some("a".to_string()),
        };
        let mut renumbered = op.clone();
        renumbered.id = "create-9".to_string();
        assert_eq!(operation_fingerprint(&op), operation_fingerprint(&renumbered));
        assert_eq!(operation_fingerprint(&op), "create_file|a|Created a");
    }

    #[test]
    fn architecture_change_swaps_source_files() {
        let before = plan_for(&PlanConfig::default());
        let mut config = PlanConfig::default();
        config.architecture = Architecture::Hexagonal;
        let after = plan_for(&config);

        let diff = build_change_plan_diff(&before, &after);
        let added: Vec<&str> = diff.added.iter().filter_map(|op| op.target.as_deref()).collect();
        let removed: Vec<&str> = diff.removed.iter().filter_map(|op| op.target.as_deref()).collect();
        assert_eq!(
            added,
            vec![
                "src/adapters/http/handler.ts",
                "src/domain/entity.ts",
                "src/ports/repository.ts",
            ]
        );
        assert_eq!(removed, vec!["src/index.ts", "src/utils.ts"]);
    }

    #[test]
    fn message_change_is_add_plus_remove() {
        let before = plan_for(&PlanConfig::default());
        let mut config = PlanConfig::default();
        config.stack.package_manager = "yarn".to_string();
        let after = plan_for(&config);

        let diff = build_change_plan_diff(&before, &after);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.removed.len(), 1);
        assert_eq!(diff.added[0].message, "Installing dependencies via yarn...");
    }
}
