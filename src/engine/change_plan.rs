//! Ordered bootstrap operations derived from a [`RepoSpec`].
use serde::{Deserialize, Serialize};

use super::repo_spec::RepoSpec;

/// Current change-plan schema version.
pub const CHANGE_PLAN_VERSION: u32 = 1;

/// Final message of every plan.
pub const COMPLETE_MESSAGE: &str = "Bootstrap complete. Ready to code.";

/// What a bootstrap step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Start the bootstrap.
    Init,
    /// Verify a prerequisite.
    Check,
    /// Write a manifest file.
    CreateFile,
    /// Install dependencies.
    Install,
    /// Configure quality gates.
    Quality,
    /// Finish the bootstrap.
    Complete,
}

impl OperationType {
    /// Wire name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Check => "check",
            Self::CreateFile => "create_file",
            Self::Install => "install",
            Self::Quality => "quality",
            Self::Complete => "complete",
        }
    }
}

/// A single bootstrap step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Step id, unique within a plan.
    pub id: String,
    /// Step kind.
    #[serde(rename = "type")]
    pub kind: OperationType,
    /// Human-readable description.
    pub message: String,
    /// File path or other object of the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Operation {
    fn new(id: impl Into<String>, kind: OperationType, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            message: message.into(),
            target: None,
        }
    }

    /// The operation's target, or its message when it has none.
    #[must_use]
    pub fn target_or_message(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.message)
    }
}

/// Ordered list of bootstrap operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePlan {
    /// Schema version, see [`CHANGE_PLAN_VERSION`].
    pub version: u32,
    /// Steps in execution order.
    pub operations: Vec<Operation>,
}

impl ChangePlan {
    /// Id of the first operation, or `init` for an empty plan.
    #[must_use]
    pub fn first_operation_id(&self) -> &str {
        self.operations.first().map_or("init", |op| op.id.as_str())
    }
}

fn pack_summary(spec: &RepoSpec) -> Option<String> {
    let packs = spec.packs.as_ref()?;
    let listed = if packs.selected_packs.is_empty() {
        "none".to_string()
    } else {
        packs.selected_packs.join(", ")
    };
    Some(format!("Resolved repository packs: {listed}."))
}

/// Turn a repository specification into its bootstrap plan.
///
/// Ids come from fixed names and a file counter, never from content, so a
/// different manifest changes messages but not the id scheme.
#[must_use]
pub fn materialize_change_plan(spec: &RepoSpec) -> ChangePlan {
    let mut operations = vec![
        Operation::new("init", OperationType::Init, "Initializing git repository..."),
        Operation::new("check", OperationType::Check, "Checking system requirements..."),
        Operation::new(
            "check-compat",
            OperationType::Check,
            "Validating dependency compatibility matrix...",
        ),
    ];
    if let Some(summary) = pack_summary(spec) {
        operations.push(Operation::new("resolve-packs", OperationType::Check, summary));
    }

    operations.extend(spec.files.iter().enumerate().map(|(index, path)| Operation {
        id: format!("create-{}", index + 1),
        kind: OperationType::CreateFile,
        message: format!("Created {path}"),
        target: Some(path.clone()),
    }));

    operations.extend([
        Operation::new(
            "install",
            OperationType::Install,
            format!("Installing dependencies via {}...", spec.package_manager),
        ),
        Operation::new("quality", OperationType::Quality, "Running initial lint & format..."),
        Operation::new("complete", OperationType::Complete, COMPLETE_MESSAGE),
    ]);

    ChangePlan {
        version: CHANGE_PLAN_VERSION,
        operations,
    }
}
