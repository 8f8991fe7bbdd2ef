//! Pull-request publishing vocabulary.
use super::{PublishChannel, PublishTarget};
use crate::engine::OperationType;

const BRANCH_PREFIX: &str = "codex";

/// Lowercase `name` and collapse every run of characters outside `a-z0-9`
/// to a single `-`. Leading and trailing runs are kept as dashes.
#[must_use]
pub fn branch_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_run = false;
        } else if !in_run {
            slug.push('-');
            in_run = true;
        }
    }
    slug
}

/// Publishing through pull requests; each step names its branch.
#[derive(Debug, Clone)]
pub struct PullRequestChannel {
    slug: String,
}

impl PullRequestChannel {
    /// Channel whose branches are named after `project_name`.
    #[must_use]
    pub fn new(project_name: &str) -> Self {
        Self {
            slug: branch_slug(project_name),
        }
    }

    /// Branch for the step at zero-based `index`.
    #[must_use]
    pub fn branch(&self, index: usize) -> String {
        format!("{BRANCH_PREFIX}/{}/apply-{}", self.slug, index + 1)
    }
}

impl PublishChannel for PullRequestChannel {
    fn target(&self) -> PublishTarget {
        PublishTarget::Pr
    }

    fn verb(&self, kind: OperationType) -> &'static str {
        match kind {
            OperationType::CreateFile => "stage-file",
            OperationType::Install => "update-lockfiles",
            OperationType::Quality => "verify-checks",
            OperationType::Complete => "open",
            OperationType::Init | OperationType::Check => "prepare",
        }
    }

    fn qualify(&self, index: usize, raw: &str) -> String {
        format!("{}:{raw}", self.branch(index))
    }
}
