//! Channel that publishes by creating a new hosted repository.
use super::{PublishChannel, PublishTarget};
use crate::config::Visibility;
use crate::engine::OperationType;

/// Publishing by creating a fresh hosted repository.
#[derive(Debug, Clone)]
pub struct CreateRepoChannel {
    /// `visibility:projectName`.
    repository: String,
}

impl CreateRepoChannel {
    /// Channel for a repository named `project_name` with `visibility`.
    #[must_use]
    pub fn new(visibility: Visibility, project_name: &str) -> Self {
        Self {
            repository: format!("{}:{project_name}", visibility.as_str()),
        }
    }
}

impl PublishChannel for CreateRepoChannel {
    fn target(&self) -> PublishTarget {
        PublishTarget::CreateRepo
    }

    fn verb(&self, kind: OperationType) -> &'static str {
        match kind {
            OperationType::CreateFile => "seed-file",
            OperationType::Install => "install-dependencies",
            OperationType::Quality => "configure-protection",
            OperationType::Complete => "initialize",
            OperationType::Init | OperationType::Check => "bootstrap",
        }
    }

    fn qualify(&self, _index: usize, raw: &str) -> String {
        format!("{}/{raw}", self.repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifies_with_visibility_and_name() {
        let channel = CreateRepoChannel::new(Visibility::Private, "svc");
        assert_eq!(channel.qualify(7, "README.md"), "private:svc/README.md");
        assert_eq!(channel.target(), PublishTarget::CreateRepo);
    }

    #[test]
    fn verbs() {
        let channel = CreateRepoChannel::new(Visibility::Public, "svc");
        assert_eq!(channel.verb(OperationType::Quality), "configure-protection");
        assert_eq!(channel.verb(OperationType::Check), "bootstrap");
    }
}
