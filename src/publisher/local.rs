//! Channel that publishes into the local working copy.
use super::{PublishChannel, PublishTarget};
use crate::engine::OperationType;

/// Publishing into a local working copy; targets pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalChannel;

impl PublishChannel for LocalChannel {
    fn target(&self) -> PublishTarget {
        PublishTarget::Local
    }

    fn verb(&self, kind: OperationType) -> &'static str {
        match kind {
            OperationType::CreateFile => "write-file",
            OperationType::Install => "install-dependencies",
            OperationType::Quality => "run-quality-gates",
            OperationType::Complete => "complete",
            OperationType::Init | OperationType::Check => "workflow",
        }
    }

    fn qualify(&self, _index: usize, raw: &str) -> String {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs() {
        let channel = LocalChannel;
        assert_eq!(channel.verb(OperationType::CreateFile), "write-file");
        assert_eq!(channel.verb(OperationType::Check), "workflow");
        assert_eq!(channel.target(), PublishTarget::Local);
    }

    #[test]
    fn target_unchanged() {
        assert_eq!(LocalChannel.qualify(4, "README.md"), "README.md");
    }
}
