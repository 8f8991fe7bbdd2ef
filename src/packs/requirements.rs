//! Requirement tags derived from a configuration, and eligibility matching.
use std::collections::BTreeSet;

use crate::config::PlanConfig;

/// The set of tags a configuration satisfies.
///
/// A pack is eligible when every one of its requirement tags is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementTags(BTreeSet<String>);

impl RequirementTags {
    /// Derive tags from (normalized) configuration choices.
    ///
    /// Values are trimmed and lowercased, so `" ESLint "` yields
    /// `quality:linter:eslint`.
    #[must_use]
    pub fn from_config(config: &PlanConfig) -> Self {
        let mut tags = BTreeSet::new();
        let lower = |value: &str| value.trim().to_lowercase();

        let framework = lower(&config.stack.framework);
        if !framework.is_empty() {
            tags.insert("stack:framework:present".to_string());
            tags.insert(format!("stack:framework:{framework}"));
        }
        tags.insert(format!(
            "stack:language:{}",
            config.stack.language.label().to_lowercase()
        ));
        tags.insert(format!("builder:{}", lower(&config.stack.builder)));
        tags.insert(format!("quality:linter:{}", lower(&config.quality.linter)));
        tags.insert(format!(
            "quality:formatter:{}",
            lower(&config.quality.formatter)
        ));
        if config.quality.testing {
            tags.insert("quality:testing:on".to_string());
            tags.insert(format!(
                "quality:test:{}",
                lower(&config.quality.test_framework)
            ));
        }
        if config.ci.automatic_release {
            tags.insert("ci:auto-release:on".to_string());
        }
        if config.docs.readme {
            tags.insert("docs:readme:on".to_string());
        }
        Self(tags)
    }

    /// Whether `tag` is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Whether every tag in `required` is present.
    ///
    /// An empty requirement list is always satisfied.
    #[must_use]
    pub fn satisfies(&self, required: &[String]) -> bool {
        required.iter().all(|tag| self.0.contains(tag))
    }

    /// Tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RequirementTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> RequirementTags {
        values.iter().copied().collect()
    }

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn satisfies_requires_all_tags() {
        let active = tags(&["quality:testing:on", "quality:test:vitest"]);
        assert!(active.satisfies(&owned(&["quality:testing:on", "quality:test:vitest"])));
        assert!(!active.satisfies(&owned(&["quality:testing:on", "quality:test:jest"])));
    }

    #[test]
    fn empty_requirements_are_satisfied() {
        assert!(tags(&[]).satisfies(&[]));
        assert!(tags(&["docs:readme:on"]).satisfies(&[]));
    }

    #[test]
    fn empty_tags_satisfy_nothing_required() {
        assert!(!tags(&[]).satisfies(&owned(&["docs:readme:on"])));
    }

    #[test]
    fn default_config_tags() {
        let derived = RequirementTags::from_config(&PlanConfig::default());
        let listed: Vec<&str> = derived.iter().collect();
        assert_eq!(
            listed,
            vec![
                "builder:none",
                "docs:readme:on",
                "quality:formatter:prettier",
                "quality:linter:eslint",
                "quality:test:vitest",
                "quality:testing:on",
                "stack:framework:next.js",
                "stack:framework:present",
                "stack:language:typescript",
            ]
        );
    }

    #[test]
    fn testing_off_drops_test_tags() {
        let mut config = PlanConfig::default();
        config.quality.testing = false;
        let derived = RequirementTags::from_config(&config);
        assert!(!derived.contains("quality:testing:on"));
        assert!(!derived.contains("quality:test:vitest"));
    }

    #[test]
    fn blank_framework_has_no_framework_tags() {
        let mut config = PlanConfig::default();
        config.stack.framework = "   ".to_string();
        let derived = RequirementTags::from_config(&config);
        assert!(!derived.contains("stack:framework:present"));
        assert!(derived.iter().all(|t| !t.starts_with("stack:framework:")));
    }

    #[test]
    fn values_are_trimmed_and_lowercased() {
        let mut config = PlanConfig::default();
        config.quality.linter = "  Biome ".to_string();
        config.ci.automatic_release = true;
        let derived = RequirementTags::from_config(&config);
        assert!(derived.contains("quality:linter:biome"));
        assert!(derived.contains("ci:auto-release:on"));
    }
}
