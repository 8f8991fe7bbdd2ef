//! Canonical form of a configuration.
//!
//! Free-text fields are trimmed and unordered collections are sorted with
//! blank entries removed, so inputs that differ only in list order or stray
//! whitespace normalize to equal values.
use crate::config::{PlanConfig, Webhook};

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim every entry, drop blanks, sort.
fn canonical_list(values: &[String]) -> Vec<String> {
    let mut list: Vec<String> = values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    list.sort();
    list
}

fn canonical_webhook(hook: &Webhook) -> Webhook {
    Webhook {
        id: hook.id.trim().to_string(),
        url: hook.url.trim().to_string(),
        content_type: hook.content_type.trim().to_string(),
        events: canonical_list(&hook.events),
        active: hook.active,
    }
}

/// Return the normalized copy of `config`. Idempotent.
#[must_use]
pub fn normalize_config(config: &PlanConfig) -> PlanConfig {
    let mut normalized = config.clone();

    for field in [
        &mut normalized.project_name,
        &mut normalized.license,
        &mut normalized.basics.description,
        &mut normalized.github.branches.default,
        &mut normalized.stack.language_version,
        &mut normalized.stack.framework,
        &mut normalized.stack.package_manager,
        &mut normalized.stack.build_tool,
        &mut normalized.stack.builder,
        &mut normalized.quality.linter,
        &mut normalized.quality.formatter,
        &mut normalized.quality.test_framework,
    ] {
        trim_in_place(field);
    }

    let github = &mut normalized.github;
    github.topics = canonical_list(&github.topics);
    github.environments = canonical_list(&github.environments);
    github.secrets = canonical_list(&github.secrets);

    let mut webhooks: Vec<Webhook> = github.webhooks.iter().map(canonical_webhook).collect();
    // Ties on id fall back to the remaining fields so order never leaks through.
    webhooks.sort_by(|a, b| {
        a.id.cmp(&b.id)
            .then_with(|| a.url.cmp(&b.url))
            .then_with(|| a.events.cmp(&b.events))
            .then_with(|| a.content_type.cmp(&b.content_type))
            .then_with(|| a.active.cmp(&b.active))
    });
    github.webhooks = webhooks;

    normalized
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn hook(id: &str, url: &str, events: &[&str]) -> Webhook {
        Webhook {
            id: id.to_string(),
            url: url.to_string(),
            events: events.iter().map(ToString::to_string).collect(),
            ..Webhook::default()
        }
    }

    #[test]
    fn trims_free_text() {
        let mut config = PlanConfig::default();
        config.project_name = "  spaced-name \n".to_string();
        config.stack.framework = " Next.js ".to_string();
        let normalized = normalize_config(&config);
        assert_eq!(normalized.project_name, "spaced-name");
        assert_eq!(normalized.stack.framework, "Next.js");
    }

    #[test]
    fn sorts_and_drops_blank_list_entries() {
        let mut config = PlanConfig::default();
        config.github.topics = vec!["web".into(), "  ".into(), " api".into()];
        config.github.secrets = vec!["B".into(), "A".into()];
        let normalized = normalize_config(&config);
        assert_eq!(normalized.github.topics, vec!["api", "web"]);
        assert_eq!(normalized.github.secrets, vec!["A", "B"]);
    }

    #[test]
    fn webhooks_sorted_by_id_with_sorted_events() {
        let mut config = PlanConfig::default();
        config.github.webhooks = vec![
            hook("zeta", "https://z.test", &["push", "issues"]),
            hook(" alpha", "https://a.test ", &["release"]),
        ];
        let normalized = normalize_config(&config);
        let ids: Vec<&str> = normalized.github.webhooks.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
        assert_eq!(normalized.github.webhooks[1].events, vec!["issues", "push"]);
        assert_eq!(normalized.github.webhooks[0].url, "https://a.test");
    }

    #[test]
    fn order_insensitive() {
        let mut first = PlanConfig::default();
        first.github.topics = vec!["a".into(), "b".into(), "c".into()];
        first.github.environments = vec!["staging".into(), "production".into()];
        first.github.webhooks = vec![hook("x", "u1", &["push"]), hook("x", "u0", &["push"])];

        let mut second = first.clone();
        second.github.topics.reverse();
        second.github.environments.reverse();
        second.github.webhooks.reverse();

        assert_eq!(normalize_config(&first), normalize_config(&second));
    }

    #[test]
    fn idempotent() {
        let mut config = PlanConfig::default();
        config.project_name = " x ".into();
        config.github.topics = vec!["b".into(), "a".into()];
        let once = normalize_config(&config);
        assert_eq!(normalize_config(&once), once);
    }

    #[test]
    fn input_is_not_mutated() {
        let mut config = PlanConfig::default();
        config.github.topics = vec!["b".into(), "a".into()];
        let _ = normalize_config(&config);
        assert_eq!(config.github.topics, vec!["b", "a"]);
    }
}
