//! Configuration validators that report warnings without rejecting the file.
use std::collections::BTreeSet;

use super::{PlanConfig, Webhook};
use crate::packs::{OwnerOverrides, PackCatalog};

/// Upper bound for the coverage target percentage.
const MAX_COVERAGE_TARGET: u32 = 100;

/// A validation warning detected while preparing a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration area (e.g., "project", "github.webhooks").
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `item` within `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for configuration validators.
///
/// Validators never fail; they report suspicious input that still compiles.
pub trait ConfigValidator {
    /// Validate and return any warnings found.
    fn validate(&self) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator (e.g., "project", "webhooks").
    fn name(&self) -> &'static str;
}

/// Validator for project identity and quality targets.
#[derive(Debug)]
pub struct ProjectValidator<'a> {
    config: &'a PlanConfig,
}

impl<'a> ProjectValidator<'a> {
    /// Borrow what the validator inspects.
    #[must_use]
    pub const fn new(config: &'a PlanConfig) -> Self {
        Self { config }
    }
}

impl ConfigValidator for ProjectValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if self.config.project_name.trim().is_empty() {
            warnings.push(ValidationWarning::new(
                "project",
                "projectName",
                "project name is empty",
            ));
        }

        let target = self.config.quality.coverage_target;
        if target > MAX_COVERAGE_TARGET {
            warnings.push(ValidationWarning::new(
                "quality",
                "coverageTarget",
                format!("coverage target {target} exceeds {MAX_COVERAGE_TARGET}%"),
            ));
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "project"
    }
}

/// Validator for webhook definitions.
#[derive(Debug)]
pub struct WebhookValidator<'a> {
    webhooks: &'a [Webhook],
}

impl<'a> WebhookValidator<'a> {
    /// Borrow what the validator inspects.
    #[must_use]
    pub const fn new(webhooks: &'a [Webhook]) -> Self {
        Self { webhooks }
    }
}

impl ConfigValidator for WebhookValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for hook in self.webhooks {
            let item = if hook.id.trim().is_empty() {
                "<unnamed>"
            } else {
                hook.id.as_str()
            };
            if hook.url.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    "github.webhooks",
                    item,
                    "webhook URL is empty",
                ));
            }
            if hook.events.is_empty() {
                warnings.push(ValidationWarning::new(
                    "github.webhooks",
                    item,
                    "webhook subscribes to no events",
                ));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "webhooks"
    }
}

/// Validator for duplicate entries in list-valued settings.
///
/// Duplicates are harmless to the compiler but usually point at a typo.
#[derive(Debug)]
pub struct DuplicateEntryValidator<'a> {
    lists: [(&'static str, &'a [String]); 3],
}

impl<'a> DuplicateEntryValidator<'a> {
    /// Borrow what the validator inspects.
    #[must_use]
    pub fn new(config: &'a PlanConfig) -> Self {
        Self {
            lists: [
                ("github.topics", &config.github.topics),
                ("github.secrets", &config.github.secrets),
                ("github.environments", &config.github.environments),
            ],
        }
    }
}

impl ConfigValidator for DuplicateEntryValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for (source, values) in self.lists {
            let mut seen = BTreeSet::new();
            let mut reported = BTreeSet::new();
            for value in values {
                let trimmed = value.trim();
                if !seen.insert(trimmed) && reported.insert(trimmed) {
                    warnings.push(ValidationWarning::new(
                        source,
                        trimmed,
                        "entry appears more than once",
                    ));
                }
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "duplicates"
    }
}

/// Validator for capability owner overrides.
#[derive(Debug)]
pub struct OverrideValidator<'a> {
    overrides: &'a OwnerOverrides,
    catalog: &'a PackCatalog,
}

impl<'a> OverrideValidator<'a> {
    /// Borrow what the validator inspects.
    #[must_use]
    pub const fn new(overrides: &'a OwnerOverrides, catalog: &'a PackCatalog) -> Self {
        Self { overrides, catalog }
    }
}

impl ConfigValidator for OverrideValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let capabilities = self.catalog.capability_names();

        for (capability, pack_id) in self.overrides {
            if !capabilities.contains(&capability.as_str()) {
                warnings.push(ValidationWarning::new(
                    "overrides",
                    capability,
                    "no pack declares this capability",
                ));
                continue;
            }
            match self.catalog.get(pack_id) {
                None => warnings.push(ValidationWarning::new(
                    "overrides",
                    capability,
                    format!("unknown pack '{pack_id}'"),
                )),
                Some(pack) if !pack.claims_capability(capability) => {
                    warnings.push(ValidationWarning::new(
                        "overrides",
                        capability,
                        format!("pack '{pack_id}' does not claim this capability"),
                    ));
                }
                Some(_) => {}
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "overrides"
    }
}

/// Validate the configuration and overrides, returning collected warnings.
#[must_use]
pub fn validate_all(
    config: &PlanConfig,
    overrides: &OwnerOverrides,
    catalog: &PackCatalog,
) -> Vec<ValidationWarning> {
    let validators: Vec<Box<dyn ConfigValidator + '_>> = vec![
        Box::new(ProjectValidator::new(config)),
        Box::new(WebhookValidator::new(&config.github.webhooks)),
        Box::new(DuplicateEntryValidator::new(config)),
        Box::new(OverrideValidator::new(overrides, catalog)),
    ];

    let mut all_warnings = Vec::new();
    for validator in validators {
        let warnings = validator.validate();
        tracing::debug!(
            validator = validator.name(),
            warnings = warnings.len(),
            "configuration validated"
        );
        all_warnings.extend(warnings);
    }

    all_warnings
}
