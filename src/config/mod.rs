//! The wizard configuration (`PlanConfig`) and everything that produces one:
//! defaults, file loading, preset bundles and validation.
pub mod loader;
pub mod presets;
pub mod validation;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Repository visibility on the hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Anyone can read the repository.
    #[default]
    Public,
    /// Only collaborators can read the repository.
    Private,
}

impl Visibility {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// Single repository or workspace of packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepoStructure {
    /// Several packages in one repository.
    Monorepo,
    /// One package per repository.
    #[default]
    Polyrepo,
}

/// Kind of software the repository will hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectType {
    /// Reusable package.
    Library,
    /// Long-running backend.
    Service,
    /// Browser application.
    #[default]
    #[serde(rename = "Web App")]
    WebApp,
    /// Command-line program.
    #[serde(rename = "CLI Tool")]
    CliTool,
    /// Native desktop application.
    #[serde(rename = "Desktop App")]
    DesktopApp,
}

impl ProjectType {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Library => "Library",
            Self::Service => "Service",
            Self::WebApp => "Web App",
            Self::CliTool => "CLI Tool",
            Self::DesktopApp => "Desktop App",
        }
    }
}

/// Source layout convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Architecture {
    /// Conventional `src/` layout.
    #[default]
    Standard,
    /// Ports and adapters.
    Hexagonal,
    /// Concentric domain, application and infrastructure layers.
    Clean,
    /// One folder per feature.
    #[serde(rename = "Vertical Slice")]
    VerticalSlice,
    /// Model, view, controller.
    #[serde(rename = "MVC")]
    Mvc,
    /// Producers and consumers around an event bus.
    #[serde(rename = "Event-Driven")]
    EventDriven,
}

impl Architecture {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Hexagonal => "Hexagonal",
            Self::Clean => "Clean",
            Self::VerticalSlice => "Vertical Slice",
            Self::Mvc => "MVC",
            Self::EventDriven => "Event-Driven",
        }
    }
}

/// Primary implementation language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// TypeScript on Node.
    #[default]
    TypeScript,
    /// Go modules.
    Go,
    /// Cargo crates.
    Rust,
    /// Python packages.
    Python,
    /// JVM projects.
    Java,
    /// Ruby gems.
    Ruby,
}

impl Language {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::Go => "Go",
            Self::Rust => "Rust",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Ruby => "Ruby",
        }
    }
}

/// Whether generated manifests use range (`^1.0.0`) or exact (`1.0.0`) versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStrategy {
    /// Caret ranges.
    #[default]
    Semver,
    /// Exact versions.
    Pinned,
}

/// How artifacts are produced for Rust repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RustMode {
    /// Static template manifest.
    #[default]
    Template,
    /// Generator entrypoint, only honoured when power mode is on.
    ProjenExperimental,
}

/// Cadence for dependency update bots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    /// Every day.
    Daily,
    /// Once a week.
    #[default]
    Weekly,
    /// Once a month.
    Monthly,
}

impl UpdateFrequency {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Branch protection and security stance for the repository.
///
/// Deserialization is lenient: any unrecognised value falls back to
/// [`GovernancePosture::TeamStandard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum GovernancePosture {
    /// Minimal protection for solo work.
    Relaxed,
    /// Reviews and status checks on the default branch.
    #[default]
    #[serde(rename = "Team Standard")]
    TeamStandard,
    /// Everything required, including signed commits.
    Strict,
}

impl GovernancePosture {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relaxed => "Relaxed",
            Self::TeamStandard => "Team Standard",
            Self::Strict => "Strict",
        }
    }
}

impl From<String> for GovernancePosture {
    fn from(value: String) -> Self {
        match value.trim() {
            "Relaxed" => Self::Relaxed,
            "Strict" => Self::Strict,
            _ => Self::TeamStandard,
        }
    }
}

/// Tolerance for automated maintenance noise: a 0–100 level or an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoiseBudget {
    /// Explicit level; clamped to 0–100 when resolved.
    Level(f64),
    /// `low`, `medium` or `high`; anything else reads as `medium`.
    Alias(String),
}

impl NoiseBudget {
    /// The `low` alias.
    #[must_use]
    pub fn low() -> Self {
        Self::Alias("low".to_string())
    }

    /// The `medium` alias.
    #[must_use]
    pub fn medium() -> Self {
        Self::Alias("medium".to_string())
    }

    /// The `high` alias.
    #[must_use]
    pub fn high() -> Self {
        Self::Alias("high".to_string())
    }
}

impl Default for NoiseBudget {
    fn default() -> Self {
        Self::medium()
    }
}

/// Free-form project basics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Basics {
    /// Ship translation scaffolding.
    pub i18n: bool,
    /// One-line summary used in generated docs.
    pub description: String,
}

impl Default for Basics {
    fn default() -> Self {
        Self {
            i18n: false,
            description: "A new project bootstrapped with best practices.".to_string(),
        }
    }
}

/// Repository features toggled on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)] // one flag per hosting-platform toggle
pub struct RepoFeatures {
    /// Issue tracker.
    pub issues: bool,
    /// Project boards.
    pub projects: bool,
    /// Wiki pages.
    pub wiki: bool,
    /// Discussion forum.
    pub discussions: bool,
}

impl Default for RepoFeatures {
    fn default() -> Self {
        Self {
            issues: true,
            projects: false,
            wiki: false,
            discussions: false,
        }
    }
}

/// Pull-request merge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)] // one flag per hosting-platform toggle
pub struct PullRequestSettings {
    /// Allow merge commits.
    pub allow_merge_commit: bool,
    /// Allow squash merges.
    pub allow_squash_merge: bool,
    /// Allow rebase merges.
    pub allow_rebase_merge: bool,
    /// Delete head branches once merged.
    pub delete_branch_on_merge: bool,
}

impl Default for PullRequestSettings {
    fn default() -> Self {
        Self {
            allow_merge_commit: false,
            allow_squash_merge: true,
            allow_rebase_merge: false,
            delete_branch_on_merge: true,
        }
    }
}

/// Branch protection flags as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)] // one flag per protection rule
pub struct BranchProtection {
    /// Changes must land through a pull request.
    pub require_pr: bool,
    /// Approvals needed before merging.
    pub required_reviewers: u32,
    /// CI must pass before merging.
    pub require_status_checks: bool,
    /// No merge commits on the protected branch.
    pub require_linear_history: bool,
    /// Owners listed in `CODEOWNERS` must approve.
    pub require_code_owners: bool,
    /// Commits must be signed.
    pub require_signed_commits: bool,
}

impl Default for BranchProtection {
    fn default() -> Self {
        Self {
            require_pr: true,
            required_reviewers: 1,
            require_status_checks: true,
            require_linear_history: true,
            require_code_owners: false,
            require_signed_commits: false,
        }
    }
}

/// Default branch and its protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branches {
    /// Name of the default branch.
    pub default: String,
    /// Rules for the default branch.
    pub protection: BranchProtection,
}

impl Default for Branches {
    fn default() -> Self {
        Self {
            default: "main".to_string(),
            protection: BranchProtection::default(),
        }
    }
}

/// Actions/workflow permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionsSettings {
    /// `all`, `local` or `none`.
    pub permissions: String,
    /// Workflows may open pull requests.
    pub allow_pr: bool,
    /// `github` or `self-hosted`.
    pub runners: String,
}

impl Default for ActionsSettings {
    fn default() -> Self {
        Self {
            permissions: "local".to_string(),
            allow_pr: false,
            runners: "github".to_string(),
        }
    }
}

/// An outgoing repository webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    /// Client-side identifier; ignored when comparing plans.
    pub id: String,
    /// Delivery URL.
    pub url: String,
    /// `json` or `form`.
    pub content_type: String,
    /// Subscribed event names.
    pub events: Vec<String>,
    /// Whether deliveries are sent.
    pub active: bool,
}

impl Default for Webhook {
    fn default() -> Self {
        Self {
            id: String::new(),
            url: String::new(),
            content_type: "json".to_string(),
            events: Vec::new(),
            active: true,
        }
    }
}

/// Hosting-platform settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GithubSettings {
    /// Repository topics.
    pub topics: Vec<String>,
    /// Platform features.
    pub features: RepoFeatures,
    /// Merge settings.
    pub pr: PullRequestSettings,
    /// Default branch and protection.
    pub branches: Branches,
    /// Workflow permissions.
    pub actions: ActionsSettings,
    /// Enable Copilot for the repository.
    pub copilot: bool,
    /// Outgoing webhooks.
    pub webhooks: Vec<Webhook>,
    /// Deployment environment names.
    pub environments: Vec<String>,
    /// Names of secrets the repository expects to exist.
    pub secrets: Vec<String>,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            features: RepoFeatures::default(),
            pr: PullRequestSettings::default(),
            branches: Branches::default(),
            actions: ActionsSettings::default(),
            copilot: false,
            webhooks: Vec::new(),
            environments: vec!["production".to_string(), "staging".to_string()],
            secrets: vec!["NPM_TOKEN".to_string()],
        }
    }
}

/// Language, framework and toolchain choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stack {
    /// Primary language.
    pub language: Language,
    /// Runtime or toolchain version, free text.
    pub language_version: String,
    /// Empty when no framework is used.
    pub framework: String,
    /// `pnpm`, `npm`, `yarn`, `cargo`, ...
    pub package_manager: String,
    /// Version style for generated manifests.
    pub dependency_strategy: DependencyStrategy,
    /// Monorepo tool: `None`, `Nx`, `Turborepo`.
    pub build_tool: String,
    /// Compiler or bundler: `None`, `Vite`, `Cargo`, ...
    pub builder: String,
    /// Artifact mode for Rust repositories.
    pub rust_mode: RustMode,
}

impl Default for Stack {
    fn default() -> Self {
        Self {
            language: Language::TypeScript,
            language_version: "20.x".to_string(),
            framework: "Next.js".to_string(),
            package_manager: "pnpm".to_string(),
            dependency_strategy: DependencyStrategy::Semver,
            build_tool: "None".to_string(),
            builder: "None".to_string(),
            rust_mode: RustMode::Template,
        }
    }
}

/// Quality gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quality {
    /// `ESLint`, `Biome` or `None`.
    pub linter: String,
    /// `Prettier`, `Biome` or `None`.
    pub formatter: String,
    /// External analysis service, or `None`.
    pub quality_platform: String,
    /// Unit tests are set up.
    pub testing: bool,
    /// `Vitest`, `Jest`, ...
    pub test_framework: String,
    /// Integration tests are set up.
    pub integration_tests: bool,
    /// End-to-end tests are set up.
    pub e2e_tests: bool,
    /// `Playwright`, `Cypress` or `None`.
    pub e2e_framework: String,
    /// Coverage goal in percent.
    pub coverage_target: u32,
}

impl Default for Quality {
    fn default() -> Self {
        Self {
            linter: "ESLint".to_string(),
            formatter: "Prettier".to_string(),
            quality_platform: "None".to_string(),
            testing: true,
            test_framework: "Vitest".to_string(),
            integration_tests: false,
            e2e_tests: false,
            e2e_framework: "None".to_string(),
            coverage_target: 80,
        }
    }
}

/// CI jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)] // one flag per optional job
pub struct CiJobs {
    /// Run the test suite.
    pub run_tests: bool,
    /// Build and upload artifacts.
    pub build_artifacts: bool,
    /// Cut releases automatically.
    pub automatic_release: bool,
    /// Deploy after a green build.
    pub deploy_to_cloud: bool,
}

impl Default for CiJobs {
    fn default() -> Self {
        Self {
            run_tests: true,
            build_artifacts: true,
            automatic_release: false,
            deploy_to_cloud: false,
        }
    }
}

/// Security toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)] // one flag per scanner or bot
pub struct Security {
    /// Static code scanning.
    pub code_scanning: bool,
    /// Dependency update bot.
    pub dependency_updates: bool,
    /// Requested bot cadence.
    pub dependency_update_frequency: UpdateFrequency,
    /// Secret scanning.
    pub secret_scanning: bool,
    /// Ship an `.env.example` template.
    pub manage_env: bool,
}

impl Default for Security {
    fn default() -> Self {
        Self {
            code_scanning: true,
            dependency_updates: true,
            dependency_update_frequency: UpdateFrequency::Weekly,
            secret_scanning: true,
            manage_env: true,
        }
    }
}

/// Documentation choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(clippy::struct_excessive_bools)] // one flag per generated document
pub struct Docs {
    /// `README.md`.
    pub readme: bool,
    /// `CONTRIBUTING.md`.
    pub contributing: bool,
    /// Architecture decision records.
    pub adr: bool,
    /// `CODEOWNERS`.
    pub codeowners: bool,
    /// Issue templates.
    pub issue_templates: bool,
    /// Pull request template.
    pub pull_request_template: bool,
    /// `none`, `docusaurus`, `vitepress`, `mkdocs`.
    pub framework: String,
    /// Writing style guide, or `none`.
    pub style_guide: String,
    /// Publish the docs site to Pages.
    pub deploy_to_pages: bool,
}

impl Default for Docs {
    fn default() -> Self {
        Self {
            readme: true,
            contributing: true,
            adr: false,
            codeowners: false,
            issue_templates: false,
            pull_request_template: false,
            framework: "none".to_string(),
            style_guide: "none".to_string(),
            deploy_to_pages: false,
        }
    }
}

/// The complete user-editable description of the repository to bootstrap.
///
/// The compiler never mutates a `PlanConfig`; every stage derives new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanConfig {
    /// Repository name.
    pub project_name: String,
    /// Hosting visibility.
    pub visibility: Visibility,
    /// `MIT`, `Apache-2.0`, `GPL-3.0` or `None`.
    pub license: String,
    /// Description and i18n.
    pub basics: Basics,
    /// Monorepo or polyrepo.
    pub structure: RepoStructure,
    /// Kind of software; serialized as `type`.
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Source layout.
    pub architecture: Architecture,
    /// Hosting-platform settings.
    pub github: GithubSettings,
    /// Toolchain.
    pub stack: Stack,
    /// Quality gates.
    pub quality: Quality,
    /// CI jobs.
    pub ci: CiJobs,
    /// Scanners and bots.
    pub security: Security,
    /// Documentation.
    pub docs: Docs,
    /// Maintenance noise tolerance.
    pub noise_budget: NoiseBudget,
    /// Protection stance.
    pub governance_posture: GovernancePosture,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            project_name: "my-awesome-project".to_string(),
            visibility: Visibility::Public,
            license: "MIT".to_string(),
            basics: Basics::default(),
            structure: RepoStructure::Polyrepo,
            project_type: ProjectType::WebApp,
            architecture: Architecture::Standard,
            github: GithubSettings::default(),
            stack: Stack::default(),
            quality: Quality::default(),
            ci: CiJobs::default(),
            security: Security::default(),
            docs: Docs::default(),
            noise_budget: NoiseBudget::default(),
            governance_posture: GovernancePosture::TeamStandard,
        }
    }
}

impl PlanConfig {
    /// Load a configuration file, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), loader::load_config)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_wizard_defaults() {
        let config = PlanConfig::default();
        assert_eq!(config.project_name, "my-awesome-project");
        assert_eq!(config.stack.language, Language::TypeScript);
        assert_eq!(config.stack.framework, "Next.js");
        assert_eq!(config.quality.linter, "ESLint");
        assert_eq!(config.governance_posture, GovernancePosture::TeamStandard);
        assert_eq!(config.noise_budget, NoiseBudget::medium());
    }

    #[test]
    fn default_copies_are_independent() {
        let mut first = PlanConfig::default();
        let second = PlanConfig::default();
        first.project_name = "mutated-name".to_string();
        first.github.features.issues = false;
        assert_eq!(second.project_name, "my-awesome-project");
        assert!(second.github.features.issues);
    }

    #[test]
    fn unknown_posture_falls_back_to_team_standard() {
        let posture: GovernancePosture = serde_json::from_str("\"Paranoid\"").unwrap();
        assert_eq!(posture, GovernancePosture::TeamStandard);
        let posture: GovernancePosture = serde_json::from_str("\"Strict\"").unwrap();
        assert_eq!(posture, GovernancePosture::Strict);
    }

    #[test]
    fn posture_serializes_with_display_label() {
        let json = serde_json::to_string(&GovernancePosture::TeamStandard).unwrap();
        assert_eq!(json, "\"Team Standard\"");
    }

    #[test]
    fn noise_budget_accepts_number_or_alias() {
        let level: NoiseBudget = serde_json::from_str("85").unwrap();
        assert_eq!(level, NoiseBudget::Level(85.0));
        let alias: NoiseBudget = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(alias, NoiseBudget::low());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: PlanConfig =
            serde_json::from_str(r#"{"projectName":"api","stack":{"language":"Rust"}}"#)
                .unwrap();
        assert_eq!(config.project_name, "api");
        assert_eq!(config.stack.language, Language::Rust);
        assert_eq!(config.stack.package_manager, "pnpm");
        assert!(config.docs.readme);
    }

    #[test]
    fn load_without_path_returns_defaults() {
        let config = PlanConfig::load(None).unwrap();
        assert_eq!(config, PlanConfig::default());
    }
}
