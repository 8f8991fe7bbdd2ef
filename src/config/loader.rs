//! Configuration file parsing (TOML, or JSON for `.json` paths).
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl Format {
    /// Pick the format from the file extension; anything but `.json` is TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Deserialize `content` in the given format.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if the content does not parse.
pub fn parse_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &str,
) -> Result<T, ConfigError> {
    let parsed = match format {
        Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ConfigError::InvalidSyntax {
        file: file.to_string(),
        message,
    })
}

/// Load and deserialize a configuration file.
///
/// Unlike optional fragments, an explicitly named file must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&content, Format::from_path(path), &path.display().to_string())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{GovernancePosture, NoiseBudget, PlanConfig};

    #[test]
    fn format_detection() {
        assert_eq!(Format::from_path(Path::new("plan.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("plan.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("plan.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("plan")), Format::Toml);
    }

    #[test]
    fn parses_partial_toml() {
        let config: PlanConfig = parse_str(
            "projectName = \"svc\"\nnoiseBudget = 85\ngovernancePosture = \"Strict\"\n\n[ci]\nautomaticRelease = true\n",
            Format::Toml,
            "plan.toml",
        )
        .unwrap();
        assert_eq!(config.project_name, "svc");
        assert_eq!(config.noise_budget, NoiseBudget::Level(85.0));
        assert_eq!(config.governance_posture, GovernancePosture::Strict);
        assert!(config.ci.automatic_release);
        assert!(config.ci.run_tests, "unspecified keys keep their defaults");
    }

    #[test]
    fn empty_toml_is_default_config() {
        let config: PlanConfig = parse_str("", Format::Toml, "plan.toml").unwrap();
        assert_eq!(config, PlanConfig::default());
    }

    #[test]
    fn invalid_toml_reports_file() {
        let err = parse_str::<PlanConfig>("projectName = ", Format::Toml, "broken.toml")
            .expect_err("should fail");
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config::<PlanConfig>(&dir.path().join("absent.toml"))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, r#"{"projectName":"from-json"}"#).unwrap();
        let config: PlanConfig = load_config(&path).unwrap();
        assert_eq!(config.project_name, "from-json");
    }
}
