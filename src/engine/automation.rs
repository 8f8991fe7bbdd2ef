//! Dependency-bot cadence and CI matrix breadth derived from the noise budget.
use serde::{Deserialize, Serialize};

use crate::config::{NoiseBudget, UpdateFrequency};

/// Noise level used when the budget is missing or unreadable.
pub const DEFAULT_NOISE_LEVEL: f64 = 50.0;

/// Upper edge of the minimal-automation band.
const QUIET_CEILING: f64 = 33.0;

/// Lower edge of the maximal-automation band.
const AGGRESSIVE_FLOOR: f64 = 67.0;

/// How dependency-update pull requests are batched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// One pull request for every ecosystem.
    Broad,
    /// One pull request per language ecosystem.
    Language,
    /// One pull request per dependency.
    None,
}

/// How many platform/runtime combinations CI exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixBreadth {
    /// A single runtime axis.
    Minimal,
    /// One runtime on one platform.
    Standard,
    /// Several runtimes across several platforms.
    Broad,
}

impl MatrixBreadth {
    /// Lower-case name used in output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Standard => "standard",
            Self::Broad => "broad",
        }
    }
}

/// Dependency-update bot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependabotProfile {
    /// How often updates are checked.
    pub schedule: UpdateFrequency,
    /// How update pull requests are batched.
    pub grouping: Grouping,
    /// Rough pull-request volume per month.
    pub estimated_monthly_prs: u32,
}

/// CI matrix settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiProfile {
    /// How wide the matrix is.
    pub matrix_breadth: MatrixBreadth,
    /// Matrix axes, in declaration order.
    pub dimensions: Vec<String>,
}

/// Automation settings compiled from a noise level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationProfile {
    /// Dependency-update cadence.
    pub dependabot: DependabotProfile,
    /// CI matrix.
    pub ci: CiProfile,
}

/// Map a noise budget onto `0..=100`.
///
/// Aliases: `low` is 20, `high` is 80, anything else is 50. Numbers are
/// clamped; non-finite numbers read as 50.
#[must_use]
pub fn resolve_noise_level(budget: &NoiseBudget) -> f64 {
    match budget {
        NoiseBudget::Level(level) if level.is_finite() => level.clamp(0.0, 100.0),
        NoiseBudget::Level(_) => DEFAULT_NOISE_LEVEL,
        NoiseBudget::Alias(alias) => match alias.trim() {
            "low" => 20.0,
            "high" => 80.0,
            _ => DEFAULT_NOISE_LEVEL,
        },
    }
}

fn dimensions(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// Automation profile for a resolved noise level.
#[must_use]
pub fn automation_for_noise(level: f64) -> AutomationProfile {
    if level <= QUIET_CEILING {
        return AutomationProfile {
            dependabot: DependabotProfile {
                schedule: UpdateFrequency::Monthly,
                grouping: Grouping::Broad,
                estimated_monthly_prs: 2,
            },
            ci: CiProfile {
                matrix_breadth: MatrixBreadth::Minimal,
                dimensions: dimensions(&["node-lts"]),
            },
        };
    }

    if level >= AGGRESSIVE_FLOOR {
        return AutomationProfile {
            dependabot: DependabotProfile {
                schedule: UpdateFrequency::Daily,
                grouping: Grouping::None,
                estimated_monthly_prs: 24,
            },
            ci: CiProfile {
                matrix_breadth: MatrixBreadth::Broad,
                dimensions: dimensions(&["node-lts", "node-current", "ubuntu", "windows"]),
            },
        };
    }

    AutomationProfile {
        dependabot: DependabotProfile {
            schedule: UpdateFrequency::Weekly,
            grouping: Grouping::Language,
            estimated_monthly_prs: 6,
        },
        ci: CiProfile {
            matrix_breadth: MatrixBreadth::Standard,
            dimensions: dimensions(&["node-lts", "ubuntu"]),
        },
    }
}

/// Automation profile for a configuration's noise budget.
#[must_use]
pub fn compile_automation(budget: &NoiseBudget) -> AutomationProfile {
    automation_for_noise(resolve_noise_level(budget))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_fixed_levels() {
        assert_eq!(resolve_noise_level(&NoiseBudget::low()), 20.0);
        assert_eq!(resolve_noise_level(&NoiseBudget::medium()), 50.0);
        assert_eq!(resolve_noise_level(&NoiseBudget::high()), 80.0);
        assert_eq!(
            resolve_noise_level(&NoiseBudget::Alias("deafening".to_string())),
            50.0
        );
    }

    #[test]
    fn numbers_are_clamped() {
        assert_eq!(resolve_noise_level(&NoiseBudget::Level(-5.0)), 0.0);
        assert_eq!(resolve_noise_level(&NoiseBudget::Level(250.0)), 100.0);
        assert_eq!(resolve_noise_level(&NoiseBudget::Level(f64::NAN)), 50.0);
        assert_eq!(resolve_noise_level(&NoiseBudget::Level(f64::INFINITY)), 50.0);
    }

    #[test]
    fn band_edges_are_closed() {
        assert_eq!(
            automation_for_noise(33.0).ci.matrix_breadth,
            MatrixBreadth::Minimal
        );
        assert_eq!(
            automation_for_noise(33.5).ci.matrix_breadth,
            MatrixBreadth::Standard
        );
        assert_eq!(
            automation_for_noise(67.0).ci.matrix_breadth,
            MatrixBreadth::Broad
        );
    }

    #[test]
    fn low_noise_is_monthly_minimal() {
        let profile = compile_automation(&NoiseBudget::low());
        assert_eq!(profile.dependabot.schedule, UpdateFrequency::Monthly);
        assert_eq!(profile.dependabot.grouping, Grouping::Broad);
        assert_eq!(profile.ci.dimensions, vec!["node-lts"]);
    }

    #[test]
    fn high_noise_is_daily_broad() {
        let profile = compile_automation(&NoiseBudget::Level(85.0));
        assert_eq!(profile.dependabot.schedule, UpdateFrequency::Daily);
        assert_eq!(profile.dependabot.estimated_monthly_prs, 24);
        assert_eq!(profile.ci.matrix_breadth, MatrixBreadth::Broad);
        assert_eq!(profile.ci.dimensions.len(), 4);
    }

    #[test]
    fn medium_noise_is_weekly_standard() {
        let profile = compile_automation(&NoiseBudget::default());
        assert_eq!(profile.dependabot.schedule, UpdateFrequency::Weekly);
        assert_eq!(profile.dependabot.grouping, Grouping::Language);
        assert_eq!(profile.ci.dimensions, vec!["node-lts", "ubuntu"]);
    }

    #[test]
    fn serializes_lowercase_vocabulary() {
        let json = serde_json::to_value(compile_automation(&NoiseBudget::low())).unwrap();
        assert_eq!(json["dependabot"]["schedule"], "monthly");
        assert_eq!(json["dependabot"]["estimatedMonthlyPrs"], 2);
        assert_eq!(json["ci"]["matrixBreadth"], "minimal");
    }
}
