//! Command: list preset bundles.
use anyhow::Result;
use serde::Serialize;

use super::print_json;
use crate::config::presets::{PresetBundle, bundles};

#[derive(Serialize)]
struct BundleSummary {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    packs: &'static [&'static str],
}

impl From<&PresetBundle> for BundleSummary {
    fn from(bundle: &PresetBundle) -> Self {
        Self {
            id: bundle.id,
            name: bundle.name,
            description: bundle.description,
            packs: bundle.packs,
        }
    }
}

/// Print every preset bundle with the packs it selects.
///
/// # Errors
///
/// Returns an error if the output cannot be serialized.
pub fn run() -> Result<()> {
    let summaries: Vec<BundleSummary> = bundles().iter().map(BundleSummary::from).collect();
    print_json(&summaries)
}
