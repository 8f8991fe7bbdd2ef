//! Content fingerprints for compiled outputs.
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(64);
    for b in &digest {
        // write! to a String is infallible; unwrap_or(()) makes that explicit.
        write!(hex, "{b:02x}").unwrap_or(());
    }
    hex
}

/// SHA-256 of the compact JSON serialization of `value`.
///
/// Every compiled structure serializes maps in sorted order, so equal values
/// always produce equal fingerprints.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized to JSON.
pub fn fingerprint<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(sha256_hex(&serde_json::to_vec(value)?))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::engine::repo_spec::compile_repo_spec;
    use crate::packs::{OwnerOverrides, PackCatalog};

    #[test]
    fn sha256_known_value() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_known_content() {
        // echo -n "hello world" | sha256sum
        assert_eq!(
            sha256_hex(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn recompiles_share_a_fingerprint() {
        let compile = || {
            compile_repo_spec(
                &PlanConfig::default(),
                &PackCatalog::builtin(),
                &OwnerOverrides::new(),
            )
        };
        let first = fingerprint(&compile()).unwrap();
        let second = fingerprint(&compile()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn different_values_differ() {
        let mut other = PlanConfig::default();
        other.project_name = "other".to_string();
        assert_ne!(
            fingerprint(&PlanConfig::default()).unwrap(),
            fingerprint(&other).unwrap()
        );
    }
}
