//! Domain-specific error types for the repoplan engine.
//!
//! The compiler pipeline itself is total and never fails; errors only arise
//! at the edges: reading configuration, applying presets, parsing CLI input,
//! and running the playback worker. Command handlers convert these to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! RepoplanError
//! ├── Config(ConfigError)     - file I/O, parsing, presets, overrides
//! └── Playback(PlaybackError) - simulation playback worker
//! ```

use thiserror::Error;

/// Top-level error type for the repoplan engine.
#[derive(Error, Debug)]
pub enum RepoplanError {
    /// Configuration-related error (loading, presets, overrides).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Simulation playback error.
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

/// Errors that arise from configuration loading and preparation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file contains a syntax error or a value of the wrong shape.
    #[error("Invalid config syntax in {file}: {message}")]
    InvalidSyntax {
        /// File (or pseudo-file) being parsed.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A preset bundle id is not in the bundle catalog.
    #[error("Unknown preset bundle '{0}'")]
    UnknownPreset(String),

    /// A capability owner override is not of the form `capability=pack`.
    #[error("Invalid owner override '{0}': expected CAPABILITY=PACK")]
    InvalidOverride(String),

    /// A preset patch could not be merged into the configuration.
    #[error("Failed to apply preset patch: {0}")]
    Patch(String),
}

/// Errors that arise from the simulation playback worker.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The worker thread could not be started.
    #[error("failed to spawn playback worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The worker thread panicked before finishing.
    #[error("playback worker panicked")]
    WorkerPanicked,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_invalid_syntax_display() {
        let e = ConfigError::InvalidSyntax {
            file: "plan.toml".to_string(),
            message: "unexpected token".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid config syntax in plan.toml: unexpected token"
        );
    }

    #[test]
    fn config_error_io_display() {
        let e = ConfigError::Io {
            path: "/conf/plan.toml".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/conf/plan.toml"));
        assert!(e.to_string().contains("IO error reading config file"));
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: "/conf/plan.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
    }

    #[test]
    fn config_error_unknown_preset_display() {
        let e = ConfigError::UnknownPreset("bundle.nope".to_string());
        assert_eq!(e.to_string(), "Unknown preset bundle 'bundle.nope'");
    }

    #[test]
    fn config_error_invalid_override_display() {
        let e = ConfigError::InvalidOverride("release".to_string());
        assert_eq!(
            e.to_string(),
            "Invalid owner override 'release': expected CAPABILITY=PACK"
        );
    }

    // -----------------------------------------------------------------------
    // RepoplanError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn repoplan_error_from_config_error() {
        let e: RepoplanError = ConfigError::UnknownPreset("bad".to_string()).into();
        assert!(e.to_string().contains("Configuration error"));
        assert!(e.to_string().contains("bad"));
    }

    #[test]
    fn repoplan_error_from_playback_error() {
        let e: RepoplanError = PlaybackError::WorkerPanicked.into();
        assert_eq!(e.to_string(), "Playback error: playback worker panicked");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<RepoplanError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<PlaybackError>();
    }

    #[test]
    fn config_error_converts_to_anyhow() {
        let e = ConfigError::InvalidOverride("x".to_string());
        let _anyhow_err: anyhow::Error = e.into();
    }
}
