//! Error types for stevedore
//!
//! Config errors are always recoverable: the offending source is dropped
//! and resolution continues. Rule errors are fatal for the target ignore
//! source and degrade to an empty rule set for the own ignore file.

use std::path::PathBuf;

/// Errors raised while reading a settings source
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("unable to read {path} file: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not a valid settings object
    #[error("error unmarshalling JSON configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors raised while compiling an ignore rule set
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The ignore file is missing or unreadable
    #[error("unable to read {path} file: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Standard input could not be read
    #[error("unable to read ignore rules from STDIN: {0}")]
    Stdin(std::io::Error),

    /// The matcher rejected a pattern line
    #[error("invalid pattern '{pattern}' in {origin}: {source}")]
    Pattern {
        origin: String,
        pattern: String,
        source: ignore::Error,
    },

    /// The matcher failed to build the compiled set
    #[error("unable to compile rules from {origin}: {source}")]
    Build {
        origin: String,
        source: ignore::Error,
    },
}

/// Top-level error type for a scan
#[derive(Debug, thiserror::Error)]
pub enum StevedoreError {
    /// Rule compilation error
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
