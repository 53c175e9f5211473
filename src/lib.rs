#![forbid(unsafe_code)]

//! stevedore: show what a container build context would contain
//!
//! Every entry under a root directory is classified as included in, or
//! excluded from, the build context according to an ignore file such as
//! `.dockerignore`. Settings merge command-line flags, a local and a global
//! JSON configuration file, and built-in defaults.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, RuleError, StevedoreError};

// Re-export core domain types for convenient access
pub use types::{Bucket, IgnoreSource, SourceKind};
