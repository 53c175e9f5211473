#![forbid(unsafe_code)]

//! Core domain types for stevedore

use std::fmt;
use std::path::PathBuf;

/// Outcome of testing an entry against the target rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Matched by the target rules, kept out of the build context
    Excluded,
    /// Not matched, sent to the build context
    Included,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Excluded => "excluded",
            Bucket::Included => "included",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the target ignore rules come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreSource {
    /// Read every line of standard input before compiling
    Stdin,
    /// Read the named ignore file
    File(PathBuf),
}

impl fmt::Display for IgnoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreSource::Stdin => f.write_str("STDIN"),
            IgnoreSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Provenance of a settings value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Flags,
    LocalConfig,
    GlobalConfig,
    Default,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Flags => "command line",
            SourceKind::LocalConfig => "local configuration",
            SourceKind::GlobalConfig => "global configuration",
            SourceKind::Default => "default",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
