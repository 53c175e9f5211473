//! Ignore rule compilation and matching
//!
//! Every pattern line is compiled on its own with the `ignore` crate's
//! gitignore matcher. A path is tested against all patterns in order and
//! the last one that matches the path, or any directory above it, decides.
//! A negated directory therefore re-includes everything beneath it.

use crate::error::RuleError;
use crate::types::IgnoreSource;
use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// An immutable, compiled set of ignore patterns
#[derive(Debug, Clone)]
pub struct RuleSet {
    patterns: Vec<Gitignore>,
    origin: String,
    anchor: Option<PathBuf>,
}

impl RuleSet {
    /// A rule set that matches nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            origin: "<empty>".to_string(),
            anchor: None,
        }
    }

    /// Compile newline-separated pattern lines
    ///
    /// Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RuleError::Pattern` for a line the matcher rejects.
    pub fn from_lines(origin: impl Into<String>, content: &str) -> Result<Self, RuleError> {
        let origin = origin.into();
        let mut patterns = Vec::new();

        for line in content.lines() {
            let mut builder = GitignoreBuilder::new(".");
            builder
                .add_line(None, line)
                .map_err(|e| RuleError::Pattern {
                    origin: origin.clone(),
                    pattern: line.to_string(),
                    source: e,
                })?;

            let pattern = builder.build().map_err(|e| RuleError::Build {
                origin: origin.clone(),
                source: e,
            })?;
            if !pattern.is_empty() {
                patterns.push(pattern);
            }
        }

        Ok(Self {
            patterns,
            origin,
            anchor: None,
        })
    }

    /// Read a whole ignore file, then compile it
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn from_file(path: &Path) -> Result<Self, RuleError> {
        let bytes = fs::read(path).map_err(|e| RuleError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_lines(path.display().to_string(), &String::from_utf8_lossy(&bytes))
    }

    /// Read a stream to its end, then compile it
    pub fn from_reader(mut reader: impl Read) -> Result<Self, RuleError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(RuleError::Stdin)?;
        let content = String::from_utf8_lossy(&bytes);
        log::debug!("ignore lines from STDIN:\n{}", content);
        Self::from_lines("STDIN", &content)
    }

    /// Match walked paths relative to `dir` instead of the traversal root
    pub fn anchored_at(mut self, dir: impl Into<PathBuf>) -> Self {
        self.anchor = Some(dir.into());
        self
    }

    /// Directory the patterns are relative to, if not the traversal root
    pub fn anchor(&self) -> Option<&Path> {
        self.anchor.as_deref()
    }

    /// Where the patterns came from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of compiled patterns, negations included
    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Test a relative path
    ///
    /// Directories are matched as directories, so `name/` patterns apply
    /// whether or not the path carries a trailing separator. A pattern
    /// matching any parent directory counts as matching the path, and the
    /// last matching pattern wins. The empty path (the root) never matches.
    pub fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        if relative.as_os_str().is_empty() || relative.has_root() {
            return false;
        }

        let mut excluded = false;
        for pattern in &self.patterns {
            match pattern.matched_path_or_any_parents(relative, is_dir) {
                Match::Ignore(_) => excluded = true,
                Match::Whitelist(_) => excluded = false,
                Match::None => {}
            }
        }
        excluded
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// Compile the rules that drive classification
///
/// # Errors
///
/// Any failure is fatal for the run: a missing or unreadable ignore file,
/// an unreadable stream, or a pattern the matcher rejects.
pub fn compile_target(source: &IgnoreSource, stdin: impl Read) -> Result<RuleSet, RuleError> {
    let rules = match source {
        IgnoreSource::Stdin => RuleSet::from_reader(stdin)?,
        IgnoreSource::File(path) => RuleSet::from_file(path)?,
    };
    log::debug!(
        "compiled {} target patterns from {}",
        rules.num_patterns(),
        rules.origin()
    );
    Ok(rules)
}

/// Compile stevedore's own exclusion file, best effort
///
/// The patterns are anchored at the file's directory. An absent,
/// unreadable or invalid file yields an empty rule set.
pub fn compile_own(path: &Path) -> RuleSet {
    let anchor = path.parent().unwrap_or(Path::new("")).to_path_buf();
    match RuleSet::from_file(path) {
        Ok(rules) => {
            log::debug!(
                "stevedore ignorefile found at {} ({} patterns)",
                path.display(),
                rules.num_patterns()
            );
            rules.anchored_at(anchor)
        }
        Err(RuleError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            log::debug!("no stevedore ignorefile found at {}", path.display());
            RuleSet::empty()
        }
        Err(e) => {
            log::warn!("{}, ignoring", e);
            RuleSet::empty()
        }
    }
}
