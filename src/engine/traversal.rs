//! Directory traversal and classification
//!
//! The walk is a single pre-order pass over the root built on the `ignore`
//! crate's walker with every standard filter disabled: hidden files and
//! `.gitignore` rules have no bearing on a build context. The own rule set
//! is applied as an entry filter, so a matched directory's children are
//! never enqueued. Every surviving entry is then tested against the target
//! rule set.

use crate::config::Settings;
use crate::engine::rules::RuleSet;
use crate::output::Formatter;
use crate::types::Bucket;
use ignore::{DirEntry, WalkBuilder};
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while walking
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("{0}")]
    Walk(#[from] ignore::Error),
}

/// One visited filesystem entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    /// Path as produced by the walk, root included
    pub path: PathBuf,
    /// Path relative to the traversal root; empty for the root itself
    pub relative: PathBuf,
    pub is_dir: bool,
    pub depth: usize,
}

impl TraversalEntry {
    fn from_dir_entry(entry: &DirEntry, root: &Path) -> Self {
        let path = entry.path().to_path_buf();
        Self {
            relative: relative_to(&path, root),
            is_dir: entry.file_type().is_some_and(|ft| ft.is_dir()),
            depth: entry.depth(),
            path,
        }
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Final path component, falling back to the whole path for `.` or `/`
    pub fn name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }

    /// How the entry is printed
    ///
    /// Full-path mode prints the walked path without a leading `./`;
    /// otherwise only the final component.
    pub fn display(&self, full_path: bool) -> Cow<'_, str> {
        if !full_path {
            return self.name();
        }
        match self.path.strip_prefix(".") {
            Ok(stripped) if !stripped.as_os_str().is_empty() => stripped.to_string_lossy(),
            _ => self.path.to_string_lossy(),
        }
    }
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

fn without_cur_dir(path: &Path) -> &Path {
    path.strip_prefix(".").unwrap_or(path)
}

/// `path` relative to `anchor`, resolving against `cwd` when only one of
/// them is absolute
fn relative_to_anchor(path: &Path, anchor: &Path, cwd: Option<&Path>) -> Option<PathBuf> {
    let path = without_cur_dir(path);
    let anchor = without_cur_dir(anchor);
    if path.is_absolute() == anchor.is_absolute() {
        return path.strip_prefix(anchor).ok().map(Path::to_path_buf);
    }

    let cwd = cwd?;
    let absolute = |p: &Path| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            cwd.join(p)
        }
    };
    absolute(path)
        .strip_prefix(absolute(anchor))
        .ok()
        .map(Path::to_path_buf)
}

/// Path the own rule set is tested against
///
/// Anchored rules see the walked path relative to their anchor directory.
/// Entries outside the anchor, and unanchored rules, fall back to the path
/// relative to the traversal root.
fn own_relative(path: &Path, root: &Path, own: &RuleSet, cwd: Option<&Path>) -> PathBuf {
    own.anchor()
        .and_then(|anchor| relative_to_anchor(path, anchor, cwd))
        .unwrap_or_else(|| relative_to(path, root))
}

/// Lazy pre-order walk that prunes entries matched by the own rule set
pub struct Traversal {
    walk: ignore::Walk,
    root: PathBuf,
}

impl Traversal {
    /// Build a traversal of `root`
    ///
    /// Entries matched by `own` are skipped; matched directories are not
    /// descended into. The root is never tested against `own`. An anchored
    /// `own` set is matched against the walked path relative to its anchor.
    pub fn new(root: &Path, own: Arc<RuleSet>) -> Self {
        let filter_root = root.to_path_buf();
        let cwd = std::env::current_dir().ok();
        let walk = WalkBuilder::new(root)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                let relative = own_relative(entry.path(), &filter_root, &own, cwd.as_deref());
                if !own.matches(&relative, is_dir) {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                if is_dir {
                    log::info!("{} has been ignored by stevedore, no traversal", name);
                } else {
                    log::info!("{} has been ignored by stevedore", name);
                }
                false
            })
            .build();

        Self {
            walk,
            root: root.to_path_buf(),
        }
    }
}

impl Iterator for Traversal {
    type Item = Result<TraversalEntry, TraversalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.walk.next()?;
        Some(
            result
                .map(|entry| TraversalEntry::from_dir_entry(&entry, &self.root))
                .map_err(TraversalError::from),
        )
    }
}

/// Counts gathered during one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub included: usize,
    pub excluded: usize,
    pub emitted: usize,
    pub errors: usize,
}

impl ScanSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Applies both rule sets to a walk of the settings' root
pub struct Classifier<'a> {
    settings: &'a Settings,
    target: RuleSet,
    own: Arc<RuleSet>,
}

impl<'a> Classifier<'a> {
    pub fn new(settings: &'a Settings, target: RuleSet, own: RuleSet) -> Self {
        Self {
            settings,
            target,
            own: Arc::new(own),
        }
    }

    /// Bucket for one entry under the target rules
    pub fn classify(&self, entry: &TraversalEntry) -> Bucket {
        if self.target.matches(&entry.relative, entry.is_dir) {
            Bucket::Excluded
        } else {
            Bucket::Included
        }
    }

    /// Walk the root, yielding every classified non-root entry
    pub fn entries(
        &self,
    ) -> impl Iterator<Item = Result<(TraversalEntry, Bucket), TraversalError>> + '_ {
        let full_path = self.settings.full_path;
        Traversal::new(&self.settings.root, Arc::clone(&self.own)).filter_map(move |result| {
            match result {
                Ok(entry) if entry.is_root() => {
                    log::info!(
                        "{} is ignored, but traversed by stevedore by default",
                        entry.display(full_path)
                    );
                    None
                }
                Ok(entry) => {
                    let bucket = self.classify(&entry);
                    Some(Ok((entry, bucket)))
                }
                Err(e) => Some(Err(e)),
            }
        })
    }

    /// Walk, classify and print every entry in an enabled bucket
    ///
    /// Walk errors are reported on stderr and counted; the walk continues
    /// with the next entry.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub fn run<W: Write>(&self, out: &mut W, formatter: &Formatter) -> io::Result<ScanSummary> {
        let mut summary = ScanSummary::default();

        for result in self.entries() {
            let (entry, bucket) = match result {
                Ok(classified) => classified,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    summary.errors += 1;
                    continue;
                }
            };

            match bucket {
                Bucket::Excluded => summary.excluded += 1,
                Bucket::Included => summary.included += 1,
            }

            if self.settings.emits(bucket) {
                let display = entry.display(self.settings.full_path);
                writeln!(out, "{}", formatter.render(bucket, &display))?;
                summary.emitted += 1;
            }

            log::debug!("visited file or dir: {:?}", entry.path);
        }

        Ok(summary)
    }
}
