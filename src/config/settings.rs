//! The effective settings for one run

use crate::types::{Bucket, IgnoreSource};
use log::LevelFilter;
use std::path::PathBuf;

/// Fully resolved settings
///
/// Built once by [`crate::config::resolve`] and read-only afterwards.
/// `excluded` and `included` are never both false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub source: IgnoreSource,
    pub verbose: bool,
    pub debug: bool,
    pub color: bool,
    pub invert_colors: bool,
    pub full_path: bool,
    pub excluded: bool,
    pub included: bool,
}

impl Settings {
    /// Whether entries in `bucket` are printed
    pub fn emits(&self, bucket: Bucket) -> bool {
        match bucket {
            Bucket::Excluded => self.excluded,
            Bucket::Included => self.included,
        }
    }

    /// Log level implied by the debug and verbose toggles
    pub fn log_level(&self) -> LevelFilter {
        log_level_for(self.debug, self.verbose)
    }
}

/// Debug shows everything, verbose adds the traversal notices
pub fn log_level_for(debug: bool, verbose: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Normalize the bucket selection so at least one bucket is printed
///
/// Exactly one requested bucket prints only that bucket; neither or both
/// prints both.
pub fn normalize_buckets(excluded: bool, included: bool) -> (bool, bool) {
    if excluded == included {
        (true, true)
    } else {
        (excluded, included)
    }
}
