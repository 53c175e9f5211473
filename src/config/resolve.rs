//! Merge settings sources into the effective [`Settings`]
//!
//! Precedence per field, highest first: an explicit command-line flag, the
//! local `.stevedore.json`, the global `config.json`, then the compiled-in
//! default. A lower source only fills fields no higher source set.

use crate::config::settings::{Settings, normalize_buckets};
use crate::config::sources::{RawSettings, SettingsSources};
use crate::types::{IgnoreSource, SourceKind};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Name of the ignore file used when no source names one
pub const DEFAULT_IGNORE_FILE: &str = ".dockerignore";

/// Environment signals that influence color output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorEnv {
    /// `NO_COLOR` is set to a non-empty value
    pub no_color: bool,
    /// `CLICOLOR_FORCE` is set and not `0`
    pub force: bool,
    /// `CLICOLOR=0`
    pub clicolor_off: bool,
    /// `TERM=dumb`
    pub dumb_term: bool,
    /// Stdout is attached to a terminal
    pub is_terminal: bool,
}

impl ColorEnv {
    /// Read the color signals from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(
            |name| std::env::var(name).ok(),
            std::io::stdout().is_terminal(),
        )
    }

    /// Build from a variable lookup, for callers that do not own the environment
    pub fn from_vars(var: impl Fn(&str) -> Option<String>, is_terminal: bool) -> Self {
        let set = |name: &str| var(name).filter(|v| !v.is_empty());
        Self {
            no_color: set("NO_COLOR").is_some(),
            force: set("CLICOLOR_FORCE").is_some_and(|v| v != "0"),
            clicolor_off: set("CLICOLOR").is_some_and(|v| v == "0"),
            dumb_term: set("TERM").is_some_and(|v| v == "dumb"),
            is_terminal,
        }
    }

    /// Whether color may be enabled without an explicit request
    pub fn allows_auto(&self) -> bool {
        if self.no_color {
            return false;
        }
        self.force || (self.is_terminal && !self.clicolor_off && !self.dumb_term)
    }
}

/// First source that sets the field, with its provenance
fn pick<T>(
    sources: &SettingsSources,
    field: impl Fn(&RawSettings) -> Option<T>,
) -> Option<(T, SourceKind)> {
    sources
        .layers()
        .find_map(|(kind, raw)| field(raw).map(|value| (value, kind)))
}

/// Resolve a boolean field through the chain, falling back to the defaults
fn pick_bool(
    sources: &SettingsSources,
    defaults: &RawSettings,
    name: &str,
    field: impl Fn(&RawSettings) -> Option<bool>,
) -> bool {
    let (value, origin) = pick(sources, &field)
        .or_else(|| field(defaults).map(|value| (value, SourceKind::Default)))
        .unwrap_or((false, SourceKind::Default));
    log::debug!("{}: {} ({})", name, value, origin);
    value
}

/// Resolve the color toggle
///
/// `NO_COLOR` always wins. Between flags, `--nocolor` beats `--color`. An
/// explicit `--color` overrides configuration and terminal detection;
/// otherwise the chain must request color and the environment must allow it.
fn resolve_color(sources: &SettingsSources, defaults: &RawSettings, env: &ColorEnv) -> bool {
    if env.no_color {
        log::debug!("color: false (NO_COLOR)");
        return false;
    }
    if sources.flags.nocolor == Some(true) {
        log::debug!("color: false (--nocolor)");
        return false;
    }
    if sources.flags.color == Some(true) {
        log::debug!("color: true (--color)");
        return true;
    }
    if pick_bool(sources, defaults, "nocolor", |raw| raw.nocolor) {
        return false;
    }
    pick_bool(sources, defaults, "color", |raw| raw.color) && env.allows_auto()
}

/// Resolve full-path mode: the highest source touching either field decides
fn resolve_full_path(sources: &SettingsSources, defaults: &RawSettings) -> bool {
    let (value, origin) = pick(sources, RawSettings::path_mode)
        .or_else(|| defaults.path_mode().map(|value| (value, SourceKind::Default)))
        .unwrap_or((true, SourceKind::Default));
    log::debug!("fullpath: {} ({})", value, origin);
    value
}

/// Resolve where the target rules come from
///
/// Stream mode is a flag-only request; configuration can only name a file.
fn resolve_source(sources: &SettingsSources, root: &Path, stdin: bool) -> IgnoreSource {
    if stdin {
        log::debug!("ignore rules: STDIN");
        return IgnoreSource::Stdin;
    }
    match pick(sources, |raw| raw.ignorefile.clone()) {
        Some((path, origin)) => {
            log::debug!("ignorefile: {} ({})", path.display(), origin);
            IgnoreSource::File(path)
        }
        None => {
            let path = root.join(DEFAULT_IGNORE_FILE);
            log::debug!("ignorefile: {} ({})", path.display(), SourceKind::Default);
            IgnoreSource::File(path)
        }
    }
}

/// Merge the sources with the compiled-in defaults
pub fn resolve(sources: &SettingsSources, root: PathBuf, stdin: bool, env: &ColorEnv) -> Settings {
    resolve_with_defaults(sources, &RawSettings::defaults(), root, stdin, env)
}

/// Merge the sources with an explicit default snapshot
pub fn resolve_with_defaults(
    sources: &SettingsSources,
    defaults: &RawSettings,
    root: PathBuf,
    stdin: bool,
    env: &ColorEnv,
) -> Settings {
    log::debug!("path: {}", root.display());

    let source = resolve_source(sources, &root, stdin);
    let verbose = pick_bool(sources, defaults, "verbose", |raw| raw.verbose);
    let debug = pick_bool(sources, defaults, "debug", |raw| raw.debug);
    let color = resolve_color(sources, defaults, env);
    let invert_colors = pick_bool(sources, defaults, "invertcolors", |raw| raw.invertcolors);
    let full_path = resolve_full_path(sources, defaults);

    let (excluded, included) = normalize_buckets(
        pick_bool(sources, defaults, "excluded", |raw| raw.excluded),
        pick_bool(sources, defaults, "included", |raw| raw.included),
    );

    Settings {
        root,
        source,
        verbose,
        debug,
        // Inverting is meaningless without color
        invert_colors: color && invert_colors,
        color,
        full_path,
        excluded,
        included,
    }
}
