//! Settings sources: command-line flags and the JSON configuration files
//!
//! Every source is a partial snapshot. A field that the source does not
//! mention stays `None`, which is distinct from an explicit `false`.

use crate::error::ConfigError;
use crate::types::SourceKind;
use serde::Deserialize;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const LOCAL_CONFIG_FILE: &str = ".stevedore.json";

/// Name of the file listing paths stevedore itself never traverses
pub const OWN_IGNORE_FILE: &str = ".stevedoreignore";

/// Partial settings from a single source
///
/// Keys mirror the settings names; the capitalized spelling is accepted
/// as well so older configuration files keep working. Unknown keys, such
/// as `stdin`, are ignored: stream mode can only be requested by a flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSettings {
    #[serde(alias = "Verbose")]
    pub verbose: Option<bool>,

    #[serde(alias = "Debug")]
    pub debug: Option<bool>,

    #[serde(alias = "Color")]
    pub color: Option<bool>,

    #[serde(alias = "Nocolor")]
    pub nocolor: Option<bool>,

    #[serde(alias = "Ignorefile")]
    pub ignorefile: Option<PathBuf>,

    #[serde(alias = "Excluded")]
    pub excluded: Option<bool>,

    #[serde(alias = "Included")]
    pub included: Option<bool>,

    #[serde(alias = "Invertcolors")]
    pub invertcolors: Option<bool>,

    #[serde(alias = "Fullpath")]
    pub fullpath: Option<bool>,

    #[serde(alias = "Nofullpath")]
    pub nofullpath: Option<bool>,
}

impl RawSettings {
    /// Compiled-in defaults: color and full paths on, everything else off
    pub fn defaults() -> Self {
        Self {
            verbose: Some(false),
            debug: Some(false),
            color: Some(true),
            nocolor: Some(false),
            ignorefile: None,
            excluded: Some(false),
            included: Some(false),
            invertcolors: Some(false),
            fullpath: Some(true),
            nofullpath: Some(false),
        }
    }

    /// Parse a settings object from JSON text
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// The full-path decision this source makes, if it touches either field
    ///
    /// `nofullpath = true` wins over `fullpath` within one source.
    pub fn path_mode(&self) -> Option<bool> {
        if self.nofullpath == Some(true) {
            return Some(false);
        }
        self.fullpath.or(self.nofullpath.map(|off| !off))
    }
}

/// Load a JSON configuration file
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns `ConfigError::Read` if the file exists but cannot be read, and
/// `ConfigError::Parse` if it is not a valid settings object.
pub fn load_config_file(path: &Path) -> Result<Option<RawSettings>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    RawSettings::from_json(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Load one configuration layer, never failing
///
/// Missing files are logged at debug level; unreadable or malformed files
/// are reported as warnings and skipped.
pub fn read_layer(kind: SourceKind, path: &Path) -> Option<RawSettings> {
    match load_config_file(path) {
        Ok(Some(raw)) => {
            log::debug!("{} file found at {}", kind, path.display());
            Some(raw)
        }
        Ok(None) => {
            log::debug!("no {} file found at {}", kind, path.display());
            None
        }
        Err(e) => {
            log::warn!("{}, ignoring", e);
            None
        }
    }
}

/// Location of the global configuration file
///
/// Prefers `$XDG_CONFIG_HOME/stevedore/config.json`, falling back to
/// `<home>/.config/stevedore/config.json`.
pub fn global_config_path(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    let base = match xdg_config_home {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home?.join(".config"),
    };
    Some(base.join("stevedore").join("config.json"))
}

/// Where stevedore looks for its own files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub local_config: PathBuf,
    pub global_config: Option<PathBuf>,
    pub own_ignore: PathBuf,
}

impl Locations {
    /// Locations relative to the working directory and the user's config dir
    pub fn from_env() -> Self {
        Self {
            local_config: PathBuf::from(LOCAL_CONFIG_FILE),
            global_config: global_config_path(
                std::env::var_os("XDG_CONFIG_HOME"),
                dirs::home_dir(),
            ),
            own_ignore: PathBuf::from(OWN_IGNORE_FILE),
        }
    }

    /// Locations rooted at an explicit directory, without a global config
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            local_config: dir.join(LOCAL_CONFIG_FILE),
            global_config: None,
            own_ignore: dir.join(OWN_IGNORE_FILE),
        }
    }
}

/// The three partial sources, highest precedence first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSources {
    pub flags: RawSettings,
    pub local: Option<RawSettings>,
    pub global: Option<RawSettings>,
}

impl SettingsSources {
    /// Read both configuration files alongside the parsed flags
    pub fn load(flags: RawSettings, locations: &Locations) -> Self {
        let local = read_layer(SourceKind::LocalConfig, &locations.local_config);
        let global = locations
            .global_config
            .as_deref()
            .and_then(|path| read_layer(SourceKind::GlobalConfig, path));

        Self {
            flags,
            local,
            global,
        }
    }

    /// Iterate over the present sources in precedence order
    pub fn layers(&self) -> impl Iterator<Item = (SourceKind, &RawSettings)> {
        std::iter::once((SourceKind::Flags, &self.flags))
            .chain(self.local.iter().map(|raw| (SourceKind::LocalConfig, raw)))
            .chain(self.global.iter().map(|raw| (SourceKind::GlobalConfig, raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_lowercase_keys() {
        let raw = RawSettings::from_json(r#"{"verbose": true, "ignorefile": "ctx/.dockerignore"}"#)
            .unwrap();
        assert_eq!(raw.verbose, Some(true));
        assert_eq!(raw.ignorefile, Some(PathBuf::from("ctx/.dockerignore")));
        assert_eq!(raw.color, None);
    }

    #[test]
    fn test_parse_capitalized_keys() {
        let raw = RawSettings::from_json(r#"{"Excluded": true, "Nocolor": false}"#).unwrap();
        assert_eq!(raw.excluded, Some(true));
        assert_eq!(raw.nocolor, Some(false));
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let raw = RawSettings::from_json(r#"{"stdin": true, "theme": "dark"}"#).unwrap();
        assert_eq!(raw, RawSettings::default());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(RawSettings::from_json(r#"{"verbose": "yes"}"#).is_err());
        assert!(RawSettings::from_json("[true]").is_err());
    }

    #[test]
    fn test_null_values_are_unset() {
        let raw = RawSettings::from_json(r#"{"color": null}"#).unwrap();
        assert_eq!(raw.color, None);
    }

    #[test]
    fn test_path_mode() {
        let mut raw = RawSettings::default();
        assert_eq!(raw.path_mode(), None);

        raw.fullpath = Some(false);
        assert_eq!(raw.path_mode(), Some(false));

        raw.fullpath = Some(true);
        raw.nofullpath = Some(true);
        assert_eq!(raw.path_mode(), Some(false));

        raw.fullpath = None;
        raw.nofullpath = Some(false);
        assert_eq!(raw.path_mode(), Some(true));

        assert_eq!(RawSettings::defaults().path_mode(), Some(true));
    }

    #[test]
    fn test_load_config_file_missing() {
        let dir = TempDir::new().unwrap();
        let result = load_config_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_load_config_file_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        match load_config_file(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected parse error, got {:?}", other),
        }
        assert_eq!(read_layer(SourceKind::LocalConfig, &path), None);
    }

    #[test]
    fn test_load_config_file_directory_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = load_config_file(dir.path());
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_global_config_path_prefers_xdg() {
        let path = global_config_path(
            Some(OsString::from("/xdg")),
            Some(PathBuf::from("/home/user")),
        );
        assert_eq!(path, Some(PathBuf::from("/xdg/stevedore/config.json")));
    }

    #[test]
    fn test_global_config_path_falls_back_to_home() {
        let path = global_config_path(Some(OsString::new()), Some(PathBuf::from("/home/user")));
        assert_eq!(
            path,
            Some(PathBuf::from("/home/user/.config/stevedore/config.json"))
        );
        assert_eq!(global_config_path(None, None), None);
    }

    #[test]
    fn test_sources_load_and_layers() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILE), r#"{"verbose": true}"#).unwrap();
        let global = dir.path().join("global.json");
        fs::write(&global, r#"{"debug": true}"#).unwrap();

        let mut locations = Locations::in_dir(dir.path());
        locations.global_config = Some(global);

        let sources = SettingsSources::load(RawSettings::default(), &locations);
        assert_eq!(sources.local.as_ref().and_then(|r| r.verbose), Some(true));
        assert_eq!(sources.global.as_ref().and_then(|r| r.debug), Some(true));

        let kinds: Vec<_> = sources.layers().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                SourceKind::Flags,
                SourceKind::LocalConfig,
                SourceKind::GlobalConfig
            ]
        );
    }

    #[test]
    fn test_sources_skip_missing_layers() {
        let dir = TempDir::new().unwrap();
        let sources = SettingsSources::load(RawSettings::default(), &Locations::in_dir(dir.path()));
        assert_eq!(sources.layers().count(), 1);
    }
}
