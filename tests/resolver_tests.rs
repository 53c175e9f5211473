//! Precedence tests for settings resolution
//!
//! Each settings field is checked against every combination of
//! unset / explicit false / explicit true across the three sources.

use stevedore::config::{ColorEnv, RawSettings, Settings, SettingsSources, resolve};
use stevedore::output::Formatter;
use stevedore::{Bucket, IgnoreSource};
use std::path::PathBuf;

const TRI: [Option<bool>; 3] = [None, Some(false), Some(true)];

/// A boolean field as seen from the sources and from the resolved settings
struct Field {
    name: &'static str,
    set: fn(&mut RawSettings, Option<bool>),
    get: fn(&Settings) -> bool,
    default: bool,
}

fn terminal() -> ColorEnv {
    ColorEnv {
        is_terminal: true,
        ..ColorEnv::default()
    }
}

fn layer(field: &Field, value: Option<bool>) -> RawSettings {
    let mut raw = RawSettings::default();
    (field.set)(&mut raw, value);
    raw
}

fn assert_precedence(field: &Field, base_flags: &RawSettings) {
    for flag in TRI {
        for local in TRI {
            for global in TRI {
                let mut flags = base_flags.clone();
                (field.set)(&mut flags, flag);
                let sources = SettingsSources {
                    flags,
                    local: Some(layer(field, local)),
                    global: Some(layer(field, global)),
                };

                let settings = resolve(&sources, PathBuf::from("."), false, &terminal());
                let expected = flag.or(local).or(global).unwrap_or(field.default);

                assert_eq!(
                    (field.get)(&settings),
                    expected,
                    "{}: flag={:?} local={:?} global={:?}",
                    field.name,
                    flag,
                    local,
                    global
                );
            }
        }
    }
}

#[test]
fn test_verbose_precedence() {
    let field = Field {
        name: "verbose",
        set: |raw, v| raw.verbose = v,
        get: |s| s.verbose,
        default: false,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_debug_precedence() {
    let field = Field {
        name: "debug",
        set: |raw, v| raw.debug = v,
        get: |s| s.debug,
        default: false,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_color_precedence() {
    let field = Field {
        name: "color",
        set: |raw, v| raw.color = v,
        get: |s| s.color,
        default: true,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_nocolor_precedence() {
    let field = Field {
        name: "nocolor",
        set: |raw, v| raw.nocolor = v,
        get: |s| !s.color,
        default: false,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_invertcolors_precedence() {
    let field = Field {
        name: "invertcolors",
        set: |raw, v| raw.invertcolors = v,
        get: |s| s.invert_colors,
        default: false,
    };
    let with_color = RawSettings {
        color: Some(true),
        ..RawSettings::default()
    };
    assert_precedence(&field, &with_color);
}

#[test]
fn test_fullpath_precedence() {
    let field = Field {
        name: "fullpath",
        set: |raw, v| raw.fullpath = v,
        get: |s| s.full_path,
        default: true,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_nofullpath_precedence() {
    let field = Field {
        name: "nofullpath",
        set: |raw, v| raw.nofullpath = v,
        get: |s| !s.full_path,
        default: false,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_excluded_precedence() {
    // Only-excluded is what an explicit excluded=true means on its own
    let field = Field {
        name: "excluded",
        set: |raw, v| raw.excluded = v,
        get: |s| s.excluded && !s.included,
        default: false,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_included_precedence() {
    let field = Field {
        name: "included",
        set: |raw, v| raw.included = v,
        get: |s| s.included && !s.excluded,
        default: false,
    };
    assert_precedence(&field, &RawSettings::default());
}

#[test]
fn test_ignorefile_precedence() {
    let choices = [None, Some(PathBuf::from("one")), Some(PathBuf::from("two"))];

    for flag in &choices {
        for local in &choices {
            for global in &choices {
                let raw = |path: &Option<PathBuf>| RawSettings {
                    ignorefile: path.clone(),
                    ..RawSettings::default()
                };
                let sources = SettingsSources {
                    flags: raw(flag),
                    local: Some(raw(local)),
                    global: Some(raw(global)),
                };

                let settings = resolve(&sources, PathBuf::from("ctx"), false, &terminal());
                let expected = flag
                    .clone()
                    .or_else(|| local.clone())
                    .or_else(|| global.clone())
                    .unwrap_or_else(|| PathBuf::from("ctx/.dockerignore"));

                assert_eq!(settings.source, IgnoreSource::File(expected));
            }
        }
    }
}

#[test]
fn test_buckets_never_both_disabled() {
    for excluded in TRI {
        for included in TRI {
            for local_excluded in TRI {
                let sources = SettingsSources {
                    flags: RawSettings {
                        excluded,
                        included,
                        ..RawSettings::default()
                    },
                    local: Some(RawSettings {
                        excluded: local_excluded,
                        ..RawSettings::default()
                    }),
                    global: None,
                };
                let settings = resolve(&sources, PathBuf::from("."), false, &terminal());
                assert!(settings.excluded || settings.included);
            }
        }
    }
}

#[test]
fn test_both_buckets_requested_emits_both() {
    let sources = SettingsSources {
        flags: RawSettings {
            excluded: Some(true),
            included: Some(true),
            ..RawSettings::default()
        },
        ..SettingsSources::default()
    };
    let settings = resolve(&sources, PathBuf::from("."), false, &terminal());
    assert!(settings.excluded);
    assert!(settings.included);
}

#[test]
fn test_no_color_env_suppresses_every_escape() {
    let env = ColorEnv {
        no_color: true,
        force: true,
        is_terminal: true,
        ..ColorEnv::default()
    };

    for color in TRI {
        for nocolor in TRI {
            for invert in TRI {
                let sources = SettingsSources {
                    flags: RawSettings {
                        color,
                        nocolor,
                        invertcolors: invert,
                        ..RawSettings::default()
                    },
                    local: Some(RawSettings {
                        color: Some(true),
                        ..RawSettings::default()
                    }),
                    global: None,
                };
                let settings = resolve(&sources, PathBuf::from("."), false, &env);
                assert!(!settings.color);

                let formatter = Formatter::new(&settings);
                for bucket in [Bucket::Excluded, Bucket::Included] {
                    assert!(!formatter.render(bucket, "a.txt").contains('\x1b'));
                }
            }
        }
    }
}

#[test]
fn test_stream_mode_is_flag_only() {
    let local = RawSettings::from_json(r#"{"stdin": true}"#).expect("valid settings object");
    let sources = SettingsSources {
        local: Some(local),
        ..SettingsSources::default()
    };
    let settings = resolve(&sources, PathBuf::from("."), false, &terminal());
    assert_ne!(settings.source, IgnoreSource::Stdin);
}
