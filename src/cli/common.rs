//! Exit codes and helpers shared by the CLI

use crate::cli::args::Cli;
use crate::config::settings::log_level_for;
use crate::config::{Locations, SettingsSources};
use log::LevelFilter;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RULES_ERROR: i32 = 1;
pub const EXIT_WALK_ERROR: i32 = 2;

/// Load the configuration files around the parsed flags
pub(crate) fn load_sources(cli: &Cli, locations: &Locations) -> SettingsSources {
    SettingsSources::load(cli.to_raw(), locations)
}

/// Log level requested on the command line, before configuration is read
pub fn initial_log_level(cli: &Cli) -> LevelFilter {
    log_level_for(cli.debug == Some(true), cli.verbose == Some(true))
}
