//! CLI argument parsing using clap
//!
//! Boolean options are tri-state: a flag that is not given stays `None` so
//! configuration files can supply the value. `--flag` means true and
//! `--flag=false` is an explicit false.

use crate::config::RawSettings;
use clap::Parser;
use std::path::PathBuf;

/// stevedore CLI entry point
#[derive(Parser, Debug)]
#[command(name = "stevedore")]
#[command(
    about = "Show which paths are sent to a container build context and which are excluded by its ignore file"
)]
#[command(version)]
pub struct Cli {
    /// Root path to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Emit verbose output
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub verbose: Option<bool>,

    /// Emit debug messages
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub debug: Option<bool>,

    /// Read the ignore rules from STDIN instead of a file
    #[arg(short, long)]
    pub stdin: bool,

    /// Enable colors
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub color: Option<bool>,

    /// Disable use of colors
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub nocolor: Option<bool>,

    /// Path to a specific ignore file (defaults to <ROOT>/.dockerignore)
    #[arg(short, long, value_name = "PATH")]
    pub ignorefile: Option<PathBuf>,

    /// Only output excluded files
    #[arg(short = 'x', long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub excluded: Option<bool>,

    /// Only output included files
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub included: Option<bool>,

    /// Swap the colors used for excluded and included paths
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub invertcolors: Option<bool>,

    /// Emit files and directories with their full path
    #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub fullpath: Option<bool>,

    /// Emit files and directories without their full path
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub nofullpath: Option<bool>,
}

impl Cli {
    /// The settings explicitly given on the command line
    pub fn to_raw(&self) -> RawSettings {
        RawSettings {
            verbose: self.verbose,
            debug: self.debug,
            color: self.color,
            nocolor: self.nocolor,
            ignorefile: self.ignorefile.clone(),
            excluded: self.excluded,
            included: self.included,
            invertcolors: self.invertcolors,
            fullpath: self.fullpath,
            nofullpath: self.nofullpath,
        }
    }
}
