//! Scan command implementation
//!
//! This module runs the whole pipeline:
//! - Loads the local and global configuration around the parsed flags
//! - Resolves the effective settings
//! - Compiles the target ignore rules (fatal on failure)
//! - Compiles stevedore's own ignore file (best effort)
//! - Walks, classifies and prints every entry
//! - Returns the exit code

use crate::cli::args::Cli;
use crate::cli::common::{EXIT_RULES_ERROR, EXIT_SUCCESS, EXIT_WALK_ERROR, load_sources};
use crate::config::{ColorEnv, Locations, resolve};
use crate::engine::{Classifier, ScanSummary, compile_own, compile_target};
use crate::error::StevedoreError;
use crate::output::Formatter;
use std::io::{self, Read, Write};

/// Run a scan against the real process environment
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 1: The target ignore rules could not be compiled
/// - 2: The walk reported an error
pub fn run_scan(cli: &Cli) -> i32 {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_scan_with(
        cli,
        &Locations::from_env(),
        &ColorEnv::from_env(),
        stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Run a scan with explicit file locations, environment and streams
pub fn run_scan_with<R: Read, W: Write>(
    cli: &Cli,
    locations: &Locations,
    env: &ColorEnv,
    input: R,
    out: &mut W,
) -> i32 {
    match run_scan_inner(cli, locations, env, input, out) {
        Ok(summary) if summary.has_errors() => {
            eprintln!(
                "Error: walking the path {} reported {} error(s)",
                cli.root.display(),
                summary.errors
            );
            EXIT_WALK_ERROR
        }
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            match e {
                StevedoreError::Rule(_) => EXIT_RULES_ERROR,
                StevedoreError::Io(_) => EXIT_WALK_ERROR,
            }
        }
    }
}

fn run_scan_inner<R: Read, W: Write>(
    cli: &Cli,
    locations: &Locations,
    env: &ColorEnv,
    input: R,
    out: &mut W,
) -> Result<ScanSummary, StevedoreError> {
    let sources = load_sources(cli, locations);
    let settings = resolve(&sources, cli.root.clone(), cli.stdin, env);

    // Configuration may enable debug or verbose output
    log::set_max_level(settings.log_level());
    log::debug!("settings: {:?}", settings);

    let target = compile_target(&settings.source, input)?;
    let own = compile_own(&locations.own_ignore);

    let formatter = Formatter::new(&settings);
    let summary = Classifier::new(&settings, target, own).run(out, &formatter)?;
    out.flush()?;

    log::debug!(
        "{} included, {} excluded, {} emitted",
        summary.included,
        summary.excluded,
        summary.emitted
    );
    Ok(summary)
}
