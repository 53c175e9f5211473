//! stevedore CLI entry point

use clap::Parser;
use log::LevelFilter;
use stevedore::cli::{Cli, common::initial_log_level, scan::run_scan};
use std::process;

fn main() {
    let cli = Cli::parse();

    // The logger accepts everything; the global max level does the gating
    // so it can be raised once configuration files have been read.
    env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .format_timestamp(None)
        .format_target(false)
        .init();
    log::set_max_level(initial_log_level(&cli));

    process::exit(run_scan(&cli));
}
