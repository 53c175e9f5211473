//! CLI argument parsing and the scan command

pub mod args;
pub mod common;
pub mod scan;

pub use args::Cli;
