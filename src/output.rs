//! Output formatting for classified entries

pub mod formatter;

pub use formatter::{Formatter, Palette};
