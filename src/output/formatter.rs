#![forbid(unsafe_code)]

//! Line rendering for classified entries
//!
//! Rendering is pure: color is applied to the returned string through an
//! in-memory ANSI buffer and reset at the end of every line, so nothing is
//! left set on the terminal between lines.

use crate::config::Settings;
use crate::types::Bucket;
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Color assignment for the two buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    excluded: ColorSpec,
    included: ColorSpec,
}

impl Palette {
    /// Green for excluded entries, bright red for included ones
    pub fn standard() -> Self {
        let mut excluded = ColorSpec::new();
        excluded.set_fg(Some(Color::Green));

        let mut included = ColorSpec::new();
        included.set_fg(Some(Color::Red)).set_intense(true);

        Self { excluded, included }
    }

    /// Swap the two assignments
    pub fn inverted(self) -> Self {
        Self {
            excluded: self.included,
            included: self.excluded,
        }
    }

    pub fn spec(&self, bucket: Bucket) -> &ColorSpec {
        match bucket {
            Bucket::Excluded => &self.excluded,
            Bucket::Included => &self.included,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Renders one output line per classified entry
#[derive(Debug, Clone)]
pub struct Formatter {
    verbose: bool,
    color: bool,
    palette: Palette,
}

impl Formatter {
    /// Build a formatter from resolved settings
    ///
    /// Color inversion is applied here, once, before any line is rendered.
    pub fn new(settings: &Settings) -> Self {
        Self::with_options(settings.verbose, settings.color, settings.invert_colors)
    }

    pub fn with_options(verbose: bool, color: bool, invert_colors: bool) -> Self {
        let palette = if invert_colors {
            Palette::standard().inverted()
        } else {
            Palette::standard()
        };
        Self {
            verbose,
            color,
            palette,
        }
    }

    /// The uncolored text for an entry
    pub fn line(&self, bucket: Bucket, display: &str) -> String {
        if !self.verbose {
            return display.to_string();
        }
        match bucket {
            Bucket::Excluded => {
                format!("path {} ignored and is not included in Docker image", display)
            }
            Bucket::Included => {
                format!("path {} not ignored and is included in Docker image", display)
            }
        }
    }

    /// The final text for an entry, colored when color is enabled
    pub fn render(&self, bucket: Bucket, display: &str) -> String {
        let line = self.line(bucket, display);
        if !self.color {
            return line;
        }
        match paint(&line, self.palette.spec(bucket)) {
            Ok(colored) => colored,
            Err(_) => line,
        }
    }
}

/// Wrap `text` in `spec` and a trailing reset
fn paint(text: &str, spec: &ColorSpec) -> io::Result<String> {
    let mut buffer = Buffer::ansi();
    buffer.set_color(spec)?;
    buffer.write_all(text.as_bytes())?;
    buffer.reset()?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}
