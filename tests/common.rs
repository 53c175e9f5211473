//! Test utilities for stevedore integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Build the reference build context:
///
/// ```text
/// .dockerignore      (*.log, node_modules/)
/// a.txt
/// b.log
/// node_modules/x.js
/// ```
pub fn write_scenario(root: &Path) -> TestResult {
    fs::create_dir_all(root.join("node_modules"))?;
    fs::write(root.join(".dockerignore"), "*.log\nnode_modules/\n")?;
    fs::write(root.join("a.txt"), "a")?;
    fs::write(root.join("b.log"), "b")?;
    fs::write(root.join("node_modules").join("x.js"), "x")?;
    Ok(())
}
