//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod fixtures;

use std::path::{Path, PathBuf};

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}
