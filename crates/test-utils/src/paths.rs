//! Temporary directory helpers for tests that need a filesystem.

use std::fs;
use std::path::{Path, PathBuf};

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Writes a tile payload to `{root}/{z}/{x}/{y}.txt`, creating directories.
pub fn write_tile_file(root: &Path, z: u32, x: u32, y: u32, payload: &str) -> PathBuf {
    let dir = root.join(z.to_string()).join(x.to_string());
    fs::create_dir_all(&dir).expect("Failed to create tile directory");
    let path = dir.join(format!("{}.txt", y));
    fs::write(&path, payload).expect("Failed to write tile file");
    path
}
