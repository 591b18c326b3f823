#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates `rel` under `root`, including parent directories.
pub fn write_file(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, bytes).expect("Failed to write file");
}

/// A temporary tree populated from `(relative path, contents)` pairs.
pub fn tree(files: &[(&str, &[u8])]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (rel, bytes) in files {
        write_file(dir.path(), rel, bytes);
    }
    dir
}

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
