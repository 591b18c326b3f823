use std::path::Path;

use tracing::warn;

use crate::utils::{dotted_extension, file_digest, is_probably_binary, read_lines_best_effort};

/// Extensions that are always treated as binary, regardless of content.
pub const BINARY_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".webp", ".svg", ".tiff",
    ".woff", ".woff2", ".ttf", ".eot", ".otf",
    ".pdf", ".zip", ".tar", ".gz", ".7z", ".rar", ".jar", ".war", ".class",
    ".mp3", ".mp4", ".avi", ".mov", ".wav", ".flac", ".ogg", ".webm",
    ".exe", ".dll", ".so", ".dylib", ".bin", ".msi",
    ".sqlite", ".db", ".db-journal", ".db-shm", ".db-wal",
    ".pyc", ".pyo", ".o", ".obj", ".a", ".lib",
    ".icns", ".cur",
];

pub fn known_binary_extensions() -> impl Iterator<Item = &'static str> {
    BINARY_EXTENSIONS.iter().copied()
}

pub fn has_binary_extension(path: &Path) -> bool {
    let ext = dotted_extension(path);
    !ext.is_empty() && BINARY_EXTENSIONS.contains(&ext.as_str())
}

/// Outcome of comparing one path that exists in both trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Identical,
    TextModified {
        lines_a: Vec<String>,
        lines_b: Vec<String>,
    },
    BinaryModified,
}

impl Classification {
    pub fn kind(&self) -> &'static str {
        match self {
            Classification::Identical => "identical",
            Classification::TextModified { .. } => "text",
            Classification::BinaryModified => "binary",
        }
    }
}

fn looks_binary(path: &Path) -> bool {
    has_binary_extension(path) || is_probably_binary(path)
}

/// Classifies two versions of the same file. Never fails: anything that
/// can't be read is reported as `BinaryModified`.
pub fn classify(path_a: &Path, path_b: &Path, normalize_eol: bool) -> Classification {
    match (file_digest(path_a), file_digest(path_b)) {
        (Some(a), Some(b)) if a == b => return Classification::Identical,
        (Some(_), Some(_)) => {}
        _ => warn!(
            original = %path_a.display(),
            modified = %path_b.display(),
            "could not hash file, comparing as changed"
        ),
    }

    if looks_binary(path_a) || looks_binary(path_b) {
        return Classification::BinaryModified;
    }

    let read = |p: &Path| match read_lines_best_effort(p, normalize_eol) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "treating unreadable file as binary");
            None
        }
    };

    match (read(path_a), read(path_b)) {
        (Some(lines_a), Some(lines_b)) => Classification::TextModified { lines_a, lines_b },
        _ => Classification::BinaryModified,
    }
}
