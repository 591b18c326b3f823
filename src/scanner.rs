use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::ConfigError;
use crate::utils::dotted_extension;

/// Collected files: forward-slash display key -> real path relative to the root.
pub type FileMap = BTreeMap<String, PathBuf>;

/// Which directories and files the collector skips.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    /// Bare directory names, pruned wherever they appear.
    pub ignore_dirs: BTreeSet<String>,
    /// Shell globs matched against the file name only.
    pub ignore_files: Vec<Pattern>,
    /// Lowercase extensions with a leading dot. Empty or `None` keeps all files.
    pub extensions: Option<BTreeSet<String>>,
}

impl FileFilter {
    pub fn new<D, P, E>(ignore_dirs: D, ignore_files: P, extensions: Option<E>) -> Result<Self, ConfigError>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let ignore_files = ignore_files
            .into_iter()
            .map(|s| {
                let s = s.as_ref();
                Pattern::new(s).map_err(|source| ConfigError::InvalidPattern {
                    pattern: s.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            ignore_dirs: ignore_dirs.into_iter().map(Into::into).collect(),
            ignore_files,
            extensions: extensions.map(|exts| exts.into_iter().map(|e| normalize_extension(e.as_ref())).collect()),
        })
    }

    fn prunes_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.ignore_dirs.contains(name))
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignore_files.iter().any(|p| p.matches(name))
    }

    pub fn accepts_extension(&self, path: &Path) -> bool {
        match &self.extensions {
            Some(exts) if !exts.is_empty() => exts.contains(&dotted_extension(path)),
            _ => true,
        }
    }
}

/// `"TS"`, `"ts"` and `".ts"` all become `".ts"`.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Forward-slash form of a relative path. Components that aren't valid
/// UTF-8 are byte-escaped (`caf\xe9.txt`) so distinct names stay distinct.
pub fn normalize_rel(rel: &Path) -> String {
    rel.components()
        .map(|c| {
            let part = c.as_os_str();
            match part.to_str() {
                Some(s) => Cow::Borrowed(s),
                None => Cow::Owned(part.as_encoded_bytes().escape_ascii().to_string()),
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks `root` and returns every kept file, keyed by its display path.
/// Unreadable entries are logged and skipped.
pub fn collect_files(root: &Path, filter: &FileFilter) -> FileMap {
    let mut files = FileMap::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter();

    for entry in walker.filter_entry(|e| !filter.prunes_dir(e)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        // symlinked directories are listed but never entered
        if entry.file_type().is_dir() || path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if filter.is_ignored_file(&name) {
            debug!(file = %path.display(), "ignored by pattern");
            continue;
        }
        if !filter.accepts_extension(path) {
            continue;
        }

        if let Ok(rel) = path.strip_prefix(root) {
            let key = normalize_rel(rel);
            if let Some(prev) = files.insert(key.clone(), rel.to_path_buf()) {
                warn!(file = %key, shadowed = %prev.display(), "two files share one display path");
            }
        }
    }

    files
}
