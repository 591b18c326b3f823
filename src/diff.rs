use std::path::Path;

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use crate::classify::{classify, Classification};
use crate::model::{ComparisonResult, DiffStatus, FileDiffEntry, SizeInfo};
use crate::scanner::{collect_files, FileFilter};
use crate::textdiff::{diff_lines, DEFAULT_CONTEXT};

/// Engine settings, already resolved from the configuration.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub filter: FileFilter,
    /// Run the line differ for text modifications.
    pub show_content: bool,
    pub context_lines: usize,
    pub normalize_eol: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            filter: FileFilter::default(),
            show_content: true,
            context_lines: DEFAULT_CONTEXT,
            normalize_eol: true,
        }
    }
}

fn size_or_zero(path: &Path) -> u64 {
    match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!(file = %path.display(), error = %e, "could not stat file, reporting size 0");
            0
        }
    }
}

fn ensure_dir(label: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{label} folder does not exist: {}", path.display());
    }
    if !path.is_dir() {
        bail!("Not a folder: {}", path.display());
    }
    Ok(())
}

fn compare_common(rel: &str, a_file: &Path, b_file: &Path, opts: &CompareOptions) -> Option<FileDiffEntry> {

    let classification = classify(a_file, b_file, opts.normalize_eol);
    debug!(file = rel, kind = classification.kind(), "classified");

    let size = SizeInfo {
        original: size_or_zero(a_file),
        modified: size_or_zero(b_file),
    };

    match classification {
        Classification::Identical => None,
        Classification::BinaryModified => {
            Some(FileDiffEntry::new(rel.to_string(), DiffStatus::BinaryModified, size))
        }
        Classification::TextModified { lines_a, lines_b } => {
            let mut entry = FileDiffEntry::new(rel.to_string(), DiffStatus::Modified, size);
            if opts.show_content {
                let content = diff_lines(&lines_a, &lines_b, opts.context_lines);
                entry.lines_added = content.lines_added;
                entry.lines_removed = content.lines_removed;
                entry.hunks = content.hunks;
            }
            Some(entry)
        }
    }
}

/// Compares two directory trees. Only a missing or non-directory root is an
/// error; per-file problems degrade that file and the run continues.
pub fn compare_directories(a_root: &Path, b_root: &Path, opts: &CompareOptions) -> Result<ComparisonResult> {
    ensure_dir("Original", a_root)?;
    ensure_dir("Modified", b_root)?;

    let files_a = collect_files(a_root, &opts.filter);
    let files_b = collect_files(b_root, &opts.filter);
    debug!(original = files_a.len(), modified = files_b.len(), "collected files");

    let mut entries = Vec::new();

    // BTreeMap keys come out sorted
    for (rel, path) in files_a.iter().filter(|(k, _)| !files_b.contains_key(*k)) {
        let size = SizeInfo {
            original: size_or_zero(&a_root.join(path)),
            modified: 0,
        };
        entries.push(FileDiffEntry::new(rel.clone(), DiffStatus::Deleted, size));
    }

    for (rel, path) in files_b.iter().filter(|(k, _)| !files_a.contains_key(*k)) {
        let size = SizeInfo {
            original: 0,
            modified: size_or_zero(&b_root.join(path)),
        };
        entries.push(FileDiffEntry::new(rel.clone(), DiffStatus::Added, size));
    }

    let mut common = 0;
    for (rel, path_a) in &files_a {
        let Some(path_b) = files_b.get(rel) else {
            continue;
        };
        common += 1;
        if let Some(entry) = compare_common(rel, &a_root.join(path_a), &b_root.join(path_b), opts) {
            entries.push(entry);
        }
    }

    let result = ComparisonResult {
        entries,
        total_original: files_a.len(),
        total_modified: files_b.len(),
        common,
    };

    info!(
        added = result.count(DiffStatus::Added),
        deleted = result.count(DiffStatus::Deleted),
        modified = result.count(DiffStatus::Modified),
        binary_modified = result.count(DiffStatus::BinaryModified),
        unchanged = result.unchanged(),
        "comparison finished"
    );

    Ok(result)
}
