use std::collections::BTreeMap;
use std::fmt;

use crate::textdiff::Hunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiffStatus {
    Added,
    Deleted,
    Modified,
    BinaryModified,
}

impl DiffStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffStatus::Added => "added",
            DiffStatus::Deleted => "deleted",
            DiffStatus::Modified => "modified",
            DiffStatus::BinaryModified => "binary_modified",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File sizes on each side; a side where the file doesn't exist is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeInfo {
    pub original: u64,
    pub modified: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiffEntry {
    /// Forward-slash path relative to both roots.
    pub relative_path: String,
    pub status: DiffStatus,
    pub size: SizeInfo,
    pub language: String,
    pub lines_added: usize,
    pub lines_removed: usize,
    pub hunks: Vec<Hunk>,
}

impl FileDiffEntry {
    pub fn new(relative_path: String, status: DiffStatus, size: SizeInfo) -> Self {
        let language = crate::language::language_for(std::path::Path::new(&relative_path));
        Self {
            relative_path,
            status,
            size,
            language,
            lines_added: 0,
            lines_removed: 0,
            hunks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageStats {
    pub added: usize,
    pub deleted: usize,
    /// Text and binary modifications together.
    pub modified: usize,
}

/// Everything one comparison run produced. Entries are ordered deleted,
/// added, then changed common files, each group sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    pub entries: Vec<FileDiffEntry>,
    pub total_original: usize,
    pub total_modified: usize,
    pub common: usize,
}

impl ComparisonResult {
    pub fn with_status(&self, status: DiffStatus) -> impl Iterator<Item = &FileDiffEntry> {
        self.entries.iter().filter(move |e| e.status == status)
    }

    pub fn count(&self, status: DiffStatus) -> usize {
        self.with_status(status).count()
    }

    pub fn added(&self) -> impl Iterator<Item = &FileDiffEntry> {
        self.with_status(DiffStatus::Added)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &FileDiffEntry> {
        self.with_status(DiffStatus::Deleted)
    }

    pub fn modified(&self) -> impl Iterator<Item = &FileDiffEntry> {
        self.with_status(DiffStatus::Modified)
    }

    pub fn binary_modified(&self) -> impl Iterator<Item = &FileDiffEntry> {
        self.with_status(DiffStatus::BinaryModified)
    }

    /// Common paths whose content matched.
    pub fn unchanged(&self) -> usize {
        self.common
            .saturating_sub(self.count(DiffStatus::Modified) + self.count(DiffStatus::BinaryModified))
    }

    pub fn total_lines_added(&self) -> usize {
        self.entries.iter().map(|e| e.lines_added).sum()
    }

    pub fn total_lines_removed(&self) -> usize {
        self.entries.iter().map(|e| e.lines_removed).sum()
    }

    pub fn is_identical(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn language_stats(&self) -> BTreeMap<String, LanguageStats> {
        let mut stats: BTreeMap<String, LanguageStats> = BTreeMap::new();
        for entry in &self.entries {
            let s = stats.entry(entry.language.clone()).or_default();
            match entry.status {
                DiffStatus::Added => s.added += 1,
                DiffStatus::Deleted => s.deleted += 1,
                DiffStatus::Modified | DiffStatus::BinaryModified => s.modified += 1,
            }
        }
        stats
    }
}
