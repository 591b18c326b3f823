//! Renderers for a finished [`ComparisonResult`].
//!
//! The engine knows nothing about presentation: colours come from a
//! [`Theme`] and every user-facing string from [`Labels`], both handed to
//! the sinks explicitly.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Deserialize;

use crate::model::{ComparisonResult, FileDiffEntry};
use crate::textdiff::LineTag;

pub mod html;
pub mod terminal;

pub use html::{render_html, HtmlReport};
pub use terminal::TerminalReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Plain,
    Bold,
    Dim,
    Green,
    Red,
    Yellow,
    Magenta,
    Cyan,
}

/// Terminal styling. Passed to renderers by value, never global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn paint(&self, text: &str, paint: Paint) -> String {
        if !self.color {
            return text.to_string();
        }
        match paint {
            Paint::Plain => text.to_string(),
            Paint::Bold => text.bold().to_string(),
            Paint::Dim => text.dimmed().to_string(),
            Paint::Green => text.bright_green().to_string(),
            Paint::Red => text.bright_red().to_string(),
            Paint::Yellow => text.bright_yellow().to_string(),
            Paint::Magenta => text.bright_magenta().to_string(),
            Paint::Cyan => text.bright_cyan().to_string(),
        }
    }

    /// Colour plus bold, for section titles.
    pub fn heading(&self, text: &str, paint: Paint) -> String {
        if !self.color {
            return text.to_string();
        }
        self.paint(text, paint).as_str().bold().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
}

impl Language {
    pub fn labels(self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH,
            Language::German => &GERMAN,
        }
    }
}

/// Every string a report shows to the user.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub original: &'static str,
    pub modified: &'static str,
    pub config: &'static str,
    pub timestamp: &'static str,
    pub overview: &'static str,
    pub files_in_original: &'static str,
    pub files_in_modified: &'static str,
    pub unchanged: &'static str,
    pub new_files: &'static str,
    pub deleted_files: &'static str,
    pub modified_files: &'static str,
    pub binary_modified: &'static str,
    pub lines_added: &'static str,
    pub lines_removed: &'static str,
    pub by_file_type: &'static str,
    pub identical: &'static str,
    pub html_title: &'static str,
    pub created: &'static str,
    pub deleted_short: &'static str,
    pub modified_short: &'static str,
    pub filter_placeholder: &'static str,
}

pub static ENGLISH: Labels = Labels {
    title: "DIRECTORY DIFF REPORT",
    original: "Original",
    modified: "Modified",
    config: "Config",
    timestamp: "Timestamp",
    overview: "OVERVIEW",
    files_in_original: "Files in Original",
    files_in_modified: "Files in Modified",
    unchanged: "Unchanged",
    new_files: "New Files",
    deleted_files: "Deleted Files",
    modified_files: "Modified Files",
    binary_modified: "Binary Modified",
    lines_added: "Lines Added",
    lines_removed: "Lines Removed",
    by_file_type: "BY FILE TYPE",
    identical: "No differences found! The folders are identical.",
    html_title: "Directory Diff Report",
    created: "Created",
    deleted_short: "Deleted",
    modified_short: "Modified",
    filter_placeholder: "Filter filenames...",
};

pub static GERMAN: Labels = Labels {
    title: "VERZEICHNIS-DIFF-BERICHT",
    original: "Original",
    modified: "Geändert",
    config: "Konfig",
    timestamp: "Zeitpunkt",
    overview: "ÜBERSICHT",
    files_in_original: "Dateien im Original",
    files_in_modified: "Dateien in Geändert",
    unchanged: "Unverändert",
    new_files: "Neue Dateien",
    deleted_files: "Gelöschte Dateien",
    modified_files: "Geänderte Dateien",
    binary_modified: "Binär geändert",
    lines_added: "Zeilen hinzugefügt",
    lines_removed: "Zeilen entfernt",
    by_file_type: "NACH DATEITYP",
    identical: "Keine Unterschiede gefunden! Die Ordner sind identisch.",
    html_title: "Verzeichnis-Diff-Bericht",
    created: "Erstellt",
    deleted_short: "Gelöscht",
    modified_short: "Geändert",
    filter_placeholder: "Dateinamen filtern...",
};

/// Run metadata shown alongside the result.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub original: &'a Path,
    pub modified: &'a Path,
    pub config_path: Option<&'a Path>,
    pub generated_at: DateTime<Local>,
    pub labels: &'static Labels,
}

/// Something that presents a comparison result.
pub trait ReportSink {
    fn emit(&mut self, result: &ComparisonResult, ctx: &ReportContext<'_>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    FileHeader,
    HunkHeader,
    Added,
    Removed,
    Context,
}

/// Unified diff text of one entry, one row per output line, without line
/// terminators. Empty when the entry has no hunks.
pub fn unified_rows(entry: &FileDiffEntry) -> Vec<(RowKind, String)> {
    if entry.hunks.is_empty() {
        return Vec::new();
    }
    let mut rows = vec![
        (RowKind::FileHeader, format!("--- original/{}", entry.relative_path)),
        (RowKind::FileHeader, format!("+++ modified/{}", entry.relative_path)),
    ];
    for hunk in &entry.hunks {
        rows.push((RowKind::HunkHeader, hunk.header()));
        for line in &hunk.lines {
            let kind = match line.tag {
                LineTag::Added => RowKind::Added,
                LineTag::Removed => RowKind::Removed,
                LineTag::Context => RowKind::Context,
            };
            let text = line.text.trim_end_matches(['\n', '\r']);
            rows.push((kind, format!("{}{}", line.tag.marker(), text)));
        }
    }
    rows
}
