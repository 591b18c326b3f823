use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{unified_rows, ReportContext, ReportSink, RowKind};
use crate::model::{ComparisonResult, DiffStatus, FileDiffEntry};
use crate::utils::file_size_human;

const STYLE: &str = r#"
    :root { --bg: #0d1117; --fg: #c9d1d9; --border: #30363d; --green: #3fb950;
            --red: #f85149; --yellow: #d29922; --blue: #58a6ff; --magenta: #bc8cff;
            --surface: #161b22; --diff-add-bg: #12261e; --diff-del-bg: #2d1214; }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: 'Segoe UI', system-ui, sans-serif; background: var(--bg);
           color: var(--fg); padding: 2rem; line-height: 1.6; }
    h1 { color: var(--blue); margin-bottom: 0.5rem; font-size: 1.5rem; }
    .meta { color: #8b949e; margin-bottom: 2rem; font-size: 0.9rem; }
    .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
               gap: 1rem; margin-bottom: 2rem; }
    .stat-card { background: var(--surface); border: 1px solid var(--border);
                 border-radius: 8px; padding: 1rem; text-align: center; }
    .stat-card .number { font-size: 1.8rem; font-weight: 700; }
    .stat-card .label { font-size: 0.85rem; color: #8b949e; }
    .section-title { font-size: 1.1rem; font-weight: 600; margin: 1.5rem 0 0.5rem;
                     padding: 0.5rem 0; border-bottom: 1px solid var(--border); }
    .file-list { list-style: none; }
    .file-list li { padding: 0.3rem 0.5rem; font-family: monospace; font-size: 0.9rem; }
    .file-list li:hover { background: var(--surface); border-radius: 4px; }
    .file-diff { margin: 0.5rem 0; border: 1px solid var(--border); border-radius: 8px;
                 overflow: hidden; }
    .file-diff summary { cursor: pointer; padding: 0.6rem 1rem; background: var(--surface);
                         display: flex; align-items: center; gap: 0.8rem; font-family: monospace;
                         font-size: 0.9rem; }
    .file-diff summary:hover { background: #1c2129; }
    .status { font-weight: 700; width: 1.2rem; text-align: center; }
    .status.add { color: var(--green); }
    .status.del { color: var(--red); }
    .status.mod { color: var(--yellow); }
    .status.bin { color: var(--magenta); }
    .filepath { flex: 1; }
    .lang { color: #8b949e; font-size: 0.8rem; }
    .stats .add { color: var(--green); }
    .stats .del { color: var(--red); margin-left: 0.4rem; }
    .diff-content { font-family: 'Fira Code', 'Consolas', monospace; font-size: 0.82rem;
                    overflow-x: auto; max-height: 600px; overflow-y: auto; white-space: pre; }
    .diff-header { padding: 2px 12px; font-weight: 600; background: #1c2129; }
    .diff-hunk { padding: 2px 12px; color: var(--blue); background: #161b22; }
    .diff-add { padding: 2px 12px; background: var(--diff-add-bg); color: var(--green); }
    .diff-del { padding: 2px 12px; background: var(--diff-del-bg); color: var(--red); }
    .diff-ctx { padding: 2px 12px; color: #8b949e; }
    .filter { margin-bottom: 1.5rem; }
    .filter input { background: var(--surface); border: 1px solid var(--border); color: var(--fg);
                    padding: 0.5rem 1rem; border-radius: 6px; width: 100%; max-width: 400px;
                    font-size: 0.9rem; }
    .filter input::placeholder { color: #484f58; }
    .hidden { display: none !important; }
"#;

const SCRIPT: &str = r#"
function filterFiles() {
    const q = document.getElementById('searchBox').value.toLowerCase();
    document.querySelectorAll('.filterable, .file-diff').forEach(el => {
        const name = (el.dataset.name || el.id || '').toLowerCase();
        el.classList.toggle('hidden', q && !name.includes(q));
    });
}
"#;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn stat_card(html: &mut String, value: &str, label: &str, color: Option<&str>) {
    let style = color.map(|c| format!(" style=\"color:{c}\"")).unwrap_or_default();
    let _ = write!(
        html,
        "    <div class=\"stat-card\"><div class=\"number\"{style}>{value}</div><div class=\"label\">{}</div></div>\n",
        escape(label)
    );
}

fn file_list(html: &mut String, title: &str, class: &str, marker: char, color: &str, entries: &[&FileDiffEntry]) {
    if entries.is_empty() {
        return;
    }
    let _ = write!(
        html,
        "<div class=\"section-title\" style=\"color:var(--{color})\">{marker} {} ({})</div>\n<ul class=\"file-list\">\n",
        escape(title),
        entries.len()
    );
    for entry in entries {
        let size = match entry.status {
            DiffStatus::Added => file_size_human(entry.size.modified),
            DiffStatus::Deleted => file_size_human(entry.size.original),
            DiffStatus::Modified | DiffStatus::BinaryModified => format!(
                "{} → {}",
                file_size_human(entry.size.original),
                file_size_human(entry.size.modified)
            ),
        };
        let path = escape(&entry.relative_path);
        let _ = writeln!(
            html,
            "<li class=\"filterable\" data-name=\"{path}\"><span class=\"status {class}\">{marker}</span> {path} <span class=\"lang\">({size})</span></li>"
        );
    }
    html.push_str("</ul>\n");
}

fn diff_section(html: &mut String, entry: &FileDiffEntry) {
    let path = escape(&entry.relative_path);
    let _ = write!(
        html,
        "<details class=\"file-diff\" id=\"{path}\">\n  <summary>\n    <span class=\"status mod\">~</span>\n    \
         <span class=\"filepath\">{path}</span>\n    <span class=\"lang\">{}</span>\n    \
         <span class=\"stats\"><span class=\"add\">+{}</span> <span class=\"del\">-{}</span></span>\n  </summary>\n  \
         <div class=\"diff-content\">",
        escape(&entry.language),
        entry.lines_added,
        entry.lines_removed
    );
    for (kind, text) in unified_rows(entry) {
        let class = match kind {
            RowKind::FileHeader => "diff-header",
            RowKind::HunkHeader => "diff-hunk",
            RowKind::Added => "diff-add",
            RowKind::Removed => "diff-del",
            RowKind::Context => "diff-ctx",
        };
        let _ = write!(html, "<div class=\"{class}\">{}</div>", escape(&text));
    }
    html.push_str("</div>\n</details>\n");
}

/// Builds the complete, self-contained HTML page.
pub fn render_html(result: &ComparisonResult, ctx: &ReportContext<'_>) -> String {
    let l = ctx.labels;
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{} – {}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n",
        escape(l.html_title),
        ctx.generated_at.format("%Y-%m-%d %H:%M")
    );
    let _ = write!(
        html,
        "<h1>📂 {}</h1>\n<div class=\"meta\">\n    {}: <strong>{}</strong><br>\n    {}: <strong>{}</strong><br>\n    {}: {}\n</div>\n\n",
        escape(l.html_title),
        escape(l.original),
        escape(&ctx.original.display().to_string()),
        escape(l.modified),
        escape(&ctx.modified.display().to_string()),
        escape(l.created),
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    html.push_str("<div class=\"summary\">\n");
    stat_card(&mut html, &result.count(DiffStatus::Added).to_string(), l.new_files, Some("var(--green)"));
    stat_card(&mut html, &result.count(DiffStatus::Deleted).to_string(), l.deleted_short, Some("var(--red)"));
    stat_card(&mut html, &result.count(DiffStatus::Modified).to_string(), l.modified_short, Some("var(--yellow)"));
    stat_card(
        &mut html,
        &result.count(DiffStatus::BinaryModified).to_string(),
        l.binary_modified,
        Some("var(--magenta)"),
    );
    stat_card(&mut html, &format!("+{}", result.total_lines_added()), l.lines_added, None);
    stat_card(&mut html, &format!("-{}", result.total_lines_removed()), l.lines_removed, Some("var(--red)"));
    stat_card(&mut html, &result.unchanged().to_string(), l.unchanged, Some("#8b949e"));
    html.push_str("</div>\n\n");

    let _ = writeln!(
        html,
        "<div class=\"filter\"><input type=\"text\" id=\"searchBox\" placeholder=\"🔍 {}\" oninput=\"filterFiles()\"></div>\n",
        escape(l.filter_placeholder)
    );

    let added: Vec<_> = result.added().collect();
    let deleted: Vec<_> = result.deleted().collect();
    let binary: Vec<_> = result.binary_modified().collect();
    let modified: Vec<_> = result.modified().collect();

    file_list(&mut html, l.new_files, "add", '+', "green", &added);
    file_list(&mut html, l.deleted_files, "del", '-', "red", &deleted);
    file_list(&mut html, l.binary_modified, "bin", '~', "magenta", &binary);

    if !modified.is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"section-title\" style=\"color:var(--yellow)\">~ {} ({})</div>",
            escape(l.modified_files),
            modified.len()
        );
        for entry in modified {
            diff_section(&mut html, entry);
        }
    }

    let _ = write!(html, "\n<script>{SCRIPT}</script>\n</body>\n</html>\n");
    html
}

/// Writes the HTML page to a file, creating parent directories.
pub struct HtmlReport {
    path: PathBuf,
}

impl HtmlReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ReportSink for HtmlReport {
    fn emit(&mut self, result: &ComparisonResult, ctx: &ReportContext<'_>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let html = render_html(result, ctx);
        fs::write(&self.path, html).with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "wrote HTML report");
        Ok(())
    }
}
