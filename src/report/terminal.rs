use std::io::Write;

use anyhow::Result;

use super::{unified_rows, Paint, ReportContext, ReportSink, RowKind, Theme};
use crate::model::{ComparisonResult, DiffStatus, FileDiffEntry};
use crate::utils::file_size_human;

const WIDTH: usize = 70;

/// Plain-text report for a terminal (or any writer).
pub struct TerminalReport<W: Write> {
    out: W,
    theme: Theme,
}

impl<W: Write> TerminalReport<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self, ch: char) -> Result<()> {
        let line = ch.to_string().repeat(WIDTH);
        writeln!(self.out, "{}", self.theme.paint(&line, Paint::Bold))?;
        Ok(())
    }

    fn sizes(entry: &FileDiffEntry) -> String {
        match entry.status {
            DiffStatus::Added => file_size_human(entry.size.modified),
            DiffStatus::Deleted => file_size_human(entry.size.original),
            DiffStatus::Modified | DiffStatus::BinaryModified => format!(
                "{} → {}",
                file_size_human(entry.size.original),
                file_size_human(entry.size.modified)
            ),
        }
    }

    fn header(&mut self, ctx: &ReportContext<'_>) -> Result<()> {
        let t = self.theme;
        let l = ctx.labels;
        writeln!(self.out)?;
        self.rule('═')?;
        writeln!(self.out, "  {}", t.paint(l.title, Paint::Bold))?;
        self.rule('═')?;
        let field = |name: &str| t.paint(&format!("{:<12}", format!("{name}:")), Paint::Dim);
        writeln!(self.out, "  {} {}", field(l.original), ctx.original.display())?;
        writeln!(self.out, "  {} {}", field(l.modified), ctx.modified.display())?;
        if let Some(cfg) = ctx.config_path {
            writeln!(self.out, "  {} {}", field(l.config), cfg.display())?;
        }
        writeln!(
            self.out,
            "  {} {}",
            field(l.timestamp),
            ctx.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        self.rule('─')?;
        Ok(())
    }

    fn overview(&mut self, result: &ComparisonResult, ctx: &ReportContext<'_>) -> Result<()> {
        let t = self.theme;
        let l = ctx.labels;
        writeln!(self.out, "\n  {}", t.paint(l.overview, Paint::Bold))?;
        writeln!(self.out, "  {:<24}{}", format!("{}:", l.files_in_original), result.total_original)?;
        writeln!(self.out, "  {:<24}{}", format!("{}:", l.files_in_modified), result.total_modified)?;
        writeln!(
            self.out,
            "  {:<24}{}",
            format!("{}:", l.unchanged),
            t.paint(&result.unchanged().to_string(), Paint::Dim)
        )?;

        let rows = [
            (Paint::Green, format!("+ {}:", l.new_files), result.count(DiffStatus::Added).to_string()),
            (Paint::Red, format!("- {}:", l.deleted_files), result.count(DiffStatus::Deleted).to_string()),
            (Paint::Yellow, format!("~ {}:", l.modified_files), result.count(DiffStatus::Modified).to_string()),
            (
                Paint::Magenta,
                format!("~ {}:", l.binary_modified),
                result.count(DiffStatus::BinaryModified).to_string(),
            ),
            (Paint::Cyan, format!("{}:", l.lines_added), format!("+{}", result.total_lines_added())),
            (Paint::Red, format!("{}:", l.lines_removed), format!("-{}", result.total_lines_removed())),
        ];
        for (paint, label, value) in rows {
            writeln!(self.out, "  {}", t.paint(&format!("{label:<24}{value}"), paint))?;
        }
        Ok(())
    }

    fn by_type(&mut self, result: &ComparisonResult, ctx: &ReportContext<'_>) -> Result<()> {
        let stats = result.language_stats();
        if stats.is_empty() {
            return Ok(());
        }
        let t = self.theme;
        writeln!(self.out, "\n  {}", t.paint(ctx.labels.by_file_type, Paint::Bold))?;
        for (lang, s) in stats {
            let mut parts = Vec::new();
            if s.added > 0 {
                parts.push(t.paint(&format!("+{}", s.added), Paint::Green));
            }
            if s.deleted > 0 {
                parts.push(t.paint(&format!("-{}", s.deleted), Paint::Red));
            }
            if s.modified > 0 {
                parts.push(t.paint(&format!("~{}", s.modified), Paint::Yellow));
            }
            writeln!(self.out, "    {lang:<20} {}", parts.join(" "))?;
        }
        Ok(())
    }

    fn file_list(
        &mut self,
        title: &str,
        marker: char,
        paint: Paint,
        entries: &[&FileDiffEntry],
    ) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let t = self.theme;
        writeln!(self.out)?;
        self.rule('─')?;
        writeln!(self.out, "  {}", t.heading(&format!("{title} ({})", entries.len()), paint))?;
        for entry in entries {
            writeln!(
                self.out,
                "    {}  {}",
                t.paint(&format!("{marker} {}", entry.relative_path), paint),
                t.paint(&format!("({})", Self::sizes(entry)), Paint::Dim)
            )?;
        }
        Ok(())
    }

    fn modified_section(&mut self, entries: &[&FileDiffEntry], ctx: &ReportContext<'_>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let t = self.theme;
        writeln!(self.out)?;
        self.rule('─')?;
        writeln!(
            self.out,
            "  {}",
            t.heading(&format!("{} ({})", ctx.labels.modified_files.to_uppercase(), entries.len()), Paint::Yellow)
        )?;

        for entry in entries {
            writeln!(
                self.out,
                "\n    {}  {}  {} {}",
                t.heading(&format!("~ {}", entry.relative_path), Paint::Yellow),
                t.paint(&format!("({})", Self::sizes(entry)), Paint::Dim),
                t.paint(&format!("+{}", entry.lines_added), Paint::Green),
                t.paint(&format!("-{}", entry.lines_removed), Paint::Red),
            )?;

            let rows = unified_rows(entry);
            if rows.is_empty() {
                continue;
            }
            writeln!(self.out, "    {}", t.paint(&"·".repeat(60), Paint::Dim))?;
            for (kind, text) in rows {
                let paint = match kind {
                    RowKind::FileHeader => Paint::Bold,
                    RowKind::HunkHeader => Paint::Cyan,
                    RowKind::Added => Paint::Green,
                    RowKind::Removed => Paint::Red,
                    RowKind::Context => Paint::Dim,
                };
                writeln!(self.out, "      {}", t.paint(&text, paint))?;
            }
        }
        Ok(())
    }
}

impl<W: Write> ReportSink for TerminalReport<W> {
    fn emit(&mut self, result: &ComparisonResult, ctx: &ReportContext<'_>) -> Result<()> {
        let l = ctx.labels;
        self.header(ctx)?;
        self.overview(result, ctx)?;
        self.by_type(result, ctx)?;

        let added: Vec<_> = result.added().collect();
        let deleted: Vec<_> = result.deleted().collect();
        let binary: Vec<_> = result.binary_modified().collect();
        let modified: Vec<_> = result.modified().collect();

        self.file_list(&l.new_files.to_uppercase(), '+', Paint::Green, &added)?;
        self.file_list(&l.deleted_files.to_uppercase(), '-', Paint::Red, &deleted)?;
        self.file_list(&l.binary_modified.to_uppercase(), '~', Paint::Magenta, &binary)?;
        self.modified_section(&modified, ctx)?;

        if result.is_identical() {
            let t = self.theme;
            writeln!(self.out, "\n  {}", t.heading(&format!("✓ {}", l.identical), Paint::Green))?;
        }

        writeln!(self.out)?;
        self.rule('═')?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
