use std::fmt;

use similar::{capture_diff_slices, group_diff_ops, Algorithm, DiffOp, DiffTag};

pub const DEFAULT_CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    Context,
    Added,
    Removed,
}

impl LineTag {
    pub fn marker(self) -> char {
        match self {
            LineTag::Context => ' ',
            LineTag::Added => '+',
            LineTag::Removed => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkLine {
    pub tag: LineTag,
    /// Line text, terminator included when the source line had one.
    pub text: String,
}

/// One block of a unified diff. Starts are 1-based; a zero-length range
/// starts at the line preceding it, as in `diff -u`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
    pub lines: Vec<HunkLine>,
}

fn format_range(start: usize, len: usize) -> String {
    if len == 1 {
        start.to_string()
    } else {
        format!("{start},{len}")
    }
}

impl Hunk {
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.old_start, self.old_len),
            format_range(self.new_start, self.new_len)
        )
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for line in &self.lines {
            write!(f, "{}{}", line.tag.marker(), line.text)?;
            if !line.text.ends_with('\n') {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDiff {
    pub hunks: Vec<Hunk>,
    pub lines_added: usize,
    pub lines_removed: usize,
}

fn unified_start(range_start: usize, len: usize) -> usize {
    if len == 0 {
        range_start
    } else {
        range_start + 1
    }
}

fn build_hunk(group: &[DiffOp], a: &[String], b: &[String]) -> Option<Hunk> {
    let first = group.first()?;
    let last = group.last()?;
    let old_range = first.old_range().start..last.old_range().end;
    let new_range = first.new_range().start..last.new_range().end;

    let mut lines = Vec::new();
    for op in group {
        let (tag, old, new) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => lines.extend(a[old].iter().map(|t| HunkLine {
                tag: LineTag::Context,
                text: t.clone(),
            })),
            DiffTag::Delete => lines.extend(a[old].iter().map(|t| HunkLine {
                tag: LineTag::Removed,
                text: t.clone(),
            })),
            DiffTag::Insert => lines.extend(b[new].iter().map(|t| HunkLine {
                tag: LineTag::Added,
                text: t.clone(),
            })),
            DiffTag::Replace => {
                lines.extend(a[old].iter().map(|t| HunkLine {
                    tag: LineTag::Removed,
                    text: t.clone(),
                }));
                lines.extend(b[new].iter().map(|t| HunkLine {
                    tag: LineTag::Added,
                    text: t.clone(),
                }));
            }
        }
    }

    Some(Hunk {
        old_start: unified_start(old_range.start, old_range.len()),
        old_len: old_range.len(),
        new_start: unified_start(new_range.start, new_range.len()),
        new_len: new_range.len(),
        lines,
    })
}

/// Line diff between two sequences. Change regions separated by at most
/// `2 * context` unchanged lines share a hunk. Output is deterministic.
pub fn diff_lines(a: &[String], b: &[String], context: usize) -> ContentDiff {
    let ops = capture_diff_slices(Algorithm::Myers, a, b);
    let hunks: Vec<Hunk> = group_diff_ops(ops, context)
        .iter()
        .filter_map(|group| build_hunk(group, a, b))
        .collect();

    let count = |tag: LineTag| {
        hunks
            .iter()
            .flat_map(|h| h.lines.iter())
            .filter(|l| l.tag == tag)
            .count()
    };

    ContentDiff {
        lines_added: count(LineTag::Added),
        lines_removed: count(LineTag::Removed),
        hunks,
    }
}
