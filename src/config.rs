use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::diff::CompareOptions;
use crate::report::Language;
use crate::scanner::{normalize_extension, FileFilter};
use crate::textdiff::DEFAULT_CONTEXT;

pub const DEFAULT_CONFIG_NAME: &str = "diff_dirs.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file '{}' not found (create one with --init)", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file is empty or invalid: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("'original' and 'modified' must be set in the config")]
    MissingRoots,

    #[error("{label} folder does not exist: {}", .path.display())]
    MissingDir { label: &'static str, path: PathBuf },

    #[error("Not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("'{}' already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    original: Option<PathBuf>,
    modified: Option<PathBuf>,
    output: Option<RawOutput>,
    filter: Option<RawFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawOutput {
    html: bool,
    html_path: PathBuf,
    color: bool,
    show_content: bool,
    context_lines: usize,
    language: Language,
    normalize_eol: bool,
}

impl Default for RawOutput {
    fn default() -> Self {
        Self {
            html: false,
            html_path: PathBuf::from("./diff-report.html"),
            color: true,
            show_content: true,
            context_lines: DEFAULT_CONTEXT,
            language: Language::default(),
            normalize_eol: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFilter {
    ignore_dirs: Vec<String>,
    ignore_files: Vec<String>,
    extensions: Option<Vec<String>>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: Option<PathBuf>,
    pub original: PathBuf,
    pub modified: PathBuf,
    pub html: bool,
    pub html_path: PathBuf,
    pub color: bool,
    pub show_content: bool,
    pub context_lines: usize,
    pub language: Language,
    pub normalize_eol: bool,
    pub ignore_dirs: BTreeSet<String>,
    pub ignore_files: Vec<String>,
    /// Normalised to lowercase with a leading dot; `None` keeps all types.
    pub extensions: Option<BTreeSet<String>>,
}

/// Lexically resolves `p` against `base` without touching the filesystem.
fn resolve_path(base: &Path, p: &Path) -> PathBuf {
    let joined = if p.is_absolute() { p.to_path_buf() } else { base.join(p) };
    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

impl Config {
    pub fn from_yaml(text: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let is_blank = text
            .lines()
            .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'));
        let raw: RawConfig = if is_blank {
            RawConfig::default()
        } else {
            serde_yaml::from_str::<Option<RawConfig>>(text)?.unwrap_or_default()
        };
        let (Some(original), Some(modified)) = (raw.original, raw.modified) else {
            return Err(ConfigError::MissingRoots);
        };
        let out = raw.output.unwrap_or_default();
        let flt = raw.filter.unwrap_or_default();

        let extensions = flt
            .extensions
            .filter(|exts| !exts.is_empty())
            .map(|exts| exts.iter().map(|e| normalize_extension(e)).collect());

        Ok(Self {
            config_path: None,
            original: resolve_path(config_dir, &original),
            modified: resolve_path(config_dir, &modified),
            html: out.html,
            html_path: resolve_path(config_dir, &out.html_path),
            color: out.color,
            show_content: out.show_content,
            context_lines: out.context_lines,
            language: out.language,
            normalize_eol: out.normalize_eol,
            ignore_dirs: flt.ignore_dirs.into_iter().collect(),
            ignore_files: flt.ignore_files,
            extensions,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let dir = abs.parent().map(Path::to_path_buf).unwrap_or_default();

        let mut cfg = Self::from_yaml(&text, &dir)?;
        cfg.config_path = Some(abs);
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, dir) in [("Original", &self.original), ("Modified", &self.modified)] {
            if !dir.exists() {
                return Err(ConfigError::MissingDir {
                    label,
                    path: dir.clone(),
                });
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir.clone()));
            }
        }
        self.file_filter().map(|_| ())
    }

    pub fn file_filter(&self) -> Result<FileFilter, ConfigError> {
        FileFilter::new(self.ignore_dirs.iter().cloned(), &self.ignore_files, self.extensions.as_ref())
    }

    pub fn compare_options(&self) -> Result<CompareOptions, ConfigError> {
        Ok(CompareOptions {
            filter: self.file_filter()?,
            show_content: self.show_content,
            context_lines: self.context_lines,
            normalize_eol: self.normalize_eol,
        })
    }
}

pub const INIT_CONFIG: &str = r#"# dirdiff configuration
# Paths can be absolute or relative to this file.

# -- Required --------------------------------------------------------
original: ./project-original
modified: ./project-modified

# -- Output ----------------------------------------------------------
output:
  # Generate an HTML report in addition to the terminal report
  html: true
  html_path: ./diff-report.html

  # Coloured terminal output
  color: true

  # Show line diffs (false = file list only)
  show_content: true

  # Unchanged lines shown around each change
  context_lines: 3

  # Report language: en | de
  language: en

  # Treat CRLF and LF as the same line ending when diffing
  normalize_eol: true

# -- Filter ----------------------------------------------------------
filter:
  # Directory names that are skipped wherever they appear
  ignore_dirs:
    - node_modules
    - .next
    - dist
    - build
    - .git
    - __pycache__
    - .cache
    - .turbo
    - target
    - out
    - .idea
    - .vscode

  # File name globs to skip
  ignore_files:
    # - "*.log"
    - ".DS_Store"
    - "Thumbs.db"
    - "*.pyc"

  # Only compare these file types (leave out to compare everything)
  # extensions:
  #   - .ts
  #   - .tsx
  #   - .rs
"#;

/// Writes the example configuration to `path`.
pub fn write_init_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    fs::write(path, INIT_CONFIG).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
