//
// lib.rs
// dirdiff
//
// Library entry: the comparison engine (collector, classifier, line differ) and the report sinks that render its result.
//
// Thales Matheus Mendonça Santos - November 2025
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod classify;
pub mod cli;
pub mod config;
pub mod diff;
pub mod language;
pub mod logging;
pub mod model;
pub mod report;
pub mod scanner;
pub mod textdiff;
pub mod utils;

pub use classify::{classify, Classification};
pub use cli::{build_config, Args};
pub use config::{Config, ConfigError};
pub use diff::{compare_directories, CompareOptions};
pub use model::{ComparisonResult, DiffStatus, FileDiffEntry, SizeInfo};
pub use scanner::{collect_files, FileFilter, FileMap};
pub use textdiff::{diff_lines, ContentDiff, Hunk};
