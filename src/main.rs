use std::io;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use dirdiff::config::write_init_config;
use dirdiff::report::{HtmlReport, ReportContext, ReportSink, TerminalReport, Theme};
use dirdiff::{build_config, compare_directories, logging, Args};

fn run(args: &Args) -> Result<()> {
    if args.init {
        write_init_config(&args.config, args.force)?;
        println!("✓ '{}' created.", args.config.display());
        println!("  Adjust the paths and then run: dirdiff {}", args.config.display());
        return Ok(());
    }

    let cfg = build_config(args)?;
    let theme = Theme::new(cfg.color);

    eprintln!("Comparing folders...");
    if let Some(path) = &cfg.config_path {
        eprintln!("  Config:     {}", path.display());
    }
    if !cfg.ignore_dirs.is_empty() {
        let dirs: Vec<_> = cfg.ignore_dirs.iter().map(String::as_str).collect();
        eprintln!("  Ignoring:   {}", dirs.join(", "));
    }
    if !cfg.ignore_files.is_empty() {
        eprintln!("  Ign. Files: {}", cfg.ignore_files.join(", "));
    }
    if let Some(exts) = &cfg.extensions {
        let exts: Vec<_> = exts.iter().map(String::as_str).collect();
        eprintln!("  File Types: {}", exts.join(", "));
    }

    let opts = cfg.compare_options()?;
    let result = compare_directories(&cfg.original, &cfg.modified, &opts)?;

    let ctx = ReportContext {
        original: &cfg.original,
        modified: &cfg.modified,
        config_path: cfg.config_path.as_deref(),
        generated_at: Local::now(),
        labels: cfg.language.labels(),
    };

    TerminalReport::new(io::stdout().lock(), theme).emit(&result, &ctx)?;

    if cfg.html {
        let mut html = HtmlReport::new(&cfg.html_path);
        html.emit(&result, &ctx)?;
        println!("✓ HTML Report: {}", html.path().display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
