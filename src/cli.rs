use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError, DEFAULT_CONFIG_NAME};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare two project folders recursively", long_about = None)]
pub struct Args {
    /// YAML configuration file
    #[arg(default_value = DEFAULT_CONFIG_NAME)]
    pub config: PathBuf,

    /// Write an example configuration and exit
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,

    /// Write the HTML report to this path (implies html: true)
    #[arg(long, value_name = "PATH", conflicts_with = "no_html")]
    pub html: Option<PathBuf>,

    /// Skip the HTML report even if the config enables it
    #[arg(long)]
    pub no_html: bool,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,

    /// List changed files only, without line diffs
    #[arg(long)]
    pub no_content: bool,

    /// Unchanged lines shown around each change
    #[arg(short = 'C', long, value_name = "N")]
    pub context: Option<usize>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Loads the config named on the command line and applies flag overrides.
pub fn build_config(args: &Args) -> Result<Config, ConfigError> {
    let mut cfg = Config::load(&args.config)?;

    if let Some(path) = &args.html {
        cfg.html = true;
        cfg.html_path = path.clone();
    }
    if args.no_html {
        cfg.html = false;
    }
    if args.no_color {
        cfg.color = false;
    }
    if args.no_content {
        cfg.show_content = false;
    }
    if let Some(n) = args.context {
        cfg.context_lines = n;
    }

    cfg.validate()?;
    Ok(cfg)
}
