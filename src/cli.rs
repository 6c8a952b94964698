use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "upload-guard")]
#[command(author, version, about = "Pre-upload guard - check pending commits before review")]
#[command(long_about = "Runs commit-message and overlay policy checks against pending commits.\n\n\
    Exit codes:\n  \
    0 - All checks passed\n  \
    1 - Check failures found\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading the repository configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run checks against one or more commits
    Check(CheckArgs),

    /// List the registered checks in execution order
    Checks,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Repository to check (any path inside it)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Commits to check (revision expressions; can be given multiple times)
    #[arg(long, default_value = "HEAD")]
    pub commit: Vec<String>,

    /// Project name used by overlay policy tables (default: repository
    /// directory name)
    #[arg(long)]
    pub project: Option<String>,

    /// Run only the named checks (can be given multiple times)
    #[arg(long)]
    pub check: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
