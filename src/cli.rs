//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// npmtool - run command sets across a multi-package workspace
///
/// Discovers every package in the workspace, links up their local
/// dependencies and runs the commands of the selected sets against each
/// package.
#[derive(Parser, Debug)]
#[command(
    name = "npmtool",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Run command sets across every package of a workspace",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  npmtool\n    \
                  npmtool test\n    \
                  npmtool link test --jobs 2\n    \
                  npmtool --pattern 'packages/*' --fail-on-warnings\n    \
                  npmtool --list"
)]
pub struct Cli {
    /// Command sets to run, in order (defaults to "default")
    #[arg(value_name = "SET")]
    pub sets: Vec<String>,

    /// Workspace directory (defaults to current directory)
    #[arg(long, short = 'w')]
    pub workspace: Option<PathBuf>,

    /// Configuration file (relative paths resolve against the workspace)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Maximum number of packages processed concurrently within a step
    #[arg(long, short = 'j', value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// Override the package discovery pattern
    #[arg(long)]
    pub pattern: Option<String>,

    /// Exit with a non-zero status when any package has warnings
    #[arg(long)]
    pub fail_on_warnings: bool,

    /// Do not show progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// List the available command sets and exit
    #[arg(long, short = 'l')]
    pub list: bool,

    /// Print shell completions (bash, elvish, fish, powershell, zsh) and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<String>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
