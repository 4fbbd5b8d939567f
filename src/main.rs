//! npmtool - multi-package workspace command runner
//!
//! Discovers the packages of a workspace, resolves which of them depend on
//! each other and runs named command sets against every package, one step
//! at a time, reporting a per-package summary at the end.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod domain;
mod engine;
mod error;
mod operations;
mod path_utils;
mod progress;
mod resolver;
mod scripts;
mod ui;
mod workspace;

use cli::Cli;

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "NPMTOOL_LOG";

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.completions.clone() {
        Some(shell) => commands::completions::run(&shell).map(|()| 0),
        None => commands::run::run(cli),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
