//! Error types and handling for npmtool
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only run-aborting conditions are represented here. Failures of a single
//! command against a single package are recorded on that package as an
//! [`Outcome`](crate::domain::Outcome) and never surface as an `Err`.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for npmtool operations
#[derive(Error, Diagnostic, Debug)]
pub enum NpmtoolError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(npmtool::config::not_found),
        help("Create an npmtool.json in the workspace root or pass --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(npmtool::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(npmtool::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(npmtool::config::invalid))]
    ConfigInvalid { message: String },

    // Command set errors
    #[error("Command set with name '{name}' not found in {config}")]
    #[diagnostic(
        code(npmtool::commands::set_not_found),
        help("Run 'npmtool --list' to see the available command sets")
    )]
    CommandSetNotFound { name: String, config: String },

    // Workspace errors
    #[error("Workspace not found at: {path}")]
    #[diagnostic(
        code(npmtool::workspace::not_found),
        help("Pass an existing directory with --workspace")
    )]
    WorkspaceNotFound { path: String },

    #[error("Invalid package pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(npmtool::workspace::invalid_pattern),
        help("Patterns are globs relative to the workspace root, e.g. '*' or 'packages/*'")
    )]
    InvalidPattern { pattern: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(npmtool::fs::io_error))]
    IoError { message: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(npmtool::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(npmtool::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },
}

impl From<std::io::Error> for NpmtoolError {
    fn from(err: std::io::Error) -> Self {
        NpmtoolError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for NpmtoolError {
    fn from(err: serde_yaml::Error) -> Self {
        NpmtoolError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NpmtoolError {
    fn from(err: serde_json::Error) -> Self {
        NpmtoolError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for NpmtoolError {
    fn from(err: git2::Error) -> Self {
        NpmtoolError::GitOperationFailed {
            message: err.message().to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, NpmtoolError>;
