//! Workspace handling for npmtool
//!
//! This module handles:
//! - Locating the workspace root
//! - Discovering packages by glob pattern and reading their manifests
//! - Inspecting package folders with git
//!
//! ## Workspace Structure
//!
//! ```text
//! <root>/
//! ├── npmtool.json          # Run configuration (optional)
//! ├── <script>              # Optional local scripts / executables
//! ├── package-a/
//! │   └── package.json
//! └── package-b/
//!     └── package.json
//! ```

pub mod discovery;
pub mod git;
pub mod manifest;

use std::path::{Path, PathBuf};

use crate::error::{NpmtoolError, Result};

pub use discovery::{Discovery, discover_packages};

/// Resolve the workspace root from the CLI argument or current directory
pub fn resolve_root(workspace: Option<&Path>) -> Result<PathBuf> {
    let path = match workspace {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().map_err(|e| NpmtoolError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?,
    };

    if !path.is_dir() {
        return Err(NpmtoolError::WorkspaceNotFound {
            path: path.display().to_string(),
        });
    }

    dunce::canonicalize(&path).map_err(|_| NpmtoolError::WorkspaceNotFound {
        path: path.display().to_string(),
    })
}
