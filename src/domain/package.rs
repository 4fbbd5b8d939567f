//! Package domain type
//!
//! A `Package` is created once per discovered manifest, enriched in place
//! (branch, local dependencies) and then mutated by every command step until
//! the final report.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::path_utils;

use super::outcome::{Outcome, Severity};

/// One discovered workspace package
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Manifest name; the folder name until the manifest has been read
    pub name: String,
    pub version: Option<String>,
    /// Absolute package folder
    pub folder: PathBuf,
    /// Workspace-relative folder, for display only
    pub rel_folder: String,
    /// Absolute path of the manifest file
    pub file: PathBuf,
    /// Declared dependency names (regular and dev), no duplicates
    pub deps: Vec<String>,
    /// Names of other discovered packages this one depends on
    pub local_deps: Vec<String>,
    pub branch: Option<String>,
    pub ignore: bool,
    /// False when the manifest could not be parsed
    pub parsed: bool,
    pub messages: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Package {
    /// Create a placeholder record for a manifest file that has not been read yet
    pub fn from_manifest_path(file: &Path, workspace_root: &Path) -> Self {
        let folder = file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| workspace_root.to_path_buf());
        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let relative = folder
            .strip_prefix(workspace_root)
            .map(path_utils::to_forward_slashes)
            .unwrap_or_else(|_| folder_name.clone());

        Self {
            name: folder_name,
            folder,
            rel_folder: format!("./{relative}"),
            file: file.to_path_buf(),
            ..Self::default()
        }
    }

    /// Add declared dependency names, skipping ones already present
    pub fn add_deps<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.deps.contains(&name) {
                self.deps.push(name);
            }
        }
    }

    /// Whether commands may be dispatched against this package
    pub fn is_runnable(&self) -> bool {
        self.parsed && !self.ignore
    }

    /// Record the outcome of `identity` (command plus arguments) on this package
    pub fn record(&mut self, identity: &str, outcome: Outcome) {
        match outcome {
            Outcome::Success(summary) => self
                .messages
                .push(entry(identity, summary.map(|s| s.to_string()))),
            Outcome::Warning(summary) => self
                .warnings
                .push(entry(identity, summary.map(|s| s.to_string()))),
            Outcome::Failure(message) => self.errors.push(entry(identity, Some(message))),
        }
    }

    /// Worst severity accumulated so far
    pub fn severity(&self) -> Severity {
        if !self.errors.is_empty() {
            Severity::Error
        } else if !self.warnings.is_empty() {
            Severity::Warning
        } else {
            Severity::Success
        }
    }
}

fn entry(identity: &str, detail: Option<String>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!("{identity} ({detail})"),
        _ => identity.to_string(),
    }
}
