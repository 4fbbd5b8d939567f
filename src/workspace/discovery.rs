//! Package discovery
//!
//! Finds the folders under the workspace root that match the configured glob
//! and contain a manifest, then reads every manifest into a [`Package`].

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};
use wax::{CandidatePath, Glob, Pattern};

use crate::domain::Package;
use crate::error::{NpmtoolError, Result};
use crate::path_utils;
use crate::workspace::git;
use crate::workspace::manifest::{MANIFEST_FILE, read_package};

/// Folders never descended into while matching patterns
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Result of discovering the packages of a workspace
#[derive(Debug, Default)]
pub struct Discovery {
    /// Packages in folder order, including ones whose manifest failed to parse
    pub packages: Vec<Package>,
    /// Number of manifests that could not be parsed
    pub failures: usize,
}

/// Folders under `root` whose relative path matches `pattern`, sorted by path
pub fn find_package_folders(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = pattern.trim_start_matches("./");
    let glob = Glob::new(pattern).map_err(|e| NpmtoolError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut folders = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(pattern_depth(pattern))
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

    for entry in walker {
        let Ok(entry) = entry else {
            continue;
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = path_utils::to_forward_slashes(relative);
        if glob.matched(&CandidatePath::from(relative.as_str())).is_some() {
            folders.push(entry.into_path());
        }
    }

    folders.sort();
    Ok(folders)
}

/// Directory depth a pattern can reach; unbounded for recursive wildcards
fn pattern_depth(pattern: &str) -> usize {
    if pattern.contains("**") {
        usize::MAX
    } else {
        pattern.split('/').filter(|c| !c.is_empty()).count().max(1)
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Discover every package in the workspace.
///
/// A manifest that fails to parse does not stop discovery; the failure is
/// recorded on that package and counted in [`Discovery::failures`].
pub fn discover_packages(root: &Path, pattern: &str) -> Result<Discovery> {
    let manifests: Vec<PathBuf> = find_package_folders(root, pattern)?
        .into_iter()
        .map(|folder| folder.join(MANIFEST_FILE))
        .filter(|file| file.is_file())
        .collect();

    debug!(
        "Found {} package candidates matching {}",
        manifests.len(),
        pattern
    );

    let mut discovery = Discovery::default();
    for file in &manifests {
        let mut package = read_package(file, root);
        if package.parsed {
            package.branch = git::current_branch(&package.folder);
        } else {
            discovery.failures += 1;
        }
        discovery.packages.push(package);
    }

    if discovery.failures > 0 {
        warn!(
            "{} of {} manifests could not be parsed",
            discovery.failures,
            manifests.len()
        );
    }

    Ok(discovery)
}
