//! Git inspection of package folders
//!
//! Only folders that carry their own `.git` entry are treated as
//! repositories; a package nested inside an enclosing repository has no
//! branch of its own.

use std::path::Path;

use git2::{BranchType, ErrorCode, Repository, Status, StatusOptions};
use tracing::debug;

use crate::error::Result;

/// Whether `folder` is the root of its own git repository
pub fn is_git_root(folder: &Path) -> bool {
    let found = folder.join(".git").exists();
    debug!(
        "Checking for {}/.git: {}",
        folder.display(),
        if found { "Found" } else { "Not Found" }
    );
    found
}

/// Current branch name, or `None` when not a repository or HEAD is detached
pub fn current_branch(folder: &Path) -> Option<String> {
    if !is_git_root(folder) {
        return None;
    }

    let repo = Repository::open(folder).ok()?;
    match repo.head() {
        Ok(head) if head.is_branch() => head.shorthand().map(str::to_string),
        Ok(_) => None,
        // Fresh repository without commits: HEAD still names a branch
        Err(e) if e.code() == ErrorCode::UnbornBranch => repo
            .find_reference("HEAD")
            .ok()?
            .symbolic_target()
            .and_then(|t| t.strip_prefix("refs/heads/"))
            .map(str::to_string),
        Err(_) => None,
    }
}

/// Labels describing why a working tree is not clean, in a fixed order
pub fn status_flags(folder: &Path) -> Result<Vec<&'static str>> {
    let repo = Repository::open(folder)?;
    let mut flags = Vec::new();

    let (ahead, behind) = ahead_behind(&repo).unwrap_or((0, 0));
    if ahead > 0 {
        flags.push("Ahead");
    }
    if behind > 0 {
        flags.push("Behind");
    }

    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .include_ignored(false)
        .renames_head_to_index(true);
    let statuses = repo.statuses(Some(&mut options))?;

    let mut combined = Status::empty();
    for entry in statuses.iter() {
        combined |= entry.status();
    }

    let checks: [(&'static str, Status); 6] = [
        ("Not Added", Status::WT_NEW),
        ("Conflict", Status::CONFLICTED),
        ("Created", Status::INDEX_NEW),
        ("Deleted", Status::INDEX_DELETED | Status::WT_DELETED),
        ("Modified", Status::INDEX_MODIFIED | Status::WT_MODIFIED),
        ("Renamed", Status::INDEX_RENAMED | Status::WT_RENAMED),
    ];
    for (label, mask) in checks {
        if combined.intersects(mask) {
            flags.push(label);
        }
    }

    Ok(flags)
}

/// Commits ahead of and behind the upstream of the current branch
fn ahead_behind(repo: &Repository) -> Option<(usize, usize)> {
    let head = repo.head().ok()?;
    let name = head.shorthand()?;
    let local = head.target()?;
    let branch = repo.find_branch(name, BranchType::Local).ok()?;
    let upstream = branch.upstream().ok()?.get().target()?;
    repo.graph_ahead_behind(local, upstream).ok()
}
