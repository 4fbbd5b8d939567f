//! `git-status` script: fails when the package working tree is not clean

use crate::domain::Outcome;
use crate::scripts::{Invocation, Script};
use crate::workspace::git;

pub struct GitStatus;

impl Script for GitStatus {
    fn run(&self, invocation: &Invocation<'_>) -> Outcome {
        let folder = &invocation.package.folder;
        if !git::is_git_root(folder) {
            return Outcome::success("Not a GIT Repo");
        }

        match git::status_flags(folder) {
            Ok(flags) if flags.is_empty() => Outcome::success("Ok"),
            Ok(flags) => Outcome::failure(flags.join(", ")),
            Err(e) => Outcome::failure(format!("Status Not Available ({e})")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Package;
    use crate::engine::SystemShell;
    use serde_json::json;
    use tempfile::TempDir;

    fn run_in(folder: &std::path::Path) -> Outcome {
        let package = Package {
            folder: folder.to_path_buf(),
            ..Package::default()
        };
        let params = json!({});
        GitStatus.run(&Invocation {
            package: &package,
            args: &[],
            shell: &SystemShell,
            params: &params,
        })
    }

    #[test]
    fn test_not_a_repo_is_success() {
        let temp = TempDir::new().unwrap();
        assert_eq!(run_in(temp.path()), Outcome::success("Not a GIT Repo"));
    }

    #[test]
    fn test_untracked_file_fails() {
        let temp = TempDir::new().unwrap();
        git2::Repository::init(temp.path()).unwrap();
        std::fs::write(temp.path().join("new.txt"), "x").unwrap();
        assert_eq!(run_in(temp.path()), Outcome::failure("Not Added"));
    }
}
