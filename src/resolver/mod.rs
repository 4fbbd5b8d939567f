//! Local dependency resolution
//!
//! Annotates every package with the names of the other discovered packages
//! it declares a dependency on. Declared dependencies that are not part of
//! the workspace are left out.
//!
//! Packages are matched purely by name. When two folders declare the same
//! package name, a dependent records that name once per matching package.

use crate::domain::Package;

/// Recompute `local_deps` for every package.
///
/// The accumulator is cleared first, so running this twice yields the same
/// result. Packages whose manifest failed to parse are never targets.
pub fn resolve_local_dependencies(packages: &mut [Package]) {
    for package in packages.iter_mut() {
        package.local_deps.clear();
    }

    for target in 0..packages.len() {
        if !packages[target].parsed {
            continue;
        }
        let name = packages[target].name.clone();

        for (index, dependent) in packages.iter_mut().enumerate() {
            if index != target && dependent.deps.contains(&name) {
                dependent.local_deps.push(name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn package(name: &str, deps: &[&str]) -> Package {
        let mut p = Package::from_manifest_path(
            &Path::new("/ws").join(name).join("package.json"),
            Path::new("/ws"),
        );
        p.parsed = true;
        p.add_deps(deps.iter().copied());
        p
    }

    #[test]
    fn test_local_deps_only_contain_workspace_packages() {
        let mut packages = vec![
            package("app", &["core", "lodash"]),
            package("core", &["util"]),
            package("util", &[]),
        ];
        resolve_local_dependencies(&mut packages);

        assert_eq!(packages[0].local_deps, vec!["core"]);
        assert_eq!(packages[1].local_deps, vec!["util"]);
        assert!(packages[2].local_deps.is_empty());
    }

    #[test]
    fn test_independent_of_package_order() {
        let mut forward = vec![package("a", &["b"]), package("b", &["a"])];
        let mut reverse = vec![package("b", &["a"]), package("a", &["b"])];
        resolve_local_dependencies(&mut forward);
        resolve_local_dependencies(&mut reverse);

        assert_eq!(forward[0].local_deps, vec!["b"]);
        assert_eq!(forward[1].local_deps, vec!["a"]);
        assert_eq!(reverse[0].local_deps, vec!["a"]);
        assert_eq!(reverse[1].local_deps, vec!["b"]);
    }

    #[test]
    fn test_idempotent() {
        let mut packages = vec![package("app", &["core"]), package("core", &[])];
        resolve_local_dependencies(&mut packages);
        resolve_local_dependencies(&mut packages);
        assert_eq!(packages[0].local_deps, vec!["core"]);
    }

    #[test]
    fn test_self_dependency_is_ignored() {
        let mut packages = vec![package("loop", &["loop"])];
        resolve_local_dependencies(&mut packages);
        assert!(packages[0].local_deps.is_empty());
    }

    #[test]
    fn test_unparsed_package_is_not_a_target() {
        let mut broken = package("core", &[]);
        broken.parsed = false;
        let mut packages = vec![package("app", &["core"]), broken];
        resolve_local_dependencies(&mut packages);
        assert!(packages[0].local_deps.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_recorded_once_per_package() {
        let mut packages = vec![
            package("app", &["core"]),
            package("core", &[]),
            package("legacy-core", &[]),
        ];
        packages[2].name = "core".to_string();
        resolve_local_dependencies(&mut packages);

        assert_eq!(packages[0].local_deps, vec!["core", "core"]);
        assert!(packages[1].local_deps.is_empty());
        assert!(packages[2].local_deps.is_empty());
    }
}
