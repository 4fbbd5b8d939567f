//! Built-in and local scripts
//!
//! A script receives the package it runs against, the resolved arguments,
//! the shell capability and its configured parameters, and hands back
//! exactly one [`Outcome`].
//!
//! Built-in scripts are looked up by lower-cased name:
//! - `echo`: reports its arguments and parameters
//! - `git-status`: fails when the package working tree is not clean
//! - `linkdeps`: `npm link`s the package's local dependencies
//! - `checkpackagejson`: fails when the manifest contains `params.nogrep`
//! - `package-nogrep`: fails when the manifest contains one of the arguments

pub mod echo;
pub mod git_status;
pub mod link_deps;
pub mod local;
pub mod nogrep;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::{Outcome, Package};
use crate::engine::Shell;

pub use local::{LocalScript, is_local_script};

/// Everything a script gets for one invocation
pub struct Invocation<'a> {
    pub package: &'a Package,
    pub args: &'a [String],
    pub shell: &'a dyn Shell,
    /// Parameters configured under the script's name, `{}` when none
    pub params: &'a Value,
}

/// A command implementation invoked in-process
pub trait Script: Send + Sync {
    fn run(&self, invocation: &Invocation<'_>) -> Outcome;
}

/// Registry of built-in scripts, keyed by lower-cased name
#[derive(Clone, Default)]
pub struct ScriptRegistry {
    scripts: BTreeMap<String, Arc<dyn Script>>,
}

impl ScriptRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every script shipped with npmtool
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("echo", echo::Echo);
        registry.register("git-status", git_status::GitStatus);
        registry.register("linkdeps", link_deps::LinkDeps);
        registry.register("checkpackagejson", nogrep::CheckPackageJson);
        registry.register("package-nogrep", nogrep::PackageNogrep);
        registry
    }

    pub fn register(&mut self, name: &str, script: impl Script + 'static) {
        self.scripts.insert(name.to_lowercase(), Arc::new(script));
    }

    /// Look up a script by command name, ignoring case
    pub fn get(&self, name: &str) -> Option<Arc<dyn Script>> {
        self.scripts.get(&name.to_lowercase()).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_registered() {
        let registry = ScriptRegistry::with_builtins();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "checkpackagejson",
                "echo",
                "git-status",
                "linkdeps",
                "package-nogrep"
            ]
        );
    }

    #[test]
    fn test_lookup_ignores_case() {
        let registry = ScriptRegistry::with_builtins();
        assert!(registry.get("linkDeps").is_some());
        assert!(registry.get("checkPackageJson").is_some());
        assert!(registry.get("npm").is_none());
    }
}
