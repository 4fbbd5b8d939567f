//! Shared context for a run
//!
//! `RunContext` owns everything a run needs: the workspace root, the loaded
//! configuration, the script registry and the shell capability. It is
//! created once per run and passed by reference to every step.

use std::path::{Path, PathBuf};
use std::thread;

use crate::config::Config;
use crate::engine::shell::{Shell, SystemShell};
use crate::scripts::ScriptRegistry;

/// Environment variable bounding concurrent package dispatch
pub const JOBS_ENV: &str = "NPMTOOL_JOBS";

/// Shared context for a run
pub struct RunContext {
    pub root: PathBuf,
    pub config: Config,
    pub registry: ScriptRegistry,
    pub shell: Box<dyn Shell>,
    /// Upper bound on packages dispatched concurrently within a step
    pub jobs: usize,
    pub show_progress: bool,
}

impl RunContext {
    /// Create a context with the built-in scripts and the system shell
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        let jobs = default_jobs(&config);
        Self {
            root: root.into(),
            config,
            registry: ScriptRegistry::with_builtins(),
            shell: Box::new(SystemShell),
            jobs,
            show_progress: true,
        }
    }

    pub fn with_registry(mut self, registry: ScriptRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_shell(mut self, shell: impl Shell + 'static) -> Self {
        self.shell = Box::new(shell);
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Worker bound from the environment, then the config, then the machine
fn default_jobs(config: &Config) -> usize {
    let from_env = std::env::var(JOBS_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0);

    from_env
        .or(config.jobs)
        .unwrap_or_else(|| thread::available_parallelism().map_or(4, |n| n.get()))
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_jobs_from_env() {
        // SAFETY: serialized with every other test touching NPMTOOL_JOBS
        unsafe { std::env::set_var(JOBS_ENV, "3") };
        let ctx = RunContext::new("/ws", Config::default());
        unsafe { std::env::remove_var(JOBS_ENV) };
        assert_eq!(ctx.jobs, 3);
    }

    #[test]
    #[serial]
    fn test_jobs_from_config() {
        unsafe { std::env::remove_var(JOBS_ENV) };
        let config = Config {
            jobs: Some(2),
            ..Config::default()
        };
        assert_eq!(RunContext::new("/ws", config).jobs, 2);
    }

    #[test]
    #[serial]
    fn test_invalid_env_is_ignored() {
        unsafe { std::env::set_var(JOBS_ENV, "zero") };
        let config = Config {
            jobs: Some(5),
            ..Config::default()
        };
        let ctx = RunContext::new("/ws", config);
        unsafe { std::env::remove_var(JOBS_ENV) };
        assert_eq!(ctx.jobs, 5);
    }

    #[test]
    fn test_with_jobs_is_at_least_one() {
        let ctx = RunContext::new("/ws", Config::default()).with_jobs(0);
        assert_eq!(ctx.jobs, 1);
    }
}
