//! Run operation
//!
//! Coordinates one run: package discovery, local dependency resolution and
//! sequential execution of the resolved command list.

use tracing::debug;

use crate::domain::Package;
use crate::engine::{RunContext, StepSummary, parse_commands, run_steps};
use crate::error::Result;
use crate::resolver::resolve_local_dependencies;
use crate::ui::RunStatus;
use crate::ui::report::aggregate_status;
use crate::workspace::{Discovery, discover_packages};

/// Result of a completed run
#[derive(Debug)]
pub struct RunOutput {
    pub packages: Vec<Package>,
    pub steps: Vec<StepSummary>,
    /// Manifests that could not be parsed
    pub discovery_failures: usize,
    pub status: RunStatus,
}

/// Discover the workspace and run `commands` against it
pub fn execute<S: AsRef<str>>(ctx: &RunContext, commands: &[S]) -> Result<RunOutput> {
    let pattern = &ctx.config.pattern;
    let Discovery {
        mut packages,
        failures,
    } = discover_packages(ctx.root(), pattern)?;
    println!("Found {} modules matching {}", packages.len(), pattern);

    debug!(
        "Resolving local dependencies for {} packages",
        packages.len()
    );
    resolve_local_dependencies(&mut packages);

    let specs = parse_commands(commands);
    let steps = run_steps(ctx, &mut packages, &specs);
    let status = aggregate_status(&packages);

    Ok(RunOutput {
        packages,
        steps,
        discovery_failures: failures,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        for (folder, manifest) in [
            ("app", r#"{"name":"app","dependencies":{"core":"*","left-pad":"1"}}"#),
            ("core", r#"{"name":"core","version":"2.0.0"}"#),
            ("legacy", r#"{"name":"legacy","npmtool":false}"#),
        ] {
            fs::create_dir_all(temp.path().join(folder)).unwrap();
            fs::write(temp.path().join(folder).join("package.json"), manifest).unwrap();
        }
        temp
    }

    fn context(temp: &TempDir) -> RunContext {
        RunContext::new(temp.path(), Config::default()).with_progress(false)
    }

    #[test]
    fn test_run_with_builtin_script() {
        let temp = workspace();
        let output = execute(&context(&temp), &["echo hi", "#disabled"]).unwrap();

        assert_eq!(output.steps.len(), 1);
        assert_eq!(output.status, Severity::Success);
        let names: Vec<_> = output.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["app", "core", "legacy"]);

        assert_eq!(output.packages[0].local_deps, vec!["core"]);
        assert_eq!(output.packages[0].messages.len(), 1);
        assert!(output.packages[0].messages[0].starts_with("echo hi ("));
        assert!(output.packages[2].messages.is_empty());
    }

    #[test]
    fn test_run_records_script_failure() {
        let temp = workspace();
        let output = execute(&context(&temp), &["package-nogrep core"]).unwrap();

        assert_eq!(output.status, Severity::Error);
        assert_eq!(
            output.packages[0].errors,
            vec!["package-nogrep core (Grep matched core)"]
        );
        assert!(output.packages[1].errors.len() == 1);
    }

    #[test]
    fn test_unparseable_manifest_is_reported_not_run() {
        let temp = workspace();
        fs::create_dir_all(temp.path().join("broken")).unwrap();
        fs::write(temp.path().join("broken/package.json"), "{").unwrap();

        let output = execute(&context(&temp), &["echo"]).unwrap();
        assert_eq!(output.discovery_failures, 1);

        let broken = output
            .packages
            .iter()
            .find(|p| p.rel_folder == "./broken")
            .unwrap();
        assert!(broken.messages.is_empty());
        assert_eq!(broken.errors.len(), 1);
        assert_eq!(output.status, Severity::Error);
    }
}
