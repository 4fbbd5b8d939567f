//! Run command
//!
//! Resolves the workspace and configuration, applies command line overrides
//! and hands the selected command sets to the run operation.

use std::path::{Path, PathBuf};

use console::Style;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{CONFIG_FILE, Config, DEFAULT_COMMAND_SET, load_config, resolve_command_sets};
use crate::engine::RunContext;
use crate::error::{NpmtoolError, Result};
use crate::operations::run;
use crate::scripts::ScriptRegistry;
use crate::ui::{self, exit_code, print_report, print_usage};
use crate::workspace::resolve_root;

/// Run the selected command sets and return the process exit code
pub fn run(cli: Cli) -> Result<i32> {
    let root = resolve_root(cli.workspace.as_deref())?;
    let config_path = config_path(&root, cli.config.as_deref());
    if cli.config.is_some() && !config_path.exists() {
        return Err(NpmtoolError::ConfigNotFound {
            path: config_path.display().to_string(),
        });
    }

    let mut config = load_config(&config_path)?;
    apply_overrides(&mut config, &cli);

    if cli.list {
        ui::usage::print_command_sets(&config);
        ui::usage::print_builtin_scripts(ScriptRegistry::with_builtins().names());
        return Ok(0);
    }

    let sets = if cli.sets.is_empty() {
        vec![DEFAULT_COMMAND_SET.to_string()]
    } else {
        cli.sets.clone()
    };

    let config_name = config_display_name(&config_path);
    let commands = match resolve_command_sets(&config, &sets, &config_name) {
        Ok(commands) => commands,
        Err(err @ NpmtoolError::CommandSetNotFound { .. }) => {
            println!("{}", Style::new().red().bold().apply_to(format!("{err}.")));
            println!();
            print_usage(&config);
            return Ok(1);
        }
        Err(err) => return Err(err),
    };
    debug!("Resolved command list: {:?}", commands);

    let mut ctx = RunContext::new(root, config).with_progress(!cli.no_progress);
    if let Some(jobs) = cli.jobs {
        ctx = ctx.with_jobs(usize::try_from(jobs).unwrap_or(usize::MAX));
    }

    let output = run::execute(&ctx, &commands)?;
    debug!(
        "Ran {} steps, {} unreadable manifests",
        output.steps.len(),
        output.discovery_failures
    );
    let status = print_report(&output.packages, &ctx.config);
    Ok(exit_code(status, ctx.config.fail_on_warnings))
}

/// Config file location; relative `--config` paths resolve against `root`
fn config_path(root: &Path, config: Option<&Path>) -> PathBuf {
    match config {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => root.join(path),
        None => root.join(CONFIG_FILE),
    }
}

fn config_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(pattern) = &cli.pattern {
        config.pattern = pattern.clone();
    }
    if cli.fail_on_warnings {
        config.fail_on_warnings = true;
    }
}
