//! Execution engine
//!
//! Runs an ordered list of commands against every package. Steps are
//! strictly sequential: step *i + 1* starts only after every package has
//! finished step *i*. Within a step, packages are independent and are
//! dispatched concurrently, at most `RunContext::jobs` at a time.
//!
//! Each package is owned by exactly one worker during a step, so its
//! outcome lists are mutated without locking.

pub mod command;
pub mod context;
pub mod dispatch;
pub mod shell;

use std::thread;

use tracing::{debug, info};

use crate::domain::Package;
use crate::path_utils;
use crate::progress::StepProgress;
use crate::scripts::Invocation;

pub use command::{ArgTemplate, CommandSpec, parse_commands};
pub use context::RunContext;
pub use dispatch::Dispatch;
pub use shell::{Shell, ShellError, ShellResult, SystemShell};

/// Completion counts of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummary {
    pub completed: u64,
    pub total: u64,
}

/// Run every command, in order, against every package
pub fn run_steps(
    ctx: &RunContext,
    packages: &mut [Package],
    commands: &[CommandSpec],
) -> Vec<StepSummary> {
    commands
        .iter()
        .map(|command| run_step(ctx, packages, command))
        .collect()
}

/// Run one command against every package and wait for all of them
pub fn run_step(ctx: &RunContext, packages: &mut [Package], command: &CommandSpec) -> StepSummary {
    let dispatch = Dispatch::resolve(&command.cmd, ctx.root(), &ctx.registry);
    info!(
        "Running '{}' as {} on {} packages",
        command.name,
        dispatch.kind(),
        packages.len()
    );

    let params = ctx.config.params_for(&path_utils::command_basename(&command.cmd));
    let progress = StepProgress::new(packages.len(), &command.name, ctx.show_progress);
    let jobs = ctx.jobs.clamp(1, packages.len().max(1));

    let dispatch = &dispatch;
    let params = &params;
    let progress_ref = &progress;
    for chunk in packages.chunks_mut(jobs) {
        thread::scope(|scope| {
            for package in chunk.iter_mut() {
                scope.spawn(move || {
                    run_package(ctx, package, command, dispatch, params);
                    progress_ref.tick();
                });
            }
        });
    }

    progress.finish();
    StepSummary {
        completed: progress.completed(),
        total: progress.total(),
    }
}

fn run_package(
    ctx: &RunContext,
    package: &mut Package,
    command: &CommandSpec,
    dispatch: &Dispatch,
    params: &serde_json::Value,
) {
    if !package.is_runnable() {
        debug!("{}: not runnable, skipping '{}'", package.name, command.name);
        return;
    }

    let Some(args) = command.args.resolve(package) else {
        debug!("{}: skipped '{}'", package.name, command.name);
        return;
    };

    let identity = std::iter::once(dispatch.identity())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");

    let outcome = dispatch.invoke(&Invocation {
        package: &*package,
        args: &args,
        shell: ctx.shell.as_ref(),
        params,
    });
    debug!("{}: '{}' -> {:?}", package.name, identity, outcome.severity());

    package.record(&identity, outcome);
}
