//! Dispatch policy
//!
//! Decides how a command is executed, in this order of precedence:
//! 1. a registered built-in script
//! 2. a local script in the workspace root
//! 3. any other file in the workspace root, run as an executable
//! 4. a bare command looked up on the executable search path

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::Outcome;
use crate::path_utils;
use crate::scripts::{Invocation, LocalScript, Script, ScriptRegistry, is_local_script};

/// Execution strategy chosen for one command
#[derive(Clone)]
pub enum Dispatch {
    BuiltIn {
        name: String,
        script: Arc<dyn Script>,
    },
    LocalScript(PathBuf),
    LocalExecutable(PathBuf),
    ShellCommand(String),
}

impl Dispatch {
    /// Choose the strategy for `command` from registry and filesystem state
    pub fn resolve(command: &str, root: &Path, registry: &ScriptRegistry) -> Self {
        if let Some(script) = registry.get(command) {
            return Dispatch::BuiltIn {
                name: command.to_string(),
                script,
            };
        }

        let local = root.join(command);
        if is_local_script(&local) {
            Dispatch::LocalScript(local)
        } else if local.is_file() {
            Dispatch::LocalExecutable(local)
        } else {
            Dispatch::ShellCommand(command.to_string())
        }
    }

    /// Command identity used in outcome entries
    pub fn identity(&self) -> String {
        match self {
            Dispatch::BuiltIn { name, .. } | Dispatch::ShellCommand(name) => name.clone(),
            Dispatch::LocalScript(path) | Dispatch::LocalExecutable(path) => {
                path_utils::command_basename(&path.to_string_lossy())
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Dispatch::BuiltIn { .. } => "built-in script",
            Dispatch::LocalScript(_) => "local script",
            Dispatch::LocalExecutable(_) => "local executable",
            Dispatch::ShellCommand(_) => "shell command",
        }
    }

    /// Run the command for one package
    pub fn invoke(&self, invocation: &Invocation<'_>) -> Outcome {
        match self {
            Dispatch::BuiltIn { script, .. } => script.run(invocation),
            Dispatch::LocalScript(path) => LocalScript::new(path.clone()).run(invocation),
            Dispatch::LocalExecutable(path) => invocation
                .shell
                .run(invocation.package, &path.to_string_lossy(), invocation.args)
                .into(),
            Dispatch::ShellCommand(command) => invocation
                .shell
                .run(invocation.package, command, invocation.args)
                .into(),
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::BuiltIn { name, .. } => f.debug_tuple("BuiltIn").field(name).finish(),
            Dispatch::LocalScript(path) => f.debug_tuple("LocalScript").field(path).finish(),
            Dispatch::LocalExecutable(path) => {
                f.debug_tuple("LocalExecutable").field(path).finish()
            }
            Dispatch::ShellCommand(command) => {
                f.debug_tuple("ShellCommand").field(command).finish()
            }
        }
    }
}
