//! Command specifications
//!
//! A command string such as `npm run build --if-present` becomes a
//! [`CommandSpec`]: the original string as display name, the command and an
//! argument template resolved per package.

use std::fmt;
use std::sync::Arc;

use crate::domain::Package;

/// Per-package argument function; `None` skips the package for the step
pub type ArgFn = dyn Fn(&Package) -> Option<Vec<String>> + Send + Sync;

/// Arguments of a command before they are resolved for one package
#[derive(Clone)]
pub enum ArgTemplate {
    List(Vec<String>),
    /// A single argument, treated as a one-element list
    Single(String),
    PerPackage(Arc<ArgFn>),
}

impl ArgTemplate {
    /// Resolve arguments for `package`, or `None` when it is to be skipped
    pub fn resolve(&self, package: &Package) -> Option<Vec<String>> {
        match self {
            ArgTemplate::List(args) => Some(args.clone()),
            ArgTemplate::Single(arg) => Some(vec![arg.clone()]),
            ArgTemplate::PerPackage(f) => f(package),
        }
    }
}

impl fmt::Debug for ArgTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgTemplate::List(args) => f.debug_tuple("List").field(args).finish(),
            ArgTemplate::Single(arg) => f.debug_tuple("Single").field(arg).finish(),
            ArgTemplate::PerPackage(_) => f.write_str("PerPackage(..)"),
        }
    }
}

/// One step of a run
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// The command string as configured
    pub name: String,
    pub cmd: String,
    pub args: ArgTemplate,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, cmd: impl Into<String>, args: ArgTemplate) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            args,
        }
    }

    /// Parse a configured command string.
    ///
    /// Returns `None` for blank strings and for disabled entries starting
    /// with `#`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let mut parts = trimmed.split_whitespace().map(str::to_string);
        let cmd = parts.next()?;
        Some(Self::new(line, cmd, ArgTemplate::List(parts.collect())))
    }
}

/// Parse an ordered command list, dropping disabled entries
pub fn parse_commands<S: AsRef<str>>(lines: &[S]) -> Vec<CommandSpec> {
    lines
        .iter()
        .filter_map(|line| CommandSpec::parse(line.as_ref()))
        .collect()
}
