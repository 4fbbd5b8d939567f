//! Command set resolution
//!
//! Expands requested command-set names into one ordered list of command
//! strings. Lists are concatenated in request order and then deduplicated by
//! exact string equality, keeping the first occurrence.

use crate::config::Config;
use crate::error::{NpmtoolError, Result};

/// Resolve `names` against the configured command sets.
///
/// A single unknown name fails the whole resolution; `config_name` is only
/// used to word the error.
pub fn resolve_command_sets<S: AsRef<str>>(
    config: &Config,
    names: &[S],
    config_name: &str,
) -> Result<Vec<String>> {
    let mut resolved: Vec<String> = Vec::new();

    for name in names {
        let name = name.as_ref();
        let set = config
            .commands
            .get(name)
            .ok_or_else(|| NpmtoolError::CommandSetNotFound {
                name: name.to_string(),
                config: config_name.to_string(),
            })?;

        for command in &set.run {
            if !resolved.contains(command) {
                resolved.push(command.clone());
            }
        }
    }

    Ok(resolved)
}
