//! Configuration file handling for npmtool
//!
//! This module contains data structures for `npmtool.json` (or an equivalent
//! YAML file): the discovery pattern, named command sets, per-script
//! parameters and branch colors.

pub mod command_set;
pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NpmtoolError, Result};

// Re-export commonly used types
pub use command_set::resolve_command_sets;
pub use loader::{CONFIG_FILE, load_config};

/// Default discovery pattern: every immediate child of the workspace root
pub const DEFAULT_PATTERN: &str = "*";

/// Command set requested when none is named on the command line
pub const DEFAULT_COMMAND_SET: &str = "default";

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Glob selecting package folders relative to the workspace root
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Named, ordered command sets
    #[serde(default)]
    pub commands: BTreeMap<String, CommandSet>,

    /// Opaque parameters handed to scripts, keyed by script name
    #[serde(default)]
    pub params: BTreeMap<String, Value>,

    /// Display settings per branch name
    #[serde(default)]
    pub branches: BTreeMap<String, BranchConfig>,

    /// Treat an aggregate warning status as a failed run
    #[serde(default)]
    pub fail_on_warnings: bool,

    /// Upper bound on packages dispatched concurrently within a step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl Default for Config {
    /// Built-in configuration used when no config file exists
    fn default() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert(
            DEFAULT_COMMAND_SET.to_string(),
            CommandSet::new(Some("Run the test suite of every package"), ["npm test"]),
        );
        commands.insert(
            "test".to_string(),
            CommandSet::new(Some("Run the test suite of every package"), ["npm test"]),
        );
        commands.insert(
            "link".to_string(),
            CommandSet::new(
                Some("Link every package and its local dependencies"),
                ["npm link", "linkDeps"],
            ),
        );

        let mut branches = BTreeMap::new();
        branches.insert("master".to_string(), BranchConfig::colored("red"));
        branches.insert("develop".to_string(), BranchConfig::colored("yellow"));

        Self {
            pattern: default_pattern(),
            commands,
            params: BTreeMap::new(),
            branches,
            fail_on_warnings: false,
            jobs: None,
        }
    }
}

impl Config {
    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.pattern.trim().is_empty() {
            return Err(NpmtoolError::ConfigInvalid {
                message: "pattern must not be empty".to_string(),
            });
        }
        if self.jobs == Some(0) {
            return Err(NpmtoolError::ConfigInvalid {
                message: "jobs must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parameters for a script, or an empty object when none are configured
    pub fn params_for(&self, script: &str) -> Value {
        self.params
            .get(script)
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    /// Configured color name for a branch
    pub fn branch_color(&self, branch: &str) -> Option<&str> {
        self.branches
            .get(branch)
            .and_then(|b| b.color.as_deref())
    }
}

/// A named command set: an ordered list of command strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CommandSetEntry")]
pub struct CommandSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub run: Vec<String>,
}

impl CommandSet {
    pub fn new<I, S>(description: Option<&str>, run: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: description.map(str::to_string),
            run: run.into_iter().map(Into::into).collect(),
        }
    }
}

/// On-disk forms of a command set: a bare list, or a table with `run`
#[derive(Deserialize)]
#[serde(untagged)]
enum CommandSetEntry {
    Short(Vec<String>),
    Full {
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        run: Vec<String>,
    },
}

impl From<CommandSetEntry> for CommandSet {
    fn from(entry: CommandSetEntry) -> Self {
        match entry {
            CommandSetEntry::Short(run) => Self {
                description: None,
                run,
            },
            CommandSetEntry::Full { description, run } => Self { description, run },
        }
    }
}

/// Display settings for one branch name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchConfig {
    #[serde(default)]
    pub color: Option<String>,
}

impl BranchConfig {
    fn colored(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
        }
    }
}
