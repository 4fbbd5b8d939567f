//! Configuration file loading
//!
//! The config file is optional: when it does not exist the built-in
//! configuration is used. A file that exists but cannot be read or parsed
//! aborts the run.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{NpmtoolError, Result};

/// Default config filename, looked up in the workspace root
pub const CONFIG_FILE: &str = "npmtool.json";

/// Load the run configuration from `path`
pub fn load_config(path: &Path) -> Result<Config> {
    let default = Config::default();
    let note = format!(
        "running the built-in command sets ({})",
        builtin_summary(&default)
    );
    load_config_file(path, default, &note, |content| {
        if is_yaml(path) {
            Config::from_yaml(content)
        } else {
            Config::from_json(content)
        }
    })
}

/// `name = cmd, cmd` for every built-in set
fn builtin_summary(config: &Config) -> String {
    config
        .commands
        .iter()
        .map(|(name, set)| format!("{name} = {}", set.run.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

/// Generic helper to load a config file with default fallback
fn load_config_file<F, T>(path: &Path, default: T, fallback_note: &str, parser: F) -> Result<T>
where
    F: FnOnce(&str) -> Result<T>,
{
    if !path.exists() {
        warn!("No {} found, {}", path.display(), fallback_note);
        return Ok(default);
    }

    let content = fs::read_to_string(path).map_err(|e| NpmtoolError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let config = parser(&content).map_err(|e| match e {
        NpmtoolError::ConfigParseFailed { reason, .. } => NpmtoolError::ConfigParseFailed {
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })?;

    debug!("Config file {} loaded", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join(CONFIG_FILE)).unwrap();
        assert!(config.commands.contains_key("default"));
    }

    #[test]
    fn test_builtin_summary_names_every_set() {
        let summary = builtin_summary(&Config::default());
        assert_eq!(
            summary,
            "default = npm test; link = npm link, linkDeps; test = npm test"
        );
    }

    #[test]
    fn test_load_json_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "commands": { "ci": ["npm ci"] } }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.commands["ci"].run, vec!["npm ci"]);
    }

    #[test]
    fn test_load_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("npmtool.yaml");
        fs::write(&path, "commands:\n  ci:\n    - npm ci\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.commands["ci"].run, vec!["npm ci"]);
    }

    #[test]
    fn test_parse_failure_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        match load_config(&path) {
            Err(NpmtoolError::ConfigParseFailed { path: reported, .. }) => {
                assert!(reported.ends_with(CONFIG_FILE));
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }
}
