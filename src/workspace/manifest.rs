//! Package manifest (`package.json`) parsing

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::domain::Package;

/// Manifest filename looked up in every candidate folder
pub const MANIFEST_FILE: &str = "package.json";

/// Fields of `package.json` that npmtool consumes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub dev_dependencies: Option<BTreeMap<String, Value>>,
    /// Opt-out flag; `Some(Value::Null)` when written as `null`
    #[serde(default, deserialize_with = "present")]
    pub npmtool: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Manifest {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// A package opts out with a present but falsy `npmtool` flag
    pub fn is_ignored(&self) -> bool {
        self.npmtool.as_ref().is_some_and(is_falsy)
    }

    /// Regular then development dependency names, possibly overlapping
    pub fn dependency_names(&self) -> impl Iterator<Item = &String> {
        self.dependencies
            .iter()
            .chain(self.dev_dependencies.iter())
            .flat_map(BTreeMap::keys)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Read a manifest file into a package record.
///
/// Parse failures do not propagate: the record keeps its folder-name
/// placeholder, gets an error entry and stays `parsed == false`.
pub fn read_package(file: &Path, workspace_root: &Path) -> Package {
    let mut package = Package::from_manifest_path(file, workspace_root);

    let manifest = fs::read_to_string(file)
        .map_err(|e| e.to_string())
        .and_then(|content| Manifest::from_json(&content).map_err(|e| e.to_string()));

    let manifest = match manifest {
        Ok(manifest) => manifest,
        Err(reason) => {
            debug!("Failed to read {}: {}", file.display(), reason);
            package.errors.push(format!("{MANIFEST_FILE} ({reason})"));
            return package;
        }
    };

    if let Some(name) = manifest.name.as_ref().filter(|n| !n.is_empty()) {
        package.name.clone_from(name);
    }
    package.version = manifest.version.clone().filter(|v| !v.is_empty());
    package.ignore = manifest.is_ignored();
    package.add_deps(manifest.dependency_names().cloned());
    package.parsed = true;

    debug!(
        "Read {} ({} dependencies{})",
        package.name,
        package.deps.len(),
        if package.ignore { ", ignored" } else { "" }
    );

    package
}
