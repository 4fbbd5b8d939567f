//! Cross-platform path utilities for npmtool

use std::path::Path;

/// Convert a path to a string with forward slashes.
///
/// Glob patterns are matched against this form so that the same pattern
/// works on every platform.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Final component of a command path, or the command itself when it has none
pub fn command_basename(command: &str) -> String {
    Path::new(command)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| command.to_string())
}
