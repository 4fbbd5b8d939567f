//! Common test utilities for npmtool integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new, empty test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create `<folder>/package.json` with the given name and dependencies
    pub fn add_package(&self, folder: &str, name: &str, dependencies: &[&str]) {
        let deps = dependencies
            .iter()
            .map(|d| format!("\"{d}\": \"*\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.write_file(
            &format!("{folder}/package.json"),
            &format!(r#"{{"name": "{name}", "version": "1.0.0", "dependencies": {{{deps}}}}}"#),
        );
    }

    /// Write `npmtool.json` in the workspace root
    pub fn write_config(&self, json: &str) {
        self.write_file("npmtool.json", json);
    }

    /// Write an executable file in the workspace root
    #[cfg(unix)]
    pub fn write_executable(&self, path: &str, content: &str) {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(path, content);
        let file_path = self.path.join(path);
        std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
    }
}
