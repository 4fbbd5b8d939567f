//! Shell invocation capability
//!
//! Spawns a subprocess in a package folder and captures its stdout and
//! stderr as one interleaved text blob. The working directory is passed to
//! each spawn, so concurrent invocations never share process state.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::{Mutex, PoisonError};
use std::thread;

use thiserror::Error;
use tracing::debug;

use crate::domain::{Outcome, Package};

/// Why a shell invocation did not succeed; every variant keeps the output
/// captured so far
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("command not found {command}")]
    NotFound { command: String, output: String },

    #[error("exit code {code}")]
    ExitCode { code: i32, output: String },

    #[error("terminated by signal")]
    Terminated { output: String },

    #[error("{message}")]
    Spawn { message: String, output: String },
}

impl ShellError {
    /// Output captured before the failure
    pub fn output(&self) -> &str {
        match self {
            ShellError::NotFound { output, .. }
            | ShellError::ExitCode { output, .. }
            | ShellError::Terminated { output }
            | ShellError::Spawn { output, .. } => output,
        }
    }
}

/// Captured output on success
pub type ShellResult = std::result::Result<String, ShellError>;

impl From<ShellResult> for Outcome {
    fn from(result: ShellResult) -> Self {
        match result {
            Ok(_) => Outcome::ok(),
            Err(e) => Outcome::failure(e.to_string()),
        }
    }
}

/// Capability handed to scripts for running external commands
pub trait Shell: Send + Sync {
    /// Run `command` with `args` in the folder of `package`
    fn run(&self, package: &Package, command: &str, args: &[String]) -> ShellResult;
}

/// Runs commands as real subprocesses found on the executable search path
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShell;

impl Shell for SystemShell {
    fn run(&self, package: &Package, command: &str, args: &[String]) -> ShellResult {
        run_in(&package.folder, command, args)
    }
}

/// Spawn `command` in `folder` and wait for it to exit
pub fn run_in(folder: &Path, command: &str, args: &[String]) -> ShellResult {
    debug!("Spawning {} {:?} in {}", command, args, folder.display());

    let mut child = match Command::new(command)
        .args(args)
        .current_dir(folder)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ShellError::NotFound {
                command: command.to_string(),
                output: String::new(),
            });
        }
        Err(e) => {
            return Err(ShellError::Spawn {
                message: e.to_string(),
                output: String::new(),
            });
        }
    };

    let output = Mutex::new(String::new());
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    thread::scope(|scope| {
        if let Some(stdout) = stdout {
            scope.spawn(|| capture(stdout, "OUT", &output));
        }
        if let Some(stderr) = stderr {
            scope.spawn(|| capture(stderr, "ERR", &output));
        }
    });

    let status = child.wait();
    let output = output.into_inner().unwrap_or_else(PoisonError::into_inner);
    if !output.is_empty() {
        debug!("{} output:\n{}", command, output.trim_end());
    }

    let status = match status {
        Ok(status) => status,
        Err(e) => {
            return Err(ShellError::Spawn {
                message: e.to_string(),
                output,
            });
        }
    };

    match status.code() {
        Some(0) => Ok(output),
        Some(code) => Err(ShellError::ExitCode { code, output }),
        None => Err(ShellError::Terminated { output }),
    }
}

/// Append each line read from `stream` to `output`, tagged with `tag`
fn capture(stream: impl Read, tag: &str, output: &Mutex<String>) {
    let mut reader = BufReader::new(stream);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                let mut output = output.lock().unwrap_or_else(PoisonError::into_inner);
                output.push_str(tag);
                output.push(' ');
                output.push_str(text.trim_end_matches(['\r', '\n']));
                output.push('\n');
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_success_captures_stdout() {
        let temp = TempDir::new().unwrap();
        let output = run_in(temp.path(), "sh", &args(&["-c", "echo hello"])).unwrap();
        assert_eq!(output, "OUT hello\n");
    }

    #[test]
    fn test_nonzero_exit_code() {
        let temp = TempDir::new().unwrap();
        let err = run_in(temp.path(), "sh", &args(&["-c", "echo oops >&2; exit 3"])).unwrap_err();
        assert_eq!(err.to_string(), "exit code 3");
        assert!(err.output().contains("ERR oops"));
    }

    #[test]
    fn test_command_not_found() {
        let temp = TempDir::new().unwrap();
        let err = run_in(temp.path(), "npmtool-definitely-missing", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "command not found npmtool-definitely-missing"
        );
    }

    #[test]
    fn test_runs_in_given_folder() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "x").unwrap();
        assert!(run_in(temp.path(), "sh", &args(&["-c", "test -f marker.txt"])).is_ok());
    }

    #[test]
    fn test_outcome_from_shell_result() {
        assert_eq!(Outcome::from(Ok(String::new())), Outcome::ok());
        let failed: ShellResult = Err(ShellError::ExitCode {
            code: 1,
            output: String::new(),
        });
        assert_eq!(Outcome::from(failed), Outcome::failure("exit code 1"));
    }
}
