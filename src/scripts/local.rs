//! Workspace-local scripts
//!
//! A file in the workspace root is a local script when one of its first
//! lines carries the `npmtool-script` marker. It runs as a subprocess in the
//! package folder, receives a JSON request on stdin and replies with one JSON
//! object on the last non-empty line of stdout:
//!
//! ```text
//! {"summary": ...}                 success
//! {"error": "message"}             failure
//! {"code": 0|1|2, "summary": ...}  success / warning / error
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{Outcome, Package, Summary};
use crate::scripts::{Invocation, Script};

/// Marker identifying a local script
pub const SCRIPT_MARKER: &str = "npmtool-script";

/// Number of leading lines searched for the marker
const MARKER_LINES: usize = 5;

/// Whether `path` is a file carrying the local script marker
pub fn is_local_script(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let Ok(file) = File::open(path) else {
        return false;
    };

    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    for _ in 0..MARKER_LINES {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {
                if String::from_utf8_lossy(&line).contains(SCRIPT_MARKER) {
                    return true;
                }
            }
        }
    }
    false
}

#[derive(Serialize)]
struct Request<'a> {
    package: &'a Package,
    args: &'a [String],
    params: &'a Value,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<u64>,
    #[serde(default)]
    summary: Option<Value>,
}

impl Reply {
    fn into_outcome(self) -> Outcome {
        let summary = self.summary.and_then(|v| match v {
            Value::Null => None,
            Value::String(text) => Some(Summary::Text(text)),
            other => Some(Summary::Structured(other)),
        });

        match (self.error, self.code) {
            (Some(error), _) => Outcome::Failure(error),
            (None, Some(code)) => Outcome::from_code(code, summary),
            (None, None) => Outcome::Success(summary),
        }
    }
}

/// A local script at an absolute path
pub struct LocalScript {
    path: PathBuf,
}

impl LocalScript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Script for LocalScript {
    fn run(&self, invocation: &Invocation<'_>) -> Outcome {
        let request = Request {
            package: invocation.package,
            args: invocation.args,
            params: invocation.params,
        };
        let request = match serde_json::to_vec(&request) {
            Ok(bytes) => bytes,
            Err(e) => return Outcome::failure(format!("cannot encode request: {e}")),
        };

        let child = Command::new(&self.path)
            .args(invocation.args)
            .current_dir(&invocation.package.folder)
            .env("NPMTOOL_PACKAGE", &invocation.package.name)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();
        let mut child = match child {
            Ok(child) => child,
            Err(e) => return Outcome::failure(format!("cannot run script: {e}")),
        };

        let stdin = child.stdin.take();
        let output = thread::scope(|scope| {
            scope.spawn(move || {
                if let Some(mut stdin) = stdin {
                    // The script may exit without reading its request
                    let _ = stdin.write_all(&request);
                }
            });
            child.wait_with_output()
        });
        let output = match output {
            Ok(output) => output,
            Err(e) => return Outcome::failure(format!("cannot run script: {e}")),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(
            "{} replied:\n{}{}",
            self.path.display(),
            stdout.trim_end(),
            stderr.trim_end()
        );

        match output.status.code() {
            Some(0) => {}
            Some(code) => return Outcome::failure(format!("exit code {code}")),
            None => return Outcome::failure("terminated by signal"),
        }

        let Some(reply) = stdout.lines().rev().find(|l| !l.trim().is_empty()) else {
            return Outcome::failure("script produced no reply");
        };
        match serde_json::from_str::<Reply>(reply.trim()) {
            Ok(reply) => reply.into_outcome(),
            Err(e) => Outcome::failure(format!("invalid script reply: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reply(json: &str) -> Outcome {
        serde_json::from_str::<Reply>(json).unwrap().into_outcome()
    }

    #[test]
    fn test_marker_detection() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("check");
        std::fs::write(&script, "#!/bin/sh\n# npmtool-script\necho '{}'\n").unwrap();
        let plain = temp.path().join("build");
        std::fs::write(&plain, "#!/bin/sh\nmake\n").unwrap();

        assert!(is_local_script(&script));
        assert!(!is_local_script(&plain));
        assert!(!is_local_script(&temp.path().join("missing")));
        assert!(!is_local_script(temp.path()));
    }

    #[test]
    fn test_reply_forms() {
        assert_eq!(reply(r#"{"summary": "ok"}"#), Outcome::success("ok"));
        assert_eq!(reply("{}"), Outcome::ok());
        assert_eq!(reply(r#"{"error": "bad"}"#), Outcome::failure("bad"));
        assert_eq!(
            reply(r#"{"code": 1, "summary": "slow test"}"#),
            Outcome::warning("slow test")
        );
        assert_eq!(
            reply(r#"{"code": 2, "summary": "broken"}"#),
            Outcome::failure("broken")
        );
        assert_eq!(
            reply(r#"{"summary": {"n": 1}}"#),
            Outcome::Success(Some(Summary::Structured(serde_json::json!({"n": 1}))))
        );
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use crate::engine::SystemShell;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn script(temp: &TempDir, body: &str) -> PathBuf {
            let path = temp.path().join("script");
            std::fs::write(&path, format!("#!/bin/sh\n# {SCRIPT_MARKER}\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn invoke(path: PathBuf, folder: &Path, args: &[String]) -> Outcome {
            let package = Package {
                name: "alpha".to_string(),
                folder: folder.to_path_buf(),
                ..Package::default()
            };
            let params = serde_json::json!({});
            LocalScript::new(path).run(&Invocation {
                package: &package,
                args,
                shell: &SystemShell,
                params: &params,
            })
        }

        #[test]
        fn test_script_reply_is_classified() {
            let temp = TempDir::new().unwrap();
            let path = script(
                &temp,
                r#"cat > /dev/null; echo "working"; echo "{\"code\": 1, \"summary\": \"$NPMTOOL_PACKAGE\"}""#,
            );
            assert_eq!(invoke(path, temp.path(), &[]), Outcome::warning("alpha"));
        }

        #[test]
        fn test_script_receives_request_on_stdin() {
            let temp = TempDir::new().unwrap();
            let path = script(
                &temp,
                r#"if grep -q '"args":\["x"\]'; then echo '{"summary":"got args"}'; else echo '{"error":"no args"}'; fi"#,
            );
            assert_eq!(
                invoke(path, temp.path(), &["x".to_string()]),
                Outcome::success("got args")
            );
        }

        #[test]
        fn test_nonzero_exit_is_failure() {
            let temp = TempDir::new().unwrap();
            let path = script(&temp, "exit 4");
            assert_eq!(invoke(path, temp.path(), &[]), Outcome::failure("exit code 4"));
        }

        #[test]
        fn test_missing_reply_is_failure() {
            let temp = TempDir::new().unwrap();
            let path = script(&temp, "true");
            assert_eq!(
                invoke(path, temp.path(), &[]),
                Outcome::failure("script produced no reply")
            );
        }
    }
}
