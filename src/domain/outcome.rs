//! Classified result of running one command against one package

use std::fmt;

use serde_json::Value;

/// Free-form result summary attached to an outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Text(String),
    /// Structured payload, rendered as compact JSON
    Structured(Value),
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Text(text) => f.write_str(text),
            Summary::Structured(Value::String(text)) => f.write_str(text),
            Summary::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Summary {
    fn from(text: &str) -> Self {
        Summary::Text(text.to_string())
    }
}

impl From<String> for Summary {
    fn from(text: String) -> Self {
        Summary::Text(text)
    }
}

impl From<Value> for Summary {
    fn from(value: Value) -> Self {
        Summary::Structured(value)
    }
}

/// Result every script, executable and shell adapter must produce
///
/// A script hands back exactly one `Outcome` per invocation, so completion
/// can neither be skipped nor reported twice.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Option<Summary>),
    Warning(Option<Summary>),
    Failure(String),
}

impl Outcome {
    /// Success without a summary
    pub fn ok() -> Self {
        Outcome::Success(None)
    }

    /// Success carrying a summary
    pub fn success(summary: impl Into<Summary>) -> Self {
        Outcome::Success(Some(summary.into()))
    }

    pub fn warning(summary: impl Into<Summary>) -> Self {
        Outcome::Warning(Some(summary.into()))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(message.into())
    }

    /// Map a tri-state status code to an outcome.
    ///
    /// `0` is success, `1` is a warning, anything higher is an error. For
    /// errors the summary becomes the failure message.
    pub fn from_code(code: u64, summary: Option<Summary>) -> Self {
        match code {
            0 => Outcome::Success(summary),
            1 => Outcome::Warning(summary),
            _ => Outcome::Failure(
                summary
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("status code {code}")),
            ),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Success(_) => Severity::Success,
            Outcome::Warning(_) => Severity::Warning,
            Outcome::Failure(_) => Severity::Error,
        }
    }
}

/// Severity of a single outcome, and of a whole run in aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Success,
    Warning,
    Error,
}
