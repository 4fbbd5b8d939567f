//! Manifest content guards
//!
//! Both scripts fail a package when a line of its manifest matches a
//! forbidden regular expression.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::domain::Outcome;
use crate::scripts::{Invocation, Script};

/// `checkpackagejson`: forbidden pattern comes from `params.nogrep`
pub struct CheckPackageJson;

impl Script for CheckPackageJson {
    fn run(&self, invocation: &Invocation<'_>) -> Outcome {
        match invocation.params.get("nogrep").and_then(|v| v.as_str()) {
            Some(pattern) if !pattern.is_empty() => guard(&invocation.package.file, pattern),
            _ => Outcome::success("param nogrep not found in npmtool.json"),
        }
    }
}

/// `package-nogrep`: forbidden alternatives come from the step arguments
pub struct PackageNogrep;

impl Script for PackageNogrep {
    fn run(&self, invocation: &Invocation<'_>) -> Outcome {
        if invocation.args.is_empty() {
            return Outcome::success("no patterns given");
        }
        guard(&invocation.package.file, &invocation.args.join("|"))
    }
}

fn guard(file: &Path, pattern: &str) -> Outcome {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => return Outcome::failure(format!("invalid pattern {pattern}: {e}")),
    };
    match fs::read_to_string(file) {
        Ok(content) if matches(&content, &re) => {
            Outcome::failure(format!("Grep matched {pattern}"))
        }
        Ok(_) => Outcome::ok(),
        Err(e) => Outcome::failure(format!("cannot read {}: {e}", file.display())),
    }
}

/// Whether any line of `content` matches `re`
fn matches(content: &str, re: &Regex) -> bool {
    content.lines().any(|line| re.is_match(line))
}
