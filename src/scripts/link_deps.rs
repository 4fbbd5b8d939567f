//! `linkdeps` script: runs `npm link` for the package's local dependencies

use tracing::debug;

use crate::domain::Outcome;
use crate::scripts::{Invocation, Script};

pub struct LinkDeps;

impl Script for LinkDeps {
    fn run(&self, invocation: &Invocation<'_>) -> Outcome {
        let package = invocation.package;
        if package.local_deps.is_empty() {
            return Outcome::success("No local dependencies");
        }

        let mut args = vec!["link".to_string()];
        args.extend(package.local_deps.iter().cloned());

        match invocation.shell.run(package, "npm", &args) {
            Ok(_) => Outcome::success(format!("npm {}", args.join(" "))),
            Err(e) => {
                debug!("{}: npm link failed:\n{}", package.name, e.output().trim_end());
                Outcome::failure(e.to_string())
            }
        }
    }
}
