//! `echo` script: reports its arguments and parameters as the summary

use serde_json::json;

use crate::domain::Outcome;
use crate::scripts::{Invocation, Script};

pub struct Echo;

impl Script for Echo {
    fn run(&self, invocation: &Invocation<'_>) -> Outcome {
        Outcome::success(json!({
            "args": invocation.args,
            "params": invocation.params,
        }))
    }
}
