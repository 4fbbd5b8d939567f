//! Presentation layer
//!
//! This module handles the final per-package report and the usage text
//! shown when a requested command set does not exist. Progress bars for
//! running steps live in [`crate::progress`].

pub mod report;
pub mod usage;

pub use report::{RunStatus, exit_code, print_report, render_package};
pub use usage::print_usage;
