//! Domain models for npmtool
//!
//! This module contains the records that flow through a run: discovered
//! packages and the classified outcome of running one command against one
//! package.

pub mod outcome;
pub mod package;

pub use outcome::{Outcome, Severity, Summary};
pub use package::Package;
