//! Command implementations
//!
//! - `run`: resolve configuration and run the selected command sets
//! - `completions`: print shell completions

pub mod completions;
pub mod run;
