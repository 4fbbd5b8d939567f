//! High-level operations
//!
//! - `run`: discover packages, resolve local dependencies and execute a
//!   command list against them

pub mod run;
