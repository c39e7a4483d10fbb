//! Tooling & Integration Layer
//!
//! Command-line surface and output formatting over the environment core.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
