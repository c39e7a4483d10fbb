//! vagrant-roles: role management for Vagrant development environments
//!
//! Tracks which Puppet roles are available and enabled in a checkout,
//! regenerates the machine-managed role manifest, and decides when the
//! checkout is stale enough to fetch from its remote.

pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod refresh;
pub mod roles;
pub mod tooling;
pub mod types;
pub mod vcs;

pub use environment::Environment;
pub use error::{EnvironmentError, Result};
