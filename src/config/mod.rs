//! Configuration: defaults, an optional workspace file, then environment
//! overrides, deserialized into [`RolesConfig`].

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

use crate::environment::EnvironmentConfig;
use crate::logging::LoggingConfig;
use crate::refresh::RefreshConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolesConfig {
    #[serde(default)]
    pub environment: EnvironmentConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
