//! Built-in defaults, the lowest-precedence layer.

use crate::environment::DEFAULT_MANIFESTS_DIR;
use crate::refresh::STALENESS_SECS;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with default values.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("environment.manifests_dir", DEFAULT_MANIFESTS_DIR)?
        .set_default("refresh.staleness_secs", STALENESS_SECS)?
        .set_default("refresh.opt_out_env", "MWV_NO_UPDATE")?
        .set_default("refresh.opt_out_file", "no-update")?
        .set_default("refresh.remote", "origin")
}
