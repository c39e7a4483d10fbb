//! Workspace file source: optional `.vagrant-roles.toml` at the environment root.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Name of the per-environment configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = ".vagrant-roles.toml";

/// Add the workspace config file, if present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = root.join(WORKSPACE_CONFIG_FILE);
    Ok(builder.add_source(
        File::from(path)
            .format(FileFormat::Toml)
            .required(false),
    ))
}
