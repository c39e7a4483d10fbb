//! Environment variable source: VAGRANT_ROLES__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "VAGRANT_ROLES";

/// Add environment variable overlay to builder.
/// Uses VAGRANT_ROLES prefix and __ as separator for nested keys,
/// e.g. `VAGRANT_ROLES__REFRESH__STALENESS_SECS`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
