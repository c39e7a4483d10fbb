//! Opt-out resolution for automatic refresh.

use super::RefreshConfig;
use std::path::Path;

/// Refresh permission, resolved once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshGate {
    pub opt_out: bool,
}

impl RefreshGate {
    /// Opted out when the configured environment variable is set to any value
    /// or the opt-out file exists at the root.
    pub fn resolve(root: &Path, config: &RefreshConfig) -> Self {
        let env_flag = std::env::var_os(&config.opt_out_env).is_some();
        Self::from_signals(env_flag, root.join(&config.opt_out_file).exists())
    }

    pub fn from_signals(env_flag: bool, marker_file: bool) -> Self {
        Self {
            opt_out: env_flag || marker_file,
        }
    }
}
