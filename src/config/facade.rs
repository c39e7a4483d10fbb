//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::RolesConfig;
use crate::error::Result;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for an environment root.
    pub fn load(root: &Path) -> Result<RolesConfig> {
        Ok(MergeService::load(root)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<RolesConfig> {
        Ok(MergeService::load_from_file(path)?)
    }

    /// Create default configuration.
    pub fn default() -> RolesConfig {
        RolesConfig::default()
    }
}
