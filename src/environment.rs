//! Environment
//!
//! An [`Environment`] is bound to the root directory of a development
//! checkout. Every operation re-derives its view from disk; nothing is
//! cached between calls.

use crate::error::{EnvironmentError, Result};
use crate::refresh::{FetchMarker, RefreshConfig, RefreshDecision, RefreshGate, RefreshOutcome};
use crate::roles::manifest::{MANAGED_DIR, MANAGED_FILE};
use crate::roles::{discovery, manifest, reconcile, RoleChange};
use crate::types::{canonical_role_set, RoleSet};
use crate::vcs::{self, FetchRunner, GitFetch};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// File marking the root of an environment.
pub const ROOT_MARKER: &str = "Vagrantfile";

/// Default manifests directory, relative to the root.
pub const DEFAULT_MANIFESTS_DIR: &str = "puppet/manifests";

fn default_manifests_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFESTS_DIR)
}

/// Environment layout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Puppet manifests directory (relative to the root)
    #[serde(default = "default_manifests_dir")]
    pub manifests_dir: PathBuf,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            manifests_dir: default_manifests_dir(),
        }
    }
}

/// One available role and whether it is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleEntry {
    pub name: String,
    pub enabled: bool,
}

/// The current environment from which role commands are executed.
#[derive(Debug, Clone)]
pub struct Environment {
    root: PathBuf,
    layout: EnvironmentConfig,
    refresh: RefreshConfig,
}

impl Environment {
    /// Bind to `root` with default layout and refresh settings.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, EnvironmentConfig::default(), RefreshConfig::default())
    }

    /// Bind to `root` with explicit configuration.
    pub fn with_config(
        root: impl AsRef<Path>,
        layout: EnvironmentConfig,
        refresh: RefreshConfig,
    ) -> Result<Self> {
        Ok(Self {
            root: absolute_root(root.as_ref())?,
            layout,
            refresh,
        })
    }

    /// Find the nearest directory at or above `start` containing a Vagrantfile.
    pub fn locate(start: impl AsRef<Path>) -> Result<PathBuf> {
        let start = absolute_root(start.as_ref())?;
        let found = start
            .ancestors()
            .find(|dir| dir.join(ROOT_MARKER).is_file())
            .map(Path::to_path_buf);
        match found {
            Some(root) => Ok(root),
            None => Err(EnvironmentError::RootNotFound(start)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn refresh_config(&self) -> &RefreshConfig {
        &self.refresh
    }

    /// Absolute path of `subpaths` joined onto the root. Existence is not checked.
    pub fn path<I, P>(&self, subpaths: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        subpaths
            .into_iter()
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }

    pub fn manifests_dir(&self) -> PathBuf {
        self.root.join(&self.layout.manifests_dir)
    }

    /// Path of the generated role manifest.
    pub fn role_manifest(&self) -> PathBuf {
        self.manifests_dir().join(MANAGED_DIR).join(MANAGED_FILE)
    }

    /// Short id of the local master commit, if the root is a git clone.
    pub fn commit(&self) -> Option<String> {
        vcs::short_commit(&self.root)
    }

    /// All available roles, sorted.
    pub fn roles_available(&self) -> Result<Vec<String>> {
        Ok(self.available_set()?.into_iter().collect())
    }

    /// Enabled roles, sorted. Empty when no manifest has been generated.
    pub fn roles_enabled(&self) -> Result<Vec<String>> {
        Ok(self.enabled_set()?.into_iter().collect())
    }

    /// Every available role with its enabled flag.
    pub fn role_listing(&self) -> Result<Vec<RoleEntry>> {
        let enabled = self.enabled_set()?;
        Ok(self
            .available_set()?
            .into_iter()
            .map(|name| RoleEntry {
                enabled: enabled.contains(&name),
                name,
            })
            .collect())
    }

    /// Regenerate the manifest so exactly `roles` are enabled.
    ///
    /// This is the only way the enabled set changes.
    pub fn update_roles<I, S>(&self, roles: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roles = canonical_role_set(roles)?;
        manifest::write_manifest(&self.role_manifest(), &roles)
    }

    /// Remove enabled roles that are no longer available. Returns the pruned names.
    pub fn prune_roles(&self) -> Result<Vec<String>> {
        let plan = reconcile::plan_prune(&self.enabled_set()?, &self.available_set()?);
        manifest::write_manifest(&self.role_manifest(), &plan.target)?;
        if !plan.change.changed.is_empty() {
            tracing::info!(pruned = ?plan.change.changed, "Pruned unavailable roles");
        }
        Ok(plan.change.changed)
    }

    /// Enable available roles in addition to those already enabled.
    pub fn enable_roles<I, S>(&self, roles: I) -> Result<RoleChange>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested = canonical_role_set(roles)?;
        let plan =
            reconcile::plan_enable(&self.enabled_set()?, &self.available_set()?, &requested)?;
        manifest::write_manifest(&self.role_manifest(), &plan.target)?;
        Ok(plan.change)
    }

    /// Disable roles; names that were not enabled are reported as unchanged.
    pub fn disable_roles<I, S>(&self, roles: I) -> Result<RoleChange>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested = canonical_role_set(roles)?;
        let plan = reconcile::plan_disable(&self.enabled_set()?, &requested);
        manifest::write_manifest(&self.role_manifest(), &plan.target)?;
        Ok(plan.change)
    }

    /// Disable every role. Returns the roles that were enabled.
    pub fn reset_roles(&self) -> Result<Vec<String>> {
        let previous = self.roles_enabled()?;
        manifest::write_manifest(&self.role_manifest(), &RoleSet::new())?;
        Ok(previous)
    }

    pub fn fetch_marker(&self) -> Result<FetchMarker> {
        FetchMarker::read(&self.root)
    }

    /// Whether the last remote fetch is older than the staleness threshold.
    pub fn is_stale_at(&self, now: SystemTime) -> Result<bool> {
        Ok(self
            .fetch_marker()?
            .is_stale_at(now, self.refresh.threshold()))
    }

    /// Resolve the opt-out from the process environment and the root.
    pub fn refresh_gate(&self) -> RefreshGate {
        RefreshGate::resolve(&self.root, &self.refresh)
    }

    /// Fetch from the remote with `git` if the checkout is stale and refresh
    /// has not been disabled.
    pub fn update(&self) -> Result<RefreshOutcome> {
        self.update_with(&GitFetch, self.refresh_gate(), SystemTime::now())
    }

    /// Staleness-gated refresh with an explicit runner, gate and clock.
    pub fn update_with(
        &self,
        runner: &dyn FetchRunner,
        gate: RefreshGate,
        now: SystemTime,
    ) -> Result<RefreshOutcome> {
        let stale = self.is_stale_at(now)?;
        self.run_decision(RefreshDecision::decide(stale, gate), runner)
    }

    /// Fetch regardless of staleness, still honoring the opt-out.
    pub fn force_update_with(
        &self,
        runner: &dyn FetchRunner,
        gate: RefreshGate,
    ) -> Result<RefreshOutcome> {
        self.run_decision(RefreshDecision::decide(true, gate), runner)
    }

    fn run_decision(
        &self,
        decision: RefreshDecision,
        runner: &dyn FetchRunner,
    ) -> Result<RefreshOutcome> {
        match decision {
            RefreshDecision::Fresh => Ok(RefreshOutcome::Fresh),
            RefreshDecision::Suppressed => {
                tracing::debug!("Checkout is stale but automatic refresh is disabled");
                Ok(RefreshOutcome::Suppressed)
            }
            RefreshDecision::Fetch => Ok(RefreshOutcome::Attempted(
                runner.fetch(&self.root, &self.refresh.remote),
            )),
        }
    }

    fn available_set(&self) -> Result<RoleSet> {
        discovery::roles_available(&self.manifests_dir())
    }

    fn enabled_set(&self) -> Result<RoleSet> {
        manifest::read_enabled(&self.role_manifest())
    }
}

fn absolute_root(root: &Path) -> Result<PathBuf> {
    if root.exists() {
        return dunce::canonicalize(root).map_err(|e| EnvironmentError::io(root, e));
    }
    if root.is_absolute() {
        return Ok(root.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| EnvironmentError::io(root, e))?;
    Ok(cwd.join(root))
}
