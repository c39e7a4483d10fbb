//! Staleness-gated refresh.
//!
//! Each call classifies the checkout as fresh or stale from the fetch
//! marker, then either does nothing, is suppressed by the opt-out, or runs
//! one remote fetch. Nothing is persisted between calls.

pub mod gate;
pub mod staleness;

pub use gate::RefreshGate;
pub use staleness::{FetchMarker, STALENESS_SECS};

use crate::vcs::FetchStatus;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Refresh configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds after the last fetch before the checkout counts as stale
    #[serde(default = "default_staleness_secs")]
    pub staleness_secs: u64,

    /// Environment variable whose presence disables refresh
    #[serde(default = "default_opt_out_env")]
    pub opt_out_env: String,

    /// File under the root whose presence disables refresh
    #[serde(default = "default_opt_out_file")]
    pub opt_out_file: String,

    /// Remote to fetch from
    #[serde(default = "default_remote")]
    pub remote: String,
}

fn default_staleness_secs() -> u64 {
    STALENESS_SECS
}

fn default_opt_out_env() -> String {
    "MWV_NO_UPDATE".to_string()
}

fn default_opt_out_file() -> String {
    "no-update".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            staleness_secs: default_staleness_secs(),
            opt_out_env: default_opt_out_env(),
            opt_out_file: default_opt_out_file(),
            remote: default_remote(),
        }
    }
}

impl RefreshConfig {
    pub fn threshold(&self) -> Duration {
        Duration::from_secs(self.staleness_secs)
    }
}

/// What a refresh call should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    Fresh,
    Suppressed,
    Fetch,
}

impl RefreshDecision {
    pub fn decide(stale: bool, gate: RefreshGate) -> Self {
        match (stale, gate.opt_out) {
            (false, _) => RefreshDecision::Fresh,
            (true, true) => RefreshDecision::Suppressed,
            (true, false) => RefreshDecision::Fetch,
        }
    }
}

/// What a refresh call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Fresh,
    Suppressed,
    Attempted(FetchStatus),
}

impl RefreshOutcome {
    pub fn attempted(&self) -> bool {
        matches!(self, RefreshOutcome::Attempted(_))
    }
}
