//! Role-set reconciliation.
//!
//! Pure set algebra over enabled and available roles. Every function returns
//! the full target set; callers persist it by regenerating the manifest.

use crate::error::{EnvironmentError, Result};
use crate::types::RoleSet;
use serde::Serialize;

/// Outcome of an enable or disable request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleChange {
    /// Roles whose state changed.
    pub changed: Vec<String>,
    /// Requested roles that were already in the requested state.
    pub unchanged: Vec<String>,
}

/// A reconciliation plan: the full target set plus what moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub target: RoleSet,
    pub change: RoleChange,
}

/// Keep only enabled roles that are still available.
pub fn plan_prune(enabled: &RoleSet, available: &RoleSet) -> Plan {
    let target: RoleSet = enabled.intersection(available).cloned().collect();
    let pruned = enabled.difference(available).cloned().collect();
    Plan {
        change: RoleChange {
            changed: pruned,
            unchanged: target.iter().cloned().collect(),
        },
        target,
    }
}

/// Add requested roles, refusing any that are not available.
pub fn plan_enable(enabled: &RoleSet, available: &RoleSet, requested: &RoleSet) -> Result<Plan> {
    let unknown: Vec<String> = requested.difference(available).cloned().collect();
    if !unknown.is_empty() {
        return Err(EnvironmentError::UnknownRoles(unknown));
    }
    let (unchanged, changed): (Vec<String>, Vec<String>) = requested
        .iter()
        .cloned()
        .partition(|role| enabled.contains(role));
    Ok(Plan {
        target: enabled.union(requested).cloned().collect(),
        change: RoleChange { changed, unchanged },
    })
}

/// Remove requested roles. Roles that were not enabled are reported, not rejected.
pub fn plan_disable(enabled: &RoleSet, requested: &RoleSet) -> Plan {
    let (changed, unchanged): (Vec<String>, Vec<String>) = requested
        .iter()
        .cloned()
        .partition(|role| enabled.contains(role));
    Plan {
        target: enabled.difference(requested).cloned().collect(),
        change: RoleChange { changed, unchanged },
    }
}
