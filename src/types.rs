//! Core types shared by role discovery and reconciliation.

use crate::error::{EnvironmentError, Result};
use std::collections::BTreeSet;

/// Sorted, duplicate-free set of bare role names.
pub type RoleSet = BTreeSet<String>;

/// Namespace token prefixed to role names in manifests.
pub const ROLE_NAMESPACE: &str = "role::";

/// Base roles that are never offered as available roles.
pub const SENTINEL_ROLES: [&str; 2] = ["generic", "mediawiki"];

/// Strip a single redundant `role::` prefix.
pub fn strip_namespace(name: &str) -> &str {
    name.strip_prefix(ROLE_NAMESPACE).unwrap_or(name)
}

/// Canonicalize a caller-supplied role name.
///
/// The namespace prefix is removed; the remaining name must be non-empty and
/// free of whitespace so it round-trips through the manifest.
pub fn canonical_role_name(name: &str) -> Result<String> {
    let bare = strip_namespace(name);
    if bare.is_empty() || bare.chars().any(char::is_whitespace) {
        return Err(EnvironmentError::InvalidRoleName(name.to_string()));
    }
    Ok(bare.to_string())
}

/// Canonicalize every name and collect them into a [`RoleSet`].
pub fn canonical_role_set<I, S>(names: I) -> Result<RoleSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| canonical_role_name(name.as_ref()))
        .collect()
}

/// Whether a role is one of the always-excluded base roles.
pub fn is_sentinel(name: &str) -> bool {
    SENTINEL_ROLES.contains(&name)
}
