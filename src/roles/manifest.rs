//! Generated role manifest.
//!
//! The manifest at `manifests.d/vagrant-managed.pp` is owned by this crate:
//! it is the persisted enabled-role set and is only ever rewritten whole.

use crate::error::{EnvironmentError, Result};
use crate::types::{RoleSet, ROLE_NAMESPACE};
use regex::Regex;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

/// Directory under the manifests directory holding generated manifests.
pub const MANAGED_DIR: &str = "manifests.d";

/// File name of the generated role manifest.
pub const MANAGED_FILE: &str = "vagrant-managed.pp";

/// Header written at the top of every generated manifest.
pub const HEADER: [&str; 2] = [
    "# This file is managed by Vagrant. Do not edit.",
    "# Use \"vagrant list-roles / enable-role / disable-role\" instead.",
];

/// Matches an uncommented `include role::<name>` on a single line.
static INCLUDE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^#]*include role::(\S+)").expect("include regex is valid")
});

/// The role a single manifest line includes, if any.
pub fn included_role(line: &str) -> Option<&str> {
    INCLUDE_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse manifest content into the enabled role set.
pub fn parse_enabled(content: &str) -> RoleSet {
    content
        .lines()
        .filter_map(included_role)
        .map(str::to_string)
        .collect()
}

/// Read the enabled role set. A missing manifest is an empty set.
pub fn read_enabled(path: &Path) -> Result<RoleSet> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(parse_enabled(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RoleSet::new()),
        Err(e) => Err(EnvironmentError::io(path, e)),
    }
}

/// Whether content starts with the machine-managed header.
pub fn has_managed_header(content: &str) -> bool {
    content.lines().next() == Some(HEADER[0])
}

/// Render the manifest for a canonical role set.
///
/// Names are written as given; namespace stripping happens when the set is
/// built. Output is a pure function of the set, so rendering is idempotent.
pub fn render(roles: &RoleSet) -> String {
    let mut out = HEADER.join("\n");
    for role in roles {
        out.push('\n');
        out.push_str("include ");
        out.push_str(ROLE_NAMESPACE);
        out.push_str(role);
    }
    out.push('\n');
    out
}

/// Replace the manifest with one enabling exactly `roles`.
///
/// The new content is written to a temporary file next to the manifest and
/// renamed over it, so readers never see a partial file. A pre-existing
/// manifest without the managed header is still overwritten.
pub fn write_manifest(path: &Path, roles: &RoleSet) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| EnvironmentError::io(path, std::io::ErrorKind::InvalidInput.into()))?;
    std::fs::create_dir_all(dir).map_err(|e| EnvironmentError::io(dir, e))?;

    let previous = match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(EnvironmentError::io(path, e)),
    };
    if let Some(bytes) = &previous {
        if !has_managed_header(&String::from_utf8_lossy(bytes)) {
            tracing::warn!(
                manifest = %path.display(),
                "Overwriting role manifest without managed header; manual edits are lost"
            );
        }
    }

    let content = render(roles);
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| EnvironmentError::io(dir, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| EnvironmentError::io(dir, e))?;
    temp.flush().map_err(|e| EnvironmentError::io(dir, e))?;
    set_manifest_permissions(temp.as_file(), path)?;
    temp.persist(path)?;

    tracing::debug!(
        manifest = %path.display(),
        roles = roles.len(),
        "Regenerated role manifest"
    );
    Ok(())
}

/// Keep the existing manifest's permissions, or use world-readable defaults.
fn set_manifest_permissions(file: &std::fs::File, path: &Path) -> Result<()> {
    let permissions = match std::fs::metadata(path) {
        Ok(meta) => meta.permissions(),
        Err(_) => default_permissions(file, path)?,
    };
    file.set_permissions(permissions)
        .map_err(|e| EnvironmentError::io(path, e))
}

#[cfg(unix)]
fn default_permissions(_file: &std::fs::File, _path: &Path) -> Result<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(file: &std::fs::File, path: &Path) -> Result<std::fs::Permissions> {
    file.metadata()
        .map(|meta| meta.permissions())
        .map_err(|e| EnvironmentError::io(path, e))
}
