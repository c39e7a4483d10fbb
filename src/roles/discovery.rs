//! Available-role discovery.
//!
//! Scans `roles/*.pp` under the manifests directory and extracts the role
//! each file declares. Only the first declaration in a file counts; files
//! without one are skipped. The result is sorted and never contains the
//! sentinel base roles.

use crate::error::{EnvironmentError, Result};
use crate::types::{is_sentinel, RoleSet};
use regex::bytes::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Directory under the manifests directory holding role definitions.
pub const ROLES_SUBDIR: &str = "roles";

/// Extension of role definition files.
pub const DEFINITION_EXTENSION: &str = "pp";

/// Matches `class role::<name>` at the start of any line of a definition file.
static DECLARATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*class\s*role::([A-Za-z0-9_]+)").expect("declaration regex is valid")
});

/// The role declared by a definition file: the first matching line wins.
pub fn first_declaration(content: &[u8]) -> Option<String> {
    DECLARATION_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}

/// List role definition files in a stable order.
pub fn definition_files(manifests_dir: &Path) -> Result<Vec<PathBuf>> {
    let roles_dir = manifests_dir.join(ROLES_SUBDIR);
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&roles_dir.to_string_lossy()),
        DEFINITION_EXTENSION
    );

    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            EnvironmentError::io(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Compute the set of available roles.
pub fn roles_available(manifests_dir: &Path) -> Result<RoleSet> {
    let mut roles = RoleSet::new();
    for file in definition_files(manifests_dir)? {
        let content = std::fs::read(&file).map_err(|e| EnvironmentError::io(&file, e))?;
        match first_declaration(&content) {
            Some(role) if !is_sentinel(&role) => {
                roles.insert(role);
            }
            Some(_) => {}
            None => {
                tracing::trace!(file = %file.display(), "No role declaration, skipping");
            }
        }
    }
    Ok(roles)
}
