//! Version-control touch points.
//!
//! Only two things are read from the checkout's `.git` directory: the local
//! master ref (for a short commit id) and the mtime of `FETCH_HEAD`. Fetching
//! from the remote is delegated to the `git` executable.

use std::path::Path;
use std::process::Command;

/// Local branch ref used for the short commit id.
pub const MASTER_REF: &str = ".git/refs/heads/master";

/// File whose mtime records the last remote fetch.
pub const FETCH_HEAD: &str = ".git/FETCH_HEAD";

/// Length of the abbreviated commit id.
pub const SHORT_COMMIT_LEN: usize = 9;

/// Short commit id of local master, if the root is a git clone.
pub fn short_commit(root: &Path) -> Option<String> {
    let bytes = std::fs::read(root.join(MASTER_REF)).ok()?;
    let head = &bytes[..bytes.len().min(SHORT_COMMIT_LEN)];
    Some(String::from_utf8_lossy(head).into_owned())
}

/// Result of running a fetch. Never an error: the fetch reports for itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The process ran; `code` is `None` when killed by a signal.
    Exited { code: Option<i32> },
    /// The process could not be started.
    NotStarted { reason: String },
}

/// Performs a remote fetch with `root` as working directory.
pub trait FetchRunner {
    fn fetch(&self, root: &Path, remote: &str) -> FetchStatus;
}

/// Runs `git fetch <remote>`, inheriting the terminal.
#[derive(Debug, Clone, Default)]
pub struct GitFetch;

impl FetchRunner for GitFetch {
    fn fetch(&self, root: &Path, remote: &str) -> FetchStatus {
        tracing::info!(root = %root.display(), remote, "Fetching remote commits");
        match Command::new("git")
            .args(["fetch", remote])
            .current_dir(root)
            .status()
        {
            Ok(status) => {
                if !status.success() {
                    tracing::warn!(?status, "git fetch exited unsuccessfully");
                }
                FetchStatus::Exited {
                    code: status.code(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to start git fetch");
                FetchStatus::NotStarted {
                    reason: e.to_string(),
                }
            }
        }
    }
}
