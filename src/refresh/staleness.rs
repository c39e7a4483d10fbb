//! Fetch marker and the staleness predicate.

use crate::error::{EnvironmentError, Result};
use crate::vcs::FETCH_HEAD;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::{Duration, SystemTime};

/// One week.
pub const STALENESS_SECS: u64 = 604_800;

/// Last-modified time of `.git/FETCH_HEAD`, if present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchMarker {
    pub modified: Option<SystemTime>,
}

impl FetchMarker {
    /// Stat the marker under `root`. A missing marker is not an error.
    pub fn read(root: &Path) -> Result<Self> {
        let path = root.join(FETCH_HEAD);
        match std::fs::metadata(&path) {
            Ok(meta) => {
                let modified = meta.modified().map_err(|e| EnvironmentError::io(&path, e))?;
                Ok(Self {
                    modified: Some(modified),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(EnvironmentError::io(path, e)),
        }
    }

    /// Time elapsed since the last fetch. A marker in the future has age zero.
    pub fn age_at(&self, now: SystemTime) -> Option<Duration> {
        self.modified
            .map(|modified| now.duration_since(modified).unwrap_or(Duration::ZERO))
    }

    /// Stale when the marker exists and is strictly older than `threshold`.
    ///
    /// A missing marker means the checkout has never been measured and is
    /// treated as fresh.
    pub fn is_stale_at(&self, now: SystemTime, threshold: Duration) -> bool {
        self.age_at(now).is_some_and(|age| age > threshold)
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.modified.map(DateTime::<Utc>::from)
    }
}
