//! # Directory Matching
//!
//! Decides whether an incoming branch already has a preview tree on the host.
//! The branch's fingerprint (see [`crate::fingerprint`]) is compared against
//! the fingerprint of every host directory, in listing order, and the first
//! exact match wins.
//!
//! An empty fingerprint never matches anything. A branch without a marker is
//! a new branch, and a host directory without a marker cannot be reused by
//! fingerprint.

use crate::fingerprint;
use log::{debug, info};

/// Outcome of matching a branch against the host directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Name of the first host directory with the same fingerprint.
    pub matched_dir: Option<String>,
    /// Fingerprint of the matched host directory, empty when unmatched.
    pub host_fingerprint: String,
    /// Fingerprint extracted from the branch name, possibly empty.
    pub branch_fingerprint: String,
}

impl MatchResult {
    /// Whether a host directory with the branch's fingerprint exists.
    pub fn is_match(&self) -> bool {
        self.matched_dir.is_some()
    }
}

/// Match `branch` against `host_dirs` using `marker` to locate fingerprints.
pub fn match_branch<S: AsRef<str>>(branch: &str, host_dirs: &[S], marker: &str) -> MatchResult {
    let branch_fingerprint = fingerprint::extract(branch, marker);
    debug!(
        "Passed branch name: [{}] and substring: {}",
        branch, branch_fingerprint
    );

    let mut result = MatchResult {
        branch_fingerprint: branch_fingerprint.to_string(),
        ..MatchResult::default()
    };

    if branch_fingerprint.is_empty() {
        return result;
    }

    for dir in host_dirs {
        let dir = dir.as_ref();
        let host_fingerprint = fingerprint::extract(dir, marker);
        debug!("Server directory: [{}] and substring: {}", dir, host_fingerprint);

        if host_fingerprint == branch_fingerprint {
            info!(
                "Find match! Server directory: [{}] and passed branch name: [{}] substrings [{} == {}]",
                dir, branch, host_fingerprint, branch_fingerprint
            );
            result.matched_dir = Some(dir.to_string());
            result.host_fingerprint = host_fingerprint.to_string();
            return result;
        }
    }

    result
}
