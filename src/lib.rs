//! # ontest-deploy Library
//!
//! Core logic behind the `ontest-deploy` CI helper, which materializes a
//! per-branch preview deployment on a shared host and reuses the tree of an
//! earlier build when one exists for the same commit fingerprint.
//!
//! ## Quick Example
//!
//! ```
//! use ontest_deploy::fingerprint::MARKER;
//! use ontest_deploy::matcher::match_branch;
//! use ontest_deploy::orchestrator::{choose, Plan};
//!
//! let host_dirs = ["b1-ontest-aaaa1111", "b2-ontest-bbbb2222"];
//! let outcome = match_branch("feature-ontest-bbbb2222", &host_dirs, MARKER);
//!
//! assert_eq!(outcome.matched_dir.as_deref(), Some("b2-ontest-bbbb2222"));
//! assert_eq!(
//!     choose(&outcome),
//!     Plan::ReuseMatched { dir: "b2-ontest-bbbb2222".to_string() }
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Fingerprint (`fingerprint`)**: the short commit hash after the
//!   `ontest-` marker in a branch or directory name.
//! - **Matching (`matcher`)**: finds the first host directory whose
//!   fingerprint equals the branch's.
//! - **Provisioning (`provision`)**: builds a branch tree from scratch, or
//!   rebuilds only the primary project inside a matched tree.
//! - **Commands (`runner`, `git`)**: every external command runs through the
//!   `CommandRunner` trait with an explicit working directory.
//! - **Configuration (`config`)**: host root and per-subdirectory actions and
//!   remotes.
//!
//! ## Execution Flow
//!
//! `orchestrator::execute_deploy` validates the project name, lists the host
//! directory, matches the ref slug, picks a `Plan` and provisions. Every
//! error is returned to the caller; the binary treats all of them as fatal.

pub mod config;
pub mod error;
pub mod filesystem;
pub mod fingerprint;
pub mod git;
pub mod matcher;
pub mod orchestrator;
pub mod provision;
pub mod runner;

#[cfg(test)]
mod fingerprint_proptest;
