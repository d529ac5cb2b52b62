//! # Branch Tree Provisioning
//!
//! A branch tree lives at `<hostdir>/<tree>/` and holds one directory per
//! configured subdirectory. Two ways of filling it exist:
//!
//! - **Fresh**: create the tree, initialize the primary project from the CI
//!   remote and commit, clone every sidecar from its own remote, then run each
//!   subdirectory's action list.
//! - **Rebuild**: the tree already exists from an earlier build of the same
//!   fingerprint. Only the primary project is fetched, moved to the new commit
//!   and rebuilt; sidecars stay as they are.
//!
//! Any failure stops provisioning immediately. Work already done is left on
//! disk.

use crate::config::{Config, SubdirConfig};
use crate::error::{Error, Result};
use crate::filesystem;
use crate::git;
use crate::matcher::MatchResult;
use crate::runner::CommandRunner;
use log::info;
use std::path::{Path, PathBuf};

/// What CI asked to deploy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployRequest {
    /// Sanitized ref name; also the branch tree directory name.
    pub ref_slug: String,
    /// Remote of the primary project.
    pub repo_url: String,
    /// Commit to check out in the primary project.
    pub commit_sha: String,
    /// Name of the primary project subdirectory.
    pub project_name: String,
}

/// Check that `slug` names exactly one directory directly under the host
/// directory.
///
/// An empty slug, `.`, `..` or anything holding a path separator would place
/// the tree at or outside the host root.
pub fn validate_tree_name(slug: &str) -> Result<()> {
    let reason = if slug.is_empty() {
        "must not be empty"
    } else if slug == "." || slug == ".." || slug.contains(std::path::is_separator) {
        "must name a single directory under the host directory"
    } else {
        return Ok(());
    };
    Err(Error::InvalidRefSlug {
        slug: slug.to_string(),
        reason: reason.to_string(),
    })
}

/// Populates branch trees under the configured host directory.
pub struct Provisioner<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> Provisioner<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Path of the tree named `tree` under the host directory.
    pub fn tree_path(&self, tree: &str) -> Result<PathBuf> {
        validate_tree_name(tree)?;
        Ok(self.config.hostdir.join(tree))
    }

    /// Build `<hostdir>/<ref_slug>` from scratch, with `primary` as the
    /// configuration of the project named in `request`.
    ///
    /// Running it again for the same tree reuses the directories and
    /// repositories left by the earlier run.
    pub fn provision_fresh(&self, request: &DeployRequest, primary: &SubdirConfig) -> Result<()> {
        let tree = self.tree_path(&request.ref_slug)?;
        let project_dir = tree.join(&request.project_name);

        filesystem::ensure_dir(&tree)?;
        filesystem::ensure_dir(&project_dir)?;

        for (name, subdir) in &self.config.subdirs {
            if *name == request.project_name {
                filesystem::require_dir(&project_dir)?;
                git::init_tracking(
                    self.runner,
                    &project_dir,
                    &request.ref_slug,
                    &request.repo_url,
                    &request.commit_sha,
                )?;
                self.build_project(&project_dir, primary, &request.commit_sha)?;
            } else {
                self.provision_sidecar(&tree, name, subdir)?;
            }
        }

        info!("Provisioned {} from scratch", tree.display());
        Ok(())
    }

    /// Provision for a fingerprinted branch given the match outcome.
    ///
    /// Unmatched falls back to [`Provisioner::provision_fresh`]. Matched
    /// rebuilds only the primary project inside the matched tree.
    pub fn provision_reuse(
        &self,
        request: &DeployRequest,
        primary: &SubdirConfig,
        matched: &MatchResult,
    ) -> Result<()> {
        match &matched.matched_dir {
            None => self.provision_fresh(request, primary),
            Some(dir) => self.rebuild_primary(dir, request, primary),
        }
    }

    /// Fetch, check out and rebuild the primary project in the existing tree
    /// `tree`. No directories are created and sidecars are not touched.
    pub fn rebuild_primary(
        &self,
        tree: &str,
        request: &DeployRequest,
        primary: &SubdirConfig,
    ) -> Result<()> {
        let project_dir = self.tree_path(tree)?.join(&request.project_name);
        filesystem::require_dir(&project_dir)?;

        self.build_project(&project_dir, primary, &request.commit_sha)?;
        info!("Rebuilt {} at {}", project_dir.display(), request.commit_sha);
        Ok(())
    }

    fn provision_sidecar(&self, tree: &Path, name: &str, subdir: &SubdirConfig) -> Result<()> {
        let repo = subdir.repo.as_deref().ok_or_else(|| Error::MissingRepo {
            subdir: name.to_string(),
        })?;

        filesystem::require_dir(tree)?;
        git::clone_into(self.runner, tree, repo, name)?;

        let sidecar_dir = tree.join(name);
        filesystem::require_dir(&sidecar_dir)?;
        self.run_actions(&sidecar_dir, &subdir.action)
    }

    fn build_project(&self, dir: &Path, project: &SubdirConfig, commit: &str) -> Result<()> {
        git::fetch_checkout(self.runner, dir, commit)?;
        self.run_actions(dir, &project.action)
    }

    fn run_actions(&self, dir: &Path, actions: &[String]) -> Result<()> {
        for action in actions {
            self.runner.run_shell(action, dir)?;
        }
        Ok(())
    }
}
