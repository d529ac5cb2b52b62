//! Git command sequences used to populate a branch tree.
//!
//! These use the system `git` through a [`CommandRunner`], so SSH keys,
//! credential helpers and `~/.gitconfig` apply as they would for a user.

use crate::error::Result;
use crate::runner::CommandRunner;
use log::info;
use std::path::Path;

/// Whether `dir` already holds a git repository.
pub fn is_repo(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// Initialize a repository in `dir`, track `branch` of `remote` as `origin`,
/// and check out `commit`.
///
/// A repository left by an earlier run is reused: its `origin` is pointed at
/// `remote` and `branch` and fetched instead of being added again.
pub fn init_tracking(
    runner: &dyn CommandRunner,
    dir: &Path,
    branch: &str,
    remote: &str,
    commit: &str,
) -> Result<()> {
    let existing = is_repo(dir);
    if !existing {
        runner.run("git", &["init"], dir)?;
    }

    if existing && has_origin(runner, dir)? {
        info!("Reusing repository in {}", dir.display());
        runner.run("git", &["remote", "set-url", "origin", remote], dir)?;
        runner.run("git", &["remote", "set-branches", "origin", branch], dir)?;
        runner.run("git", &["fetch", "origin"], dir)?;
    } else {
        runner.run("git", &["remote", "add", "-t", branch, "-f", "origin", remote], dir)?;
    }

    runner.run("git", &["checkout", commit], dir)?;
    Ok(())
}

fn has_origin(runner: &dyn CommandRunner, dir: &Path) -> Result<bool> {
    let remotes = runner.run("git", &["remote"], dir)?;
    Ok(remotes.stdout.lines().any(|name| name.trim() == "origin"))
}

/// Fetch `origin` with pruning and check out `commit` in the repository at
/// `dir`.
pub fn fetch_checkout(runner: &dyn CommandRunner, dir: &Path, commit: &str) -> Result<()> {
    runner.run("git", &["fetch", "--prune", "origin"], dir)?;
    runner.run("git", &["checkout", commit], dir)?;
    Ok(())
}

/// Clone `remote` into `parent/name` unless a repository is already there.
pub fn clone_into(runner: &dyn CommandRunner, parent: &Path, remote: &str, name: &str) -> Result<()> {
    let target = parent.join(name);
    if is_repo(&target) {
        info!("Repository {} already cloned, skipping", target.display());
        return Ok(());
    }
    runner.run("git", &["clone", remote, name], parent)?;
    Ok(())
}
