//! Orchestrator for a complete deploy run
//!
//! Ties together directory matching and provisioning:
//! 1. Validate the ref slug and the project name
//! 2. List the branch trees under the host directory
//! 3. Match the incoming ref slug by fingerprint
//! 4. Pick a [`Plan`] and run it

use crate::config::{Config, SubdirConfig};
use crate::error::Result;
use crate::filesystem;
use crate::fingerprint::MARKER;
use crate::matcher::{self, MatchResult};
use crate::provision::{self, DeployRequest, Provisioner};
use crate::runner::CommandRunner;
use log::info;
use std::fmt;

/// Provisioning path selected for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The ref slug has no fingerprint: build a new tree.
    Fresh,
    /// A tree with the same fingerprint exists: rebuild its primary project.
    ReuseMatched { dir: String },
    /// The fingerprint is new: build a new tree.
    ReuseUnmatched,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Fresh => write!(f, "fresh (branch has no fingerprint)"),
            Plan::ReuseMatched { dir } => write!(f, "rebuild primary project in '{}'", dir),
            Plan::ReuseUnmatched => write!(f, "fresh (no directory with this fingerprint)"),
        }
    }
}

/// Choose the provisioning path for a match outcome.
pub fn choose(outcome: &MatchResult) -> Plan {
    if outcome.branch_fingerprint.is_empty() {
        Plan::Fresh
    } else if let Some(dir) = &outcome.matched_dir {
        Plan::ReuseMatched { dir: dir.clone() }
    } else {
        Plan::ReuseUnmatched
    }
}

/// Everything decided before the host is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan<'a> {
    /// Configuration of the project being deployed.
    pub primary: &'a SubdirConfig,
    pub outcome: MatchResult,
    pub plan: Plan,
}

/// Validate the request and compute the plan without changing anything on
/// the host.
pub fn plan_for<'a>(config: &'a Config, request: &DeployRequest) -> Result<DeployPlan<'a>> {
    provision::validate_tree_name(&request.ref_slug)?;
    let primary = config.primary(&request.project_name)?;

    let host_dirs = filesystem::list_dirs(&config.hostdir)?;
    let outcome = matcher::match_branch(&request.ref_slug, &host_dirs, MARKER);
    let plan = choose(&outcome);
    Ok(DeployPlan {
        primary,
        outcome,
        plan,
    })
}

/// Run a full deploy: plan, then provision along the chosen path.
pub fn execute_deploy(
    config: &Config,
    request: &DeployRequest,
    runner: &dyn CommandRunner,
) -> Result<Plan> {
    let DeployPlan {
        primary,
        outcome,
        plan,
    } = plan_for(config, request)?;
    info!(
        "Deploying {} for {} at {}: {}",
        request.project_name, request.ref_slug, request.commit_sha, plan
    );

    let provisioner = Provisioner::new(config, runner);
    match plan {
        Plan::Fresh => provisioner.provision_fresh(request, primary)?,
        Plan::ReuseMatched { .. } | Plan::ReuseUnmatched => {
            provisioner.provision_reuse(request, primary, &outcome)?
        }
    }
    Ok(plan)
}
