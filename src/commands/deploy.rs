//! # Deploy Command Implementation
//!
//! Loads the configuration, matches the incoming ref slug against the branch
//! trees on the host and provisions along the chosen path.
//!
//! With `--dry-run` the command stops after planning and prints the match
//! outcome and the selected path. Nothing on the host is created or run.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use ontest_deploy::config;
use ontest_deploy::orchestrator::{self, Plan};
use ontest_deploy::provision::DeployRequest;
use ontest_deploy::runner::SystemRunner;

/// Arguments for the deploy command
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// CI ref name lowercased, shortened to 63 bytes, with everything except
    /// 0-9 and a-z replaced with '-'. Used as the branch tree name.
    #[arg(long = "refslug", value_name = "SLUG", env = "CI_COMMIT_REF_SLUG", default_value = "")]
    pub ref_slug: String,

    /// The URL to clone the primary project's Git repository from
    #[arg(long = "repourl", value_name = "URL", env = "CI_REPOSITORY_URL", default_value = "")]
    pub repo_url: String,

    /// The commit revision for which the project is built
    #[arg(long = "commitsha", value_name = "SHA", env = "CI_COMMIT_SHA", default_value = "")]
    pub commit_sha: String,

    /// The project being built; names its subdirectory in the branch tree
    #[arg(long = "projectname", value_name = "NAME", env = "CI_PROJECT_NAME", default_value = "")]
    pub project_name: String,

    /// Path to config file (defaults to env.{yaml,yml,toml,json} in the current directory)
    #[arg(short, long, value_name = "PATH", env = "ONTEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the selected provisioning path without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl DeployArgs {
    fn request(&self) -> DeployRequest {
        DeployRequest {
            ref_slug: self.ref_slug.clone(),
            repo_url: self.repo_url.clone(),
            commit_sha: self.commit_sha.clone(),
            project_name: self.project_name.clone(),
        }
    }
}

/// Execute the deploy command
pub fn execute(args: DeployArgs) -> Result<()> {
    let search_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = config::load(args.config.as_deref(), &search_dir)?;
    let request = args.request();

    if args.dry_run {
        let orchestrator::DeployPlan { outcome, plan, .. } =
            orchestrator::plan_for(&config, &request)?;
        println!("Branch fingerprint: {:?}", outcome.branch_fingerprint);
        if let Some(dir) = &outcome.matched_dir {
            println!("Matched directory: {} ({})", dir, outcome.host_fingerprint);
        }
        let target = match &plan {
            Plan::ReuseMatched { dir } => config.hostdir.join(dir),
            Plan::Fresh | Plan::ReuseUnmatched => config.hostdir.join(&request.ref_slug),
        };
        println!("Plan: {}", plan);
        println!("Target: {}", target.display());
        return Ok(());
    }

    let plan = orchestrator::execute_deploy(&config, &request, &SystemRunner)
        .with_context(|| format!("Deploy of '{}' failed", request.ref_slug))?;
    log::info!("Done: {}", plan);
    Ok(())
}
