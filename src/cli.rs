//! CLI argument parsing and logger setup

use anyhow::Result;
use clap::Parser;

use crate::commands;

/// Materialize a per-branch preview deployment on the host, reusing the tree
/// of an earlier build with the same commit fingerprint.
#[derive(Parser, Debug)]
#[command(name = "ontest-deploy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    deploy: commands::deploy::DeployArgs,

    /// Set log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Initialize logging and run the deploy
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&self.log_level))
            .format_timestamp_secs()
            .init();

        commands::deploy::execute(self.deploy)
    }
}
