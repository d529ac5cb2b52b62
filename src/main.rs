//! # ontest-deploy CLI
//!
//! This is the binary entry point for the `ontest-deploy` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initializing the logger.
//! - Logging any fatal error and exiting with status 1.
//!
//! The reconciliation and provisioning logic lives in the library crate.

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
