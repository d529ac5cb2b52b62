//! # External Command Execution
//!
//! Every git and build step goes through the [`CommandRunner`] trait. Each
//! call names its working directory explicitly; nothing in this crate changes
//! the process-wide current directory.
//!
//! [`SystemRunner`] spawns real processes and turns a non-zero exit into
//! [`Error::CommandFailed`]. Tests substitute a recording implementation to
//! check which commands a provisioning path issues, and where.

use crate::error::{Error, Result};
use log::{debug, info};
use std::path::Path;
use std::process::Command;

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner {
    /// Run `program` with `args` in `dir` and wait for it to finish.
    ///
    /// Implementations return an error when the command cannot be started or
    /// exits non-zero.
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<CommandOutput>;

    /// Run a shell command line through `bash -c`.
    fn run_shell(&self, command_line: &str, dir: &Path) -> Result<CommandOutput> {
        self.run("bash", &["-c", command_line], dir)
    }
}

/// Runs commands as child processes of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

/// Render a program and its arguments for log and error messages.
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> Result<CommandOutput> {
        let command = display_command(program, args);
        info!("run command: {} (in {})", command, dir.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::CommandLaunch {
                command: command.clone(),
                dir: dir.to_path_buf(),
                message: e.to_string(),
            })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            // Killed by a signal
            exit_code: output.status.code().unwrap_or(-1),
        };

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command,
                dir: dir.to_path_buf(),
                exit_code: result.exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }

        debug!(
            "command result, stdout: {}, stderr: {}, exitCode: {}",
            result.stdout.trim_end(),
            result.stderr.trim_end(),
            result.exit_code
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_display_command() {
        assert_eq!(
            display_command("git", &["checkout", "abc123"]),
            "git checkout abc123"
        );
        assert_eq!(display_command("true", &[]), "true");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout_in_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();

        let output = SystemRunner.run_shell("ls", temp.path()).unwrap();
        assert_eq!(output.exit_code, 0);
        assert!(output.stdout.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit_is_error() {
        let temp = TempDir::new().unwrap();
        let err = SystemRunner
            .run_shell("echo oops >&2; exit 3", temp.path())
            .unwrap_err();

        match err {
            Error::CommandFailed {
                exit_code, stderr, ..
            } => {
                assert_eq!(exit_code, 3);
                assert!(stderr.contains("oops"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_missing_program_is_launch_error() {
        let temp = TempDir::new().unwrap();
        let err = SystemRunner
            .run("ontest-deploy-no-such-program", &[], temp.path())
            .unwrap_err();
        assert!(matches!(err, Error::CommandLaunch { .. }));
    }

    #[test]
    fn test_run_missing_dir_is_launch_error() {
        let temp = TempDir::new().unwrap();
        let err = SystemRunner
            .run("true", &[], &temp.path().join("gone"))
            .unwrap_err();
        assert!(matches!(err, Error::CommandLaunch { .. }));
    }
}
