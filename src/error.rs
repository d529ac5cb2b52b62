//! # Error Handling
//!
//! This module defines the centralized error type for `ontest-deploy`. It uses
//! the `thiserror` library to describe every failure the reconciliation and
//! provisioning steps can hit, with enough context (paths, commands, exit
//! codes) for the single fatal log line the binary prints.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants fall into three groups:
//!   - configuration errors (`ConfigNotFound`, `ConfigParse`, `UnknownProject`,
//!     `MissingRepo`, `InvalidRefSlug`, and the wrapped parser errors);
//!   - filesystem errors (`Filesystem`, `Io`);
//!   - external command errors (`CommandLaunch`, `CommandFailed`).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! None of these are retried. The binary logs the error and exits non-zero,
//! leaving any partially provisioned tree in place.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ontest-deploy operations
#[derive(Error, Debug)]
pub enum Error {
    /// No configuration file was given and none was found in the search
    /// directory.
    #[error("Configuration file not found: {searched}")]
    ConfigNotFound { searched: String },

    /// The configuration file was found but its contents are invalid.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The requested project name is not part of the configured project set.
    #[error("Unknown project '{name}' (known projects: {})", known.join(", "))]
    UnknownProject { name: String, known: Vec<String> },

    /// A sidecar subdirectory has no repository to clone from.
    #[error("Subdirectory '{subdir}' has no repo configured")]
    MissingRepo { subdir: String },

    /// The ref slug cannot be used as a branch tree directory name.
    #[error("Invalid ref slug '{slug}': {reason}")]
    InvalidRefSlug { slug: String, reason: String },

    /// Creating or entering a directory on the host failed.
    #[error("Filesystem operation error at {}: {message}", path.display())]
    Filesystem { path: PathBuf, message: String },

    /// An external command could not be started at all.
    #[error("Could not launch '{command}' in {}: {message}", dir.display())]
    CommandLaunch {
        command: String,
        dir: PathBuf,
        message: String,
    },

    /// An external command ran and exited non-zero.
    #[error("Command '{command}' failed in {} with exit code {exit_code}: {}", dir.display(), stderr.trim())]
    CommandFailed {
        command: String,
        dir: PathBuf,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
