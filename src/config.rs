//! # Configuration Schema and Loading
//!
//! This module defines the typed configuration that drives provisioning and
//! the logic for locating and parsing it.
//!
//! ## Schema
//!
//! ```yaml
//! hostdir: /srv/preview
//! projects: [directoryA, directoryB]   # optional, defaults to every subdir
//! subdirs:
//!   directoryA:
//!     action: "make deps,make build"     # comma-separated or a list
//!   directoryB:
//!     repo: git@example.com:team/b.git
//!     action: [make build]
//! ```
//!
//! Each entry under `subdirs` becomes one directory inside every branch tree.
//! The entry whose name equals the CI project name is the primary project and
//! is checked out from the CI commit; every other entry is a sidecar cloned
//! from its own `repo`.
//!
//! ## Locating the file
//!
//! Without an explicit path, the first of `env.yaml`, `env.yml`, `env.toml`
//! and `env.json` in the search directory is used. The format is chosen by
//! extension. After parsing, the `HOSTDIR` environment variable, when set and
//! non-empty, replaces `hostdir`.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Base name of the configuration file searched for by default.
pub const CONFIG_BASENAME: &str = "env";

/// Extensions tried, in order, when searching for the configuration file.
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "toml", "json"];

/// Environment variable overriding `hostdir`.
pub const HOSTDIR_ENV: &str = "HOSTDIR";

/// Configuration for a single subdirectory of a branch tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubdirConfig {
    /// Shell commands run in order inside the subdirectory after checkout.
    #[serde(default, deserialize_with = "deserialize_action")]
    pub action: Vec<String>,
    /// Remote to clone from. Only used for sidecar subdirectories.
    #[serde(default)]
    pub repo: Option<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Root directory holding every branch tree.
    #[serde(default)]
    pub hostdir: PathBuf,
    /// Subdirectories created in every branch tree, keyed by name.
    #[serde(default)]
    pub subdirs: BTreeMap<String, SubdirConfig>,
    /// Project names accepted from CI. Empty means every subdir name.
    #[serde(default)]
    pub projects: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAction {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_action<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawAction::deserialize(deserializer)?;
    Ok(match raw {
        RawAction::Joined(joined) => split_action(&joined),
        RawAction::List(list) => list
            .iter()
            .map(|cmd| cmd.trim().to_string())
            .filter(|cmd| !cmd.is_empty())
            .collect(),
    })
}

/// Split a comma-separated action string into trimmed, non-empty commands.
pub fn split_action(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Project names accepted as `--projectname`.
    pub fn project_names(&self) -> Vec<String> {
        if self.projects.is_empty() {
            self.subdirs.keys().cloned().collect()
        } else {
            self.projects.clone()
        }
    }

    /// Look up the configuration of the primary project.
    ///
    /// The name must be in the project set and have a `subdirs` entry.
    pub fn primary(&self, project: &str) -> Result<&SubdirConfig> {
        let known = self.project_names();
        if !known.iter().any(|name| name == project) {
            return Err(Error::UnknownProject {
                name: project.to_string(),
                known,
            });
        }
        self.subdirs.get(project).ok_or_else(|| Error::ConfigParse {
            message: format!("project '{}' has no subdirs entry", project),
            hint: Some(format!("Add 'subdirs.{}.action' to the configuration", project)),
        })
    }

    /// Replace values with their environment overrides.
    ///
    /// `lookup` resolves a variable name; pass `|k| std::env::var(k).ok()`
    /// for the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(hostdir) = lookup(HOSTDIR_ENV).filter(|v| !v.is_empty()) {
            self.hostdir = PathBuf::from(hostdir);
        }
    }

    /// Check invariants that parsing alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.hostdir.as_os_str().is_empty() {
            return Err(Error::ConfigParse {
                message: "hostdir is not set".to_string(),
                hint: Some(format!("Add 'hostdir:' or set {}", HOSTDIR_ENV)),
            });
        }
        if self.subdirs.is_empty() {
            return Err(Error::ConfigParse {
                message: "no subdirs configured".to_string(),
                hint: None,
            });
        }
        for name in &self.projects {
            if !self.subdirs.contains_key(name) {
                return Err(Error::ConfigParse {
                    message: format!("project '{}' is listed but has no subdirs entry", name),
                    hint: None,
                });
            }
        }
        Ok(())
    }
}

/// Find the configuration file in `dir`.
pub fn find(dir: &Path) -> Result<PathBuf> {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", CONFIG_BASENAME, ext)))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| Error::ConfigNotFound {
            searched: format!(
                "{}/{}.{{{}}}",
                dir.display(),
                CONFIG_BASENAME,
                CONFIG_EXTENSIONS.join(",")
            ),
        })
}

/// Parse configuration text according to the format named by `extension`.
pub fn parse(content: &str, extension: &str) -> Result<Config> {
    let config = match extension {
        "yaml" | "yml" => serde_yaml::from_str(content)?,
        "toml" => toml::from_str(content)?,
        "json" => serde_json::from_str(content)?,
        other => {
            return Err(Error::ConfigParse {
                message: format!("unsupported configuration format '{}'", other),
                hint: Some(format!("Use one of: {}", CONFIG_EXTENSIONS.join(", "))),
            })
        }
    };
    Ok(config)
}

/// Read and parse a configuration file without overrides or validation.
pub fn from_file(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            searched: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    parse(&content, extension)
}

/// Load the configuration used for a run.
///
/// Uses `explicit` when given, otherwise searches `search_dir`. Applies
/// environment overrides from the process environment and validates.
pub fn load(explicit: Option<&Path>, search_dir: &Path) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find(search_dir)?,
    };
    log::info!("Loading configuration from: {}", path.display());

    let mut config = from_file(&path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}
