//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_subdirs(configs::APP_ONLY);
//!     fixture
//!         .command()
//!         .args(["--dry-run", "--refslug", "feature-x", "--projectname", "app"])
//!         .assert()
//!         .success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::{git_available, seed_remote};
    pub use super::TestFixture;
}

/// `subdirs:` blocks used to build configuration files.
#[allow(dead_code)]
pub mod configs {
    /// A single primary project that touches a file when built.
    pub const APP_ONLY: &str = r#"
  app:
    action: "touch built.txt"
"#;

    /// A primary project whose build always fails.
    pub const FAILING_APP: &str = r#"
  app:
    action: "echo compiling, exit 7"
"#;
}

/// Whether a usable `git` binary is on the PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Create a repository in `dir` with one commit on `branch` and return the
/// commit sha.
#[allow(dead_code)]
pub fn seed_remote(dir: &Path, branch: &str) -> String {
    let git = |args: &[&str]| {
        let out = Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_NAME", "ci")
            .env("GIT_AUTHOR_EMAIL", "ci@example.com")
            .env("GIT_COMMITTER_NAME", "ci")
            .env("GIT_COMMITTER_EMAIL", "ci@example.com")
            .output()
            .expect("Failed to run git");
        assert!(out.status.success(), "git {:?} failed: {:?}", args, out);
        String::from_utf8(out.stdout).expect("git output is not UTF-8")
    };
    std::fs::create_dir_all(dir).expect("Failed to create remote directory");
    git(&["init", "-q"]);
    git(&["checkout", "-q", "-b", branch]);
    std::fs::write(dir.join("README.md"), "preview").expect("Failed to write README");
    git(&["add", "README.md"]);
    git(&["commit", "-q", "-m", "initial"]);
    git(&["rev-parse", "HEAD"]).trim().to_string()
}

/// A temporary working directory holding an `env.yaml` and a `host/` root.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with an empty host directory and no configuration.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("host")
            .create_dir_all()
            .expect("Failed to create host directory");
        Self { temp_dir }
    }

    /// Write `env.yaml` pointing at the fixture's host directory with the
    /// given `subdirs:` block.
    pub fn with_subdirs(self, subdirs: &str) -> Self {
        let content = format!("hostdir: {}\nsubdirs:{}", self.host().display(), subdirs);
        self.temp_dir
            .child("env.yaml")
            .write_str(&content)
            .expect("Failed to write config file");
        self
    }

    /// Create a branch tree (and optional subdirectories) under the host.
    pub fn with_host_dir(self, name: &str, subdirs: &[&str]) -> Self {
        let tree = self.temp_dir.child("host").child(name);
        tree.create_dir_all().expect("Failed to create host dir");
        for subdir in subdirs {
            tree.child(subdir)
                .create_dir_all()
                .expect("Failed to create subdir");
        }
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the host root.
    pub fn host(&self) -> PathBuf {
        self.temp_dir.path().join("host")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A command for the binary running in the fixture, isolated from CI
    /// variables of the surrounding environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("ontest-deploy");
        cmd.current_dir(self.path())
            .env_remove("HOSTDIR")
            .env_remove("ONTEST_CONFIG")
            .env_remove("RUST_LOG")
            .env_remove("CI_COMMIT_REF_SLUG")
            .env_remove("CI_REPOSITORY_URL")
            .env_remove("CI_COMMIT_SHA")
            .env_remove("CI_PROJECT_NAME");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
