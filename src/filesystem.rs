//! Host filesystem access: listing branch directories and creating the
//! preview tree.

use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Permission bits for directories created under the host root.
pub const DIR_MODE: u32 = 0o750;

/// List the names of the immediate subdirectories of `host_dir`.
///
/// Names are returned in the order the operating system lists them. Plain
/// files and entries whose names are not valid UTF-8 are skipped.
pub fn list_dirs(host_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(host_dir).map_err(|e| Error::Filesystem {
        path: host_dir.to_path_buf(),
        message: format!("cannot list directory: {}", e),
    })?;

    let listing_error = |e: std::io::Error| Error::Filesystem {
        path: host_dir.to_path_buf(),
        message: format!("cannot read directory entry: {}", e),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(listing_error)?;
        if !entry.file_type().map_err(listing_error)?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            debug!("[{}]", name);
            dirs.push(name.to_string());
        }
    }
    Ok(dirs)
}

/// Create a single directory unless it already exists.
///
/// The parent must already exist. An existing directory is left untouched.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder.create(path).map_err(|e| Error::Filesystem {
        path: path.to_path_buf(),
        message: format!("cannot create directory: {}", e),
    })?;
    info!("Create directory: {}", path.display());
    Ok(())
}

/// Fail with a filesystem error unless `path` is an existing directory.
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::Filesystem {
            path: path.to_path_buf(),
            message: "directory does not exist".to_string(),
        })
    }
}
