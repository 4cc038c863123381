//! Idempotent directory creation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// What `ensure_dir` found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    Existed,
}

/// Creates `path` (and any missing parents) unless it is already a directory.
///
/// An existing directory is not an error; either outcome is logged.
pub fn ensure_dir(path: &Path) -> Result<DirStatus> {
    if path.is_dir() {
        tracing::info!("directory already exists: {}", path.display());
        return Ok(DirStatus::Existed);
    }
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))?;
    tracing::info!("created directory: {}", path.display());
    Ok(DirStatus::Created)
}
