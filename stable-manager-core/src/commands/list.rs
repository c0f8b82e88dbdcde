//! Read-only listing of stable and backup files.

use std::path::Path;

use serde::Serialize;

use crate::config::StableConfig;
use crate::error::{display_path, Result, StableError};
use crate::scanner::{self, TrackedFile};

/// Report from a list operation.
#[derive(Debug, Serialize)]
pub struct ListReport {
    /// Directory that was scanned, relative to the root (`.` for the root itself).
    pub directory: String,
    /// Whether subdirectories were scanned.
    pub deep: bool,
    /// Matches in traversal order.
    pub files: Vec<TrackedFile>,
}

/// Execute the list command.
///
/// `dir` defaults to the resolution root. Only the directory's direct
/// children are inspected unless `deep` is set.
pub fn execute(config: &StableConfig, dir: Option<&Path>, deep: bool) -> Result<ListReport> {
    let dir = dir.unwrap_or(config.root.as_path());
    let directory = match display_path(dir, &config.root) {
        d if d.is_empty() => ".".to_string(),
        d => d,
    };

    if !dir.is_dir() {
        return Err(StableError::DirectoryNotFound { path: directory });
    }

    let files = scanner::scan(dir, &config.root, &config.naming, &config.scan, deep)?;
    log::debug!(
        "Listed tracked files; directory={}, deep={}, found={}",
        directory,
        deep,
        files.len()
    );

    Ok(ListReport {
        directory,
        deep,
        files,
    })
}
