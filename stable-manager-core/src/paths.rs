//! Stable/backup path derivation and project root resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Result, StableError};

/// Entries whose presence marks a directory as the project root.
pub const ROOT_MARKERS: &[&str] = &[CONFIG_FILE_NAME, ".git", "Cargo.toml", "package.json"];

/// Suffixes inserted before the file extension to name the sibling files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Naming {
    /// Suffix of the promoted baseline (`notes.md` → `notes-stable.md`).
    pub stable_suffix: String,
    /// Suffix of the pre-restore snapshot (`notes.md` → `notes-backup.md`).
    pub backup_suffix: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            stable_suffix: "-stable".to_string(),
            backup_suffix: "-backup".to_string(),
        }
    }
}

impl Naming {
    /// Reject suffixes that would make derived names ambiguous or escape the directory.
    pub fn validate(&self) -> Result<()> {
        for (key, suffix) in [
            ("stable_suffix", &self.stable_suffix),
            ("backup_suffix", &self.backup_suffix),
        ] {
            if suffix.is_empty() {
                return Err(StableError::ConfigError(format!("{key} must not be empty")));
            }
            if suffix.contains('.') || suffix.contains('/') || suffix.contains('\\') {
                return Err(StableError::ConfigError(format!(
                    "{key} '{suffix}' must not contain '.' or path separators"
                )));
            }
        }
        if self.stable_suffix == self.backup_suffix {
            return Err(StableError::ConfigError(format!(
                "stable_suffix and backup_suffix must differ (both are '{}')",
                self.stable_suffix
            )));
        }
        Ok(())
    }
}

/// The working file and its two derived siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub working: PathBuf,
    pub stable: PathBuf,
    pub backup: PathBuf,
}

impl SnapshotPaths {
    /// Derive the stable and backup paths for `working`.
    ///
    /// The suffix goes between the file stem and the extension, so
    /// `src/app.js` yields `src/app-stable.js`. Files without an extension
    /// (including dot-files such as `.env`) get the suffix appended.
    pub fn derive(working: &Path, naming: &Naming) -> Self {
        Self {
            working: working.to_path_buf(),
            stable: with_suffix(working, &naming.stable_suffix),
            backup: with_suffix(working, &naming.backup_suffix),
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let mut name = OsString::from(stem);
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// Resolve `arg` against the directory the process was started in.
pub fn resolve_arg(cwd: &Path, arg: &str) -> PathBuf {
    cwd.join(arg)
}

/// Find the resolution root.
///
/// An explicit root wins and must be an existing directory. Otherwise walk up
/// from `start` to the first directory holding one of [`ROOT_MARKERS`],
/// falling back to `start` itself.
pub fn resolve_root(explicit: Option<&Path>, start: &Path) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if !root.is_dir() {
            return Err(StableError::ConfigError(format!(
                "Root '{}' is not a directory",
                root.display()
            )));
        }
        return Ok(root.to_path_buf());
    }

    Ok(find_project_root(start).unwrap_or_else(|| start.to_path_buf()))
}

/// Walk parent directories from `start` looking for a project marker.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|m| dir.join(m).exists()))
        .map(Path::to_path_buf)
}
