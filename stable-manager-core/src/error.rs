//! Error types for stable-manager operations.

use std::path::Path;

use thiserror::Error;

/// Render a path for error messages, relative to `root` when it lives under it.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// All error types that stable-manager operations can produce.
#[derive(Error, Debug)]
pub enum StableError {
    /// Invalid or missing configuration (TOML parse errors, bad suffixes, etc.).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A filesystem I/O operation failed (reading, writing, copying, removing).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The working file given to `promote` does not exist or is not a regular file.
    #[error("Working file not found: {path}")]
    WorkingFileMissing { path: String },

    /// `restore` was requested but no stable baseline has been promoted yet.
    #[error("No stable file exists yet: {path}")]
    NoStableFile { path: String },

    /// The directory given to `list` does not exist or is not a directory.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// A report could not be serialized for `--json` output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for `Result<T, StableError>`.
pub type Result<T> = std::result::Result<T, StableError>;
