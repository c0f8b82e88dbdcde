//! Discovery of stable and backup files under a directory.
//!
//! A file is tracked when its name ends with `{suffix}.<ext>` for one of the
//! configured suffixes and a non-empty extension without dots. Hidden entries
//! and excluded directory names are skipped without descending into them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::Serialize;

use crate::error::{Result, StableError};
use crate::paths::Naming;

/// Traversal settings shared by `list` and `clean`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Directory or file names that are never entered or reported.
    pub exclude: Vec<String>,
    /// Whether names starting with `.` are scanned.
    pub include_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude: vec![
                "node_modules".to_string(),
                "dist".to_string(),
                "build".to_string(),
            ],
            include_hidden: false,
        }
    }
}

/// Which sibling a tracked file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackedKind {
    Stable,
    Backup,
}

impl std::fmt::Display for TrackedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackedKind::Stable => write!(f, "stable"),
            TrackedKind::Backup => write!(f, "backup"),
        }
    }
}

/// A stable or backup file found by a scan.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedFile {
    /// Path relative to the resolution root.
    pub path: PathBuf,
    pub kind: TrackedKind,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Compiled filename matcher for the configured suffixes.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Regex,
}

impl Matcher {
    pub fn new(naming: &Naming) -> Result<Self> {
        let source = format!(
            r"(?:({})|({}))\.[^.]+$",
            regex_lite::escape(&naming.stable_suffix),
            regex_lite::escape(&naming.backup_suffix)
        );
        let pattern = Regex::new(&source)
            .map_err(|e| StableError::ConfigError(format!("Invalid suffix pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Classify a file name, or `None` if it is not a stable/backup file.
    pub fn classify(&self, file_name: &str) -> Option<TrackedKind> {
        let caps = self.pattern.captures(file_name)?;
        if caps.get(1).is_some() {
            Some(TrackedKind::Stable)
        } else {
            Some(TrackedKind::Backup)
        }
    }
}

/// Scan `dir` for tracked files, reporting paths relative to `root`.
///
/// Results come back in traversal order. Unreadable directories are skipped.
pub fn scan(
    dir: &Path,
    root: &Path,
    naming: &Naming,
    options: &ScanOptions,
    recursive: bool,
) -> Result<Vec<TrackedFile>> {
    let matcher = Matcher::new(naming)?;
    let mut results = Vec::new();
    walk(dir, root, &matcher, options, recursive, &mut results);
    Ok(results)
}

fn walk(
    dir: &Path,
    root: &Path,
    matcher: &Matcher,
    options: &ScanOptions,
    recursive: bool,
    results: &mut Vec<TrackedFile>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Skipping unreadable directory; path={}, error={}", dir.display(), e);
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if is_skipped(&name, options) {
            continue;
        }

        // file_type() does not follow symlinks, so linked directories are not entered.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();

        if file_type.is_dir() {
            if recursive {
                walk(&path, root, matcher, options, recursive, results);
            }
            continue;
        }

        if let Some(kind) = matcher.classify(&name) {
            let meta = entry.metadata().ok();
            results.push(TrackedFile {
                path: path.strip_prefix(root).unwrap_or(path.as_path()).to_path_buf(),
                kind,
                size_bytes: meta.as_ref().map(|m| m.len()).unwrap_or(0),
                modified: meta
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Utc>::from),
            });
        }
    }
}

fn is_skipped(name: &str, options: &ScanOptions) -> bool {
    (!options.include_hidden && name.starts_with('.'))
        || options.exclude.iter().any(|e| e == name)
}
